// POST /api/users, POST /api/users/login

use axum::extract::State;

use crate::api::{LoginUserRequest, RegisterUserRequest, UserResponse};
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::state::AppState;

/// POST /api/users - Register a new account
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterUserRequest>,
) -> ApiResult<UserResponse> {
    let user = UserService::new(&state).register(request).await?;
    Ok(ApiResponse::success(user))
}

/// POST /api/users/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginUserRequest>,
) -> ApiResult<UserResponse> {
    let user = UserService::new(&state).login(request).await?;
    Ok(ApiResponse::success(user))
}
