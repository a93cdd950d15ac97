// /api/users/current

use axum::extract::State;

use crate::api::{UpdateUserRequest, UserResponse};
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;
use crate::state::AppState;

/// GET /api/users/current
pub async fn get(State(state): State<AppState>, AuthUser(user): AuthUser) -> ApiResult<UserResponse> {
    let user = UserService::new(&state).get(&user).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /api/users/current - Change name and/or password
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let user = UserService::new(&state).update(&user, request).await?;
    Ok(ApiResponse::success(user))
}

/// DELETE /api/users/current - Invalidate the session token
pub async fn logout(State(state): State<AppState>, AuthUser(user): AuthUser) -> ApiResult<String> {
    let result = UserService::new(&state).logout(&user).await?;
    Ok(ApiResponse::success(result))
}
