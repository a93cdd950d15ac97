// /api/contacts[/:contactId]

use axum::{extract::State, Json};

use crate::api::{
    ContactResponse, CreateContactRequest, Pageable, SearchContactQuery, UpdateContactRequest,
};
use crate::error::ApiError;
use crate::handlers::extract::{ContactPath, JsonBody, QueryParams};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ContactService;
use crate::state::AppState;

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<CreateContactRequest>,
) -> ApiResult<ContactResponse> {
    let contact = ContactService::new(&state).create(&user, request).await?;
    Ok(ApiResponse::success(contact))
}

/// GET /api/contacts/:contactId
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ContactPath(contact_id): ContactPath,
) -> ApiResult<ContactResponse> {
    let contact = ContactService::new(&state).get(&user, contact_id).await?;
    Ok(ApiResponse::success(contact))
}

/// PUT /api/contacts/:contactId
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ContactPath(contact_id): ContactPath,
    JsonBody(mut request): JsonBody<UpdateContactRequest>,
) -> ApiResult<ContactResponse> {
    request.id = contact_id;
    let contact = ContactService::new(&state).update(&user, request).await?;
    Ok(ApiResponse::success(contact))
}

/// DELETE /api/contacts/:contactId
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ContactPath(contact_id): ContactPath,
) -> ApiResult<ContactResponse> {
    let contact = ContactService::new(&state).remove(&user, contact_id).await?;
    Ok(ApiResponse::success(contact))
}

/// GET /api/contacts?name=&email=&phone=&page=&size=
///
/// The page envelope already carries `data`, so it is returned as is.
pub async fn search(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<SearchContactQuery>,
) -> Result<Json<Pageable<ContactResponse>>, ApiError> {
    let request = query.into_request(state.config.api.default_page_size, state.config.api.max_page_size);
    let page = ContactService::new(&state).search(&user, request).await?;
    Ok(Json(page))
}
