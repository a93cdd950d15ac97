// /api/contacts/:contactId/addresses[/:addressId]

use axum::extract::State;

use crate::api::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use crate::handlers::extract::{AddressPath, ContactPath, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::AddressService;
use crate::state::AppState;

/// POST /api/contacts/:contactId/addresses
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ContactPath(contact_id): ContactPath,
    JsonBody(mut request): JsonBody<CreateAddressRequest>,
) -> ApiResult<AddressResponse> {
    request.contact_id = contact_id;
    let address = AddressService::new(&state).create(&user, request).await?;
    Ok(ApiResponse::success(address))
}

/// GET /api/contacts/:contactId/addresses
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ContactPath(contact_id): ContactPath,
) -> ApiResult<Vec<AddressResponse>> {
    let addresses = AddressService::new(&state).list(&user, contact_id).await?;
    Ok(ApiResponse::success(addresses))
}

/// GET /api/contacts/:contactId/addresses/:addressId
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    path: AddressPath,
) -> ApiResult<AddressResponse> {
    let address = AddressService::new(&state)
        .get(&user, path.contact_id, path.address_id)
        .await?;
    Ok(ApiResponse::success(address))
}

/// PUT /api/contacts/:contactId/addresses/:addressId
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    path: AddressPath,
    JsonBody(mut request): JsonBody<UpdateAddressRequest>,
) -> ApiResult<AddressResponse> {
    request.contact_id = path.contact_id;
    request.id = path.address_id;
    let address = AddressService::new(&state).update(&user, request).await?;
    Ok(ApiResponse::success(address))
}

/// DELETE /api/contacts/:contactId/addresses/:addressId
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    path: AddressPath,
) -> ApiResult<AddressResponse> {
    let address = AddressService::new(&state)
        .remove(&user, path.contact_id, path.address_id)
        .await?;
    Ok(ApiResponse::success(address))
}
