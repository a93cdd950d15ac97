//! Extractors that turn axum's rejections into `ApiError`s so every
//! failure leaves the server in the `{"errors": ...}` envelope.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body; any malformed or mistyped body is a 400
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string; malformed values are a 400
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `:contactId` segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ContactPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(contact_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| route_not_found())?;
        Ok(Self(parse_id(&contact_id)?))
    }
}

/// `:contactId/addresses/:addressId` segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPath {
    pub contact_id: i64,
    pub address_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AddressPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((contact_id, address_id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|_| route_not_found())?;
        Ok(Self {
            contact_id: parse_id(&contact_id)?,
            address_id: parse_id(&address_id)?,
        })
    }
}

/// Ids are decimal digits only; anything else does not match a route
pub fn parse_id(segment: &str) -> Result<i64, ApiError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(route_not_found());
    }
    segment.parse::<i64>().map_err(|_| route_not_found())
}

pub fn route_not_found() -> ApiError {
    ApiError::not_found("not found")
}
