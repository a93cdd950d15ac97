use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;

/// Alternative header for clients that cannot send `Authorization`
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// The user owning the request's session token
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Token authentication middleware: resolves the session token to a user
/// and injects it into the request extensions
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_token(&headers) else {
        tracing::warn!("Rejected {} {}: missing token", request.method(), request.uri().path());
        return Err(unauthorized());
    };

    let user = UserService::new(&state)
        .find_by_token(&token)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Rejected {} {}: unknown token", request.method(), request.uri().path());
            unauthorized()
        })?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Pull the token from `Authorization: Bearer <token>` or `X-API-TOKEN`
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    let token = bearer.or_else(|| {
        headers
            .get(API_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
    })?;

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized")
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc-123"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn falls_back_to_api_token_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-token", HeaderValue::from_static("abc-123"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn ignores_other_schemes_and_blank_tokens() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic Ym9iOnB3"));
        assert_eq!(extract_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_token(&headers), None);

        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
