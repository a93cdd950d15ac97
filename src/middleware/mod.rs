pub mod auth;
pub mod response;

pub use auth::{extract_token, token_auth_middleware, AuthUser};
pub use response::{ApiResponse, ApiResult};
