use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::validate;

const USER_COLUMNS: &str = "username, password, name, token";

/// Same message for unknown username and wrong password
const INVALID_CREDENTIALS: &str = "username or password is wrong";

pub struct UserService {
    pool: PgPool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool().clone(),
            bcrypt_cost: state.config.security.bcrypt_cost,
        }
    }

    /// Create an account. The primary key on `username` makes the
    /// duplicate check and the insert a single atomic statement.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserResponse, ApiError> {
        let request = validate(request)?;
        let password = hash_password(request.password, self.bcrypt_cost).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password, name) VALUES ($1, $2, $3)
             ON CONFLICT (username) DO NOTHING
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&request.username)
        .bind(&password)
        .bind(&request.name)
        .fetch_optional(&self.pool)
        .await?;

        let user = user.ok_or_else(|| {
            warn!("Registration rejected: username '{}' already exists", request.username);
            ApiError::conflict("username already exists")
        })?;

        info!("Registered user '{}'", user.username);
        Ok(UserResponse::from(&user))
    }

    /// Verify credentials and issue a fresh token, replacing the previous one
    pub async fn login(&self, request: LoginUserRequest) -> Result<UserResponse, ApiError> {
        let request = validate(request)?;

        let Some(user) = self.find_by_username(&request.username).await? else {
            warn!("Login failed: unknown username '{}'", request.username);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(request.password, user.password.clone()).await? {
            warn!("Login failed: wrong password for '{}'", user.username);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET token = $1 WHERE username = $2 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&token)
        .bind(&user.username)
        .fetch_one(&self.pool)
        .await?;

        info!("User '{}' logged in", user.username);
        let mut response = UserResponse::from(&user);
        response.token = user.token;
        Ok(response)
    }

    pub async fn get(&self, user: &User) -> Result<UserResponse, ApiError> {
        Ok(UserResponse::from(user))
    }

    /// Change name and/or password; absent fields keep their current value
    pub async fn update(&self, user: &User, request: UpdateUserRequest) -> Result<UserResponse, ApiError> {
        let request = validate(request)?;

        let password = match request.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = COALESCE($1, name), password = COALESCE($2, password)
             WHERE username = $3
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&request.name)
        .bind(&password)
        .bind(&user.username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        Ok(UserResponse::from(&updated))
    }

    /// Clear the session token so it can no longer authenticate
    pub async fn logout(&self, user: &User) -> Result<String, ApiError> {
        sqlx::query("UPDATE users SET token = NULL WHERE username = $1")
            .bind(&user.username)
            .execute(&self.pool)
            .await?;

        info!("User '{}' logged out", user.username);
        Ok("OK".to_string())
    }

    /// Resolve a bearer token to its user
    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE token = $1",
            USER_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// bcrypt is CPU bound; keep it off the async workers. The non-truncating
/// variants refuse input past 72 bytes instead of silently ignoring the tail.
async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::non_truncating_hash(password, cost)).await??;
    Ok(hashed)
}

async fn verify_password(password: String, hashed: String) -> Result<bool, ApiError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::non_truncating_verify(password, &hashed)).await??;
    Ok(valid)
}
