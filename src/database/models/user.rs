use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    /// bcrypt hash
    pub password: String,
    pub name: String,
    pub token: Option<String>,
}
