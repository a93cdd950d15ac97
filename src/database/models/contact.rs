use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
