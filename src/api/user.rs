use serde::{Deserialize, Serialize};

use crate::database::models::User;

/// Missing fields deserialize as empty strings so validation reports them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_never_carries_password_or_token() {
        let user = User {
            username: "bob".into(),
            password: "$2b$10$hash".into(),
            name: "Bob".into(),
            token: Some("secret".into()),
        };
        let body = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(body, json!({ "username": "bob", "name": "Bob" }));
    }

    #[test]
    fn missing_fields_become_empty() {
        let req: RegisterUserRequest = serde_json::from_value(json!({ "username": "bob" })).unwrap();
        assert_eq!(req.username, "bob");
        assert!(req.password.is_empty());
        assert!(req.name.is_empty());
    }
}
