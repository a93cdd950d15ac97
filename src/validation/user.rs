use super::{Validate, Validator};
use crate::api::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest};
use crate::error::ApiError;

/// bcrypt only ever sees the first 72 bytes of a password
pub const MAX_PASSWORD_BYTES: usize = 72;

impl Validate for RegisterUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required("username", &self.username, 1, 100)
            .required("password", &self.password, 1, 100)
            .max_bytes("password", Some(self.password.as_str()), MAX_PASSWORD_BYTES)
            .required("name", &self.name, 1, 100)
            .finish()
    }
}

impl Validate for LoginUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required("username", &self.username, 1, 100)
            .required("password", &self.password, 1, 100)
            .max_bytes("password", Some(self.password.as_str()), MAX_PASSWORD_BYTES)
            .finish()
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .optional("name", self.name.as_deref(), 1, 100)
            .optional("password", self.password.as_deref(), 1, 100)
            .max_bytes("password", self.password.as_deref(), MAX_PASSWORD_BYTES)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_every_field() {
        let err = RegisterUserRequest::default().validate().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors, .. } => {
                assert!(field_errors.contains_key("username"));
                assert!(field_errors.contains_key("password"));
                assert!(field_errors.contains_key("name"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn register_accepts_valid_input() {
        let req = RegisterUserRequest {
            username: "bob".into(),
            password: "rahasia".into(),
            name: "Bob".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn login_rejects_overlong_password() {
        let req = LoginUserRequest {
            username: "bob".into(),
            password: "x".repeat(101),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn passwords_longer_than_bcrypt_input_are_rejected() {
        let register = RegisterUserRequest {
            username: "bob".into(),
            password: "x".repeat(73),
            name: "Bob".into(),
        };
        assert_eq!(
            register.validate().unwrap_err().message(),
            "password must be at most 72 bytes"
        );

        let login = LoginUserRequest {
            username: "bob".into(),
            password: "x".repeat(73),
        };
        assert!(login.validate().is_err());

        let update = UpdateUserRequest {
            name: None,
            password: Some("x".repeat(73)),
        };
        assert!(update.validate().is_err());

        let at_limit = RegisterUserRequest {
            username: "bob".into(),
            password: "x".repeat(72),
            name: "Bob".into(),
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn update_allows_empty_patch_but_not_empty_values() {
        assert!(UpdateUserRequest::default().validate().is_ok());
        let req = UpdateUserRequest {
            name: Some(String::new()),
            password: None,
        };
        assert!(req.validate().is_err());
    }
}
