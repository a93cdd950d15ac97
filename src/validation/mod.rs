//! Request validation.
//!
//! Every request type implements [`Validate`]; services call it before
//! touching the database. Violations are collected per field and returned
//! together as a single `ApiError::ValidationError`.

use std::collections::BTreeMap;

use crate::error::ApiError;

mod address;
mod contact;
mod user;

pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Validate and hand the request back, mirroring how services consume it
pub fn validate<T: Validate>(request: T) -> Result<T, ApiError> {
    request.validate()?;
    Ok(request)
}

/// Collects field errors; the first violation per field wins.
#[derive(Debug, Default)]
pub struct Validator {
    field_errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required string with a length range in characters
    pub fn required(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.chars().count();
        if len == 0 && min > 0 {
            self.reject(field, "must not be empty".to_string());
        } else if len < min {
            self.reject(field, format!("must be at least {} characters", min));
        } else if len > max {
            self.reject(field, format!("must be at most {} characters", max));
        }
        self
    }

    /// Optional string: only checked when present
    pub fn optional(&mut self, field: &str, value: Option<&str>, min: usize, max: usize) -> &mut Self {
        if let Some(v) = value {
            self.required(field, v, min, max);
        }
        self
    }

    /// Upper bound in bytes, for values whose consumer counts bytes
    pub fn max_bytes(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(v) = value {
            if v.len() > max {
                self.reject(field, format!("must be at most {} bytes", max));
            }
        }
        self
    }

    pub fn email(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(v) = value {
            self.required(field, v, 1, max);
            if !self.field_errors.contains_key(field) && !looks_like_email(v) {
                self.reject(field, "must be a valid email".to_string());
            }
        }
        self
    }

    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) -> &mut Self {
        if value < min {
            self.reject(field, format!("must be at least {}", min));
        } else if value > max {
            self.reject(field, format!("must be at most {}", max));
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: i64) -> &mut Self {
        self.range(field, value, 1, i64::MAX)
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.is_valid() {
            return Ok(());
        }
        let field_errors = std::mem::take(&mut self.field_errors);
        let message = field_errors
            .iter()
            .map(|(field, msg)| format!("{} {}", field, msg))
            .collect::<Vec<_>>()
            .join(", ");
        Err(ApiError::validation_error(message, field_errors))
    }

    fn reject(&mut self, field: &str, message: String) {
        self.field_errors.entry(field.to_string()).or_insert(message);
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
