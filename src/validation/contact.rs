use super::{Validate, Validator};
use crate::api::{CreateContactRequest, SearchContactRequest, UpdateContactRequest};
use crate::error::ApiError;

fn contact_fields(
    v: &mut Validator,
    first_name: &str,
    last_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) {
    v.required("first_name", first_name, 1, 100)
        .optional("last_name", last_name, 1, 100)
        .email("email", email, 100)
        .optional("phone", phone, 1, 20);
}

impl Validate for CreateContactRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        contact_fields(
            &mut v,
            &self.first_name,
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        );
        v.finish()
    }
}

impl Validate for UpdateContactRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.positive("id", self.id);
        contact_fields(
            &mut v,
            &self.first_name,
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        );
        v.finish()
    }
}

impl Validate for SearchContactRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .optional("name", self.name.as_deref(), 1, 100)
            .optional("email", self.email.as_deref(), 1, 100)
            .optional("phone", self.phone.as_deref(), 1, 20)
            .positive("page", self.page)
            .range("size", self.size, 1, self.max_size)
            .finish()
    }
}
