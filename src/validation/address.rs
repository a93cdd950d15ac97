use super::{Validate, Validator};
use crate::api::{CreateAddressRequest, UpdateAddressRequest};
use crate::error::ApiError;

fn address_fields(
    v: &mut Validator,
    street: Option<&str>,
    city: Option<&str>,
    province: Option<&str>,
    country: &str,
    postal_code: &str,
) {
    v.optional("street", street, 1, 255)
        .optional("city", city, 1, 100)
        .optional("province", province, 1, 100)
        .required("country", country, 1, 100)
        .required("postal_code", postal_code, 1, 10);
}

impl Validate for CreateAddressRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.positive("contact_id", self.contact_id);
        address_fields(
            &mut v,
            self.street.as_deref(),
            self.city.as_deref(),
            self.province.as_deref(),
            &self.country,
            &self.postal_code,
        );
        v.finish()
    }
}

impl Validate for UpdateAddressRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.positive("contact_id", self.contact_id).positive("id", self.id);
        address_fields(
            &mut v,
            self.street.as_deref(),
            self.city.as_deref(),
            self.province.as_deref(),
            &self.country,
            &self.postal_code,
        );
        v.finish()
    }
}
