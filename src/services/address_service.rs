use sqlx::PgPool;
use tracing::info;

use crate::api::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use crate::database::models::{Address, User};
use crate::error::ApiError;
use crate::services::contact_service::check_contact_must_exist;
use crate::state::AppState;
use crate::validation::validate;

const ADDRESS_COLUMNS: &str = "id, contact_id, street, city, province, country, postal_code";

/// Addresses are only reachable through a contact the caller owns.
pub struct AddressService {
    pool: PgPool,
}

impl AddressService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool().clone(),
        }
    }

    pub async fn create(&self, user: &User, request: CreateAddressRequest) -> Result<AddressResponse, ApiError> {
        let request = validate(request)?;
        let contact = check_contact_must_exist(&self.pool, &user.username, request.contact_id).await?;

        let address = sqlx::query_as::<_, Address>(&format!(
            "INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            ADDRESS_COLUMNS
        ))
        .bind(contact.id)
        .bind(&request.street)
        .bind(&request.city)
        .bind(&request.province)
        .bind(&request.country)
        .bind(&request.postal_code)
        .fetch_one(&self.pool)
        .await?;

        info!("Created address {} for contact {}", address.id, contact.id);
        Ok(address.into())
    }

    pub async fn get(&self, user: &User, contact_id: i64, address_id: i64) -> Result<AddressResponse, ApiError> {
        let contact = check_contact_must_exist(&self.pool, &user.username, contact_id).await?;
        let address = self.check_address_must_exist(contact.id, address_id).await?;
        Ok(address.into())
    }

    pub async fn update(&self, user: &User, request: UpdateAddressRequest) -> Result<AddressResponse, ApiError> {
        let request = validate(request)?;
        let contact = check_contact_must_exist(&self.pool, &user.username, request.contact_id).await?;

        let address = sqlx::query_as::<_, Address>(&format!(
            "UPDATE addresses
             SET street = $1, city = $2, province = $3, country = $4, postal_code = $5
             WHERE id = $6 AND contact_id = $7
             RETURNING {}",
            ADDRESS_COLUMNS
        ))
        .bind(&request.street)
        .bind(&request.city)
        .bind(&request.province)
        .bind(&request.country)
        .bind(&request.postal_code)
        .bind(request.id)
        .bind(contact.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(address_not_found)?;

        Ok(address.into())
    }

    pub async fn remove(&self, user: &User, contact_id: i64, address_id: i64) -> Result<AddressResponse, ApiError> {
        let contact = check_contact_must_exist(&self.pool, &user.username, contact_id).await?;

        let address = sqlx::query_as::<_, Address>(&format!(
            "DELETE FROM addresses WHERE id = $1 AND contact_id = $2 RETURNING {}",
            ADDRESS_COLUMNS
        ))
        .bind(address_id)
        .bind(contact.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(address_not_found)?;

        info!("Removed address {} from contact {}", address.id, contact.id);
        Ok(address.into())
    }

    pub async fn list(&self, user: &User, contact_id: i64) -> Result<Vec<AddressResponse>, ApiError> {
        let contact = check_contact_must_exist(&self.pool, &user.username, contact_id).await?;

        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {} FROM addresses WHERE contact_id = $1 ORDER BY id ASC",
            ADDRESS_COLUMNS
        ))
        .bind(contact.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    async fn check_address_must_exist(&self, contact_id: i64, address_id: i64) -> Result<Address, ApiError> {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {} FROM addresses WHERE id = $1 AND contact_id = $2",
            ADDRESS_COLUMNS
        ))
        .bind(address_id)
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(address_not_found)
    }
}

fn address_not_found() -> ApiError {
    ApiError::not_found("address not found")
}
