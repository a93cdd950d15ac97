use sqlx::PgPool;
use tracing::info;

use crate::api::{
    ContactResponse, CreateContactRequest, Pageable, Paging, SearchContactRequest, UpdateContactRequest,
};
use crate::database::models::{Contact, User};
use crate::database::QueryBuilder;
use crate::error::ApiError;
use crate::filter::{FilterWhere, SortDirection};
use crate::state::AppState;
use crate::validation::validate;

const CONTACT_COLUMNS: &str = "id, username, first_name, last_name, email, phone";

pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool().clone(),
        }
    }

    pub async fn create(&self, user: &User, request: CreateContactRequest) -> Result<ContactResponse, ApiError> {
        let request = validate(request)?;

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts (username, first_name, last_name, email, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(&user.username)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .fetch_one(&self.pool)
        .await?;

        info!("User '{}' created contact {}", user.username, contact.id);
        Ok(contact.into())
    }

    pub async fn get(&self, user: &User, contact_id: i64) -> Result<ContactResponse, ApiError> {
        let contact = check_contact_must_exist(&self.pool, &user.username, contact_id).await?;
        Ok(contact.into())
    }

    /// Full replacement of the contact's fields
    pub async fn update(&self, user: &User, request: UpdateContactRequest) -> Result<ContactResponse, ApiError> {
        let request = validate(request)?;

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts
             SET first_name = $1, last_name = $2, email = $3, phone = $4
             WHERE id = $5 AND username = $6
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.id)
        .bind(&user.username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(contact_not_found)?;

        Ok(contact.into())
    }

    /// Delete the contact and return what was removed; its addresses go with it
    pub async fn remove(&self, user: &User, contact_id: i64) -> Result<ContactResponse, ApiError> {
        check_contact_must_exist(&self.pool, &user.username, contact_id).await?;

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "DELETE FROM contacts WHERE id = $1 AND username = $2 RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(contact_id)
        .bind(&user.username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(contact_not_found)?;

        info!("User '{}' removed contact {}", user.username, contact.id);
        Ok(contact.into())
    }

    /// Owner-scoped search. Filters are ANDed together:
    /// `name` matches first or last name, `email` and `phone` match their column.
    pub async fn search(
        &self,
        user: &User,
        request: SearchContactRequest,
    ) -> Result<Pageable<ContactResponse>, ApiError> {
        let request = validate(request)?;

        let mut filter = FilterWhere::new().eq("username", user.username.as_str())?;
        if let Some(name) = &request.name {
            filter = filter.contains_any(&["first_name", "last_name"], name.as_str())?;
        }
        if let Some(email) = &request.email {
            filter = filter.contains("email", email.as_str())?;
        }
        if let Some(phone) = &request.phone {
            filter = filter.contains("phone", phone.as_str())?;
        }

        let query = QueryBuilder::<Contact>::new("contacts")?
            .filter(filter)
            .order_by("id", SortDirection::Asc)?
            .paginate(request.size, Paging::offset(request.page, request.size))?;

        let total = query.count(&self.pool).await?;
        let contacts = query.select_all(&self.pool).await?;

        Ok(Pageable {
            data: contacts.into_iter().map(ContactResponse::from).collect(),
            paging: Paging::new(request.page, request.size, total),
        })
    }
}

/// Load a contact owned by `username`. Someone else's contact is
/// indistinguishable from a missing one.
pub async fn check_contact_must_exist(pool: &PgPool, username: &str, contact_id: i64) -> Result<Contact, ApiError> {
    sqlx::query_as::<_, Contact>(&format!(
        "SELECT {} FROM contacts WHERE id = $1 AND username = $2",
        CONTACT_COLUMNS
    ))
    .bind(contact_id)
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or_else(contact_not_found)
}

fn contact_not_found() -> ApiError {
    ApiError::not_found("contact not found")
}
