use serde::{Deserialize, Serialize};

use crate::database::models::Contact;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateContactRequest {
    /// Taken from the path, never from the body
    #[serde(skip_deserializing)]
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Raw query string of `GET /api/contacts`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchContactQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: i64,
    pub size: i64,
    /// Upper bound for `size`, from configuration
    pub max_size: i64,
}

impl SearchContactQuery {
    /// Apply paging defaults; blank filters count as absent
    pub fn into_request(self, default_size: i64, max_size: i64) -> SearchContactRequest {
        SearchContactRequest {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            page: self.page.unwrap_or(1),
            size: self.size.unwrap_or(default_size),
            max_size,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}
