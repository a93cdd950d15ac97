//! Request and response shapes exchanged over HTTP.

pub mod address;
pub mod contact;
pub mod page;
pub mod user;

pub use address::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
pub use contact::{ContactResponse, CreateContactRequest, SearchContactQuery, SearchContactRequest, UpdateContactRequest};
pub use page::{Pageable, Paging};
pub use user::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};
