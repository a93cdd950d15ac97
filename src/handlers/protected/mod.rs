// Protected handlers: the router puts the token middleware in front of these,
// so every handler can take `AuthUser`.
pub mod addresses;
pub mod contacts;
pub mod users;
