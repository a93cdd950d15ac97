// Public handlers: no session token required.
pub mod users;
