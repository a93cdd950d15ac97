pub mod address;
pub mod contact;
pub mod user;

pub use address::Address;
pub use contact::Contact;
pub use user::User;
