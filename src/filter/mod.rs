pub mod types;
pub mod filter_where;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter_where::{escape_like, quote_identifier, FilterWhere};
