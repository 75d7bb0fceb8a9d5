//! User domain entities.

pub mod field;
pub mod filter;
pub mod model;

pub use field::UserField;
pub use filter::UserFilter;
pub use model::User;
