//! Business logic between the routes and the stores.

pub mod credential;
pub mod sanitize;

pub use credential::Credential;
pub use sanitize::ValidationError;
