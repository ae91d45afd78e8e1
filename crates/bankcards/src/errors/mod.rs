mod error;
mod messages;
mod repository;
mod service;
mod validate;

pub use self::error::ErrorResponse;
pub use self::messages::*;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
pub use self::validate::format_validation_errors;
