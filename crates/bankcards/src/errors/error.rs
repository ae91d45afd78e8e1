use crate::errors::{RepositoryError, ServiceError};
use serde::{Deserialize, Serialize};

/// Caller-facing error envelope. Internal failures (database, codec) are
/// flattened to a generic message so no detail leaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
        }
    }
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ErrorResponse::new("not_found", msg.clone()),
            ServiceError::Forbidden(msg) => ErrorResponse::new("forbidden", msg.clone()),
            ServiceError::BadRequest(msg) => ErrorResponse::new("bad_request", msg.clone()),
            ServiceError::InsufficientBalance(msg) => {
                ErrorResponse::new("insufficient_balance", msg.clone())
            }
            ServiceError::Validation(errors) => {
                ErrorResponse::new("bad_request", errors.join("; "))
            }
            ServiceError::Repo(RepositoryError::NotFound) => {
                ErrorResponse::new("not_found", "Not found")
            }
            ServiceError::Repo(RepositoryError::AlreadyExists(msg)) => {
                ErrorResponse::new("bad_request", msg.clone())
            }
            ServiceError::Repo(RepositoryError::InsufficientBalance { .. }) => {
                ErrorResponse::new("insufficient_balance", "Insufficient balance on source card")
            }
            ServiceError::Repo(RepositoryError::Conflict(msg)) => {
                ErrorResponse::new("conflict", msg.clone())
            }
            ServiceError::Codec(_) => ErrorResponse::new("internal_error", "Internal error"),
            ServiceError::Repo(_) | ServiceError::InternalServerError(_) => {
                ErrorResponse::new("internal_error", "Internal error")
            }
            ServiceError::Custom(msg) => ErrorResponse::new("error", msg.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::INSUFFICIENT_BALANCE;
    use crate::utils::CodecError;

    #[test]
    fn insufficient_balance_gets_its_own_status() {
        let err = ServiceError::InsufficientBalance(INSUFFICIENT_BALANCE.to_string());
        let response = ErrorResponse::from(&err);
        assert_eq!(response.status, "insufficient_balance");
        assert_eq!(response.message, INSUFFICIENT_BALANCE);
    }

    #[test]
    fn codec_detail_never_reaches_the_caller() {
        let err = ServiceError::Codec(CodecError::Decrypt);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.status, "internal_error");
        assert_eq!(response.message, "Internal error");
    }

    #[test]
    fn validation_messages_are_joined() {
        let err = ServiceError::Validation(vec![
            "amount: too large".to_string(),
            "description: too long".to_string(),
        ]);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.status, "bad_request");
        assert_eq!(response.message, "amount: too large; description: too long");
    }
}
