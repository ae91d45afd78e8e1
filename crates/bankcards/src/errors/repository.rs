use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: i64, requested: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Custom(String),
}

impl RepositoryError {
    /// Maps a database error to `AlreadyExists` when it is a unique
    /// violation (SQLSTATE 23505), otherwise wraps it unchanged.
    pub fn from_unique(e: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(db) = &e
            && db.code().as_deref() == Some("23505")
        {
            return RepositoryError::AlreadyExists(what.to_string());
        }
        RepositoryError::Sqlx(e)
    }

    /// Serialization failures and deadlocks are safe to retry once the
    /// transaction has rolled back.
    pub fn is_retryable(e: &sqlx::Error) -> bool {
        if let sqlx::Error::Database(db) = e {
            matches!(db.code().as_deref(), Some("40001") | Some("40P01"))
        } else {
            false
        }
    }
}
