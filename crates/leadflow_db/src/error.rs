//! Error types for the database layer.

use leadflow_core::DataAccessError;
use thiserror::Error;

/// Database operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error (connection, query, etc.)
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// IO error (file system operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Constraint violation (unique, foreign key, etc.)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Stored data failed to decode into a domain value
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DbError {
    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a constraint error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Create an invalid state error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

/// True when the underlying driver reported a unique-index violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl From<DbError> for DataAccessError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => DataAccessError::NotFound(msg),
            DbError::Constraint(msg) => DataAccessError::Conflict(msg),
            DbError::Sqlx(ref inner) if is_unique_violation(inner) => {
                DataAccessError::Conflict(err.to_string())
            }
            other => DataAccessError::Unavailable(other.to_string()),
        }
    }
}
