//! Error taxonomy for the collaborator seam.

use thiserror::Error;

/// Any failure to read or write workspace, membership or lead data -
/// transport, auth, or policy denial. The only error kind that crosses
/// the `WorkspaceDirectory` boundary. Scoring never errors.
#[derive(Error, Debug)]
pub enum DataAccessError {
    /// Backend unreachable or the query itself failed.
    #[error("data access failed: {0}")]
    Unavailable(String),

    /// Row-level policy or auth denied the operation.
    #[error("access denied: {0}")]
    Denied(String),

    /// Referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness or referential constraint violated (e.g. slug collision).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DataAccessError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn denied(msg: impl Into<String>) -> Self {
        Self::Denied(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
