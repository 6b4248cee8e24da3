//! Tagged error kinds for the domain layer.
//!
//! Callers branch on the variant, never on message substrings. The REST
//! layer maps each variant to an HTTP status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No signed-in session. Raised synchronously, before any storage
    /// call is made.
    #[error("not authenticated: no active session")]
    NotAuthenticated,

    /// The requested row does not exist for the current user. A row
    /// owned by another user surfaces as this, never as a permission
    /// error.
    #[error("{what} not found")]
    NotFound { what: &'static str },

    /// Rejected input (empty title, out-of-range progress, bad date).
    #[error("{0}")]
    Validation(String),

    /// Anything the storage backend reports, message preserved.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(what: &'static str) -> Self {
        ServiceError::NotFound { what }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
