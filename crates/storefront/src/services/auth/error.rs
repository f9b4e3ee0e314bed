//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during login, signup or logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential verifier refused the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The identity could not be persisted or cleared.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Any other failure inside the auth service.
    #[error("internal auth error: {0}")]
    Internal(String),
}
