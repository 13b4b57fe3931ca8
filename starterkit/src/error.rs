//! Error types

/// Errors from a token storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The stored token could not be encoded or decoded.
    #[error("Token encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The backend itself failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The session has no token.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The refresher rejected the current token.
    #[error("Token refresh rejected: {0}")]
    RefreshRejected(String),

    /// Persisting or loading the token failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Creates a refresh rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::RefreshRejected(message.into())
    }
}
