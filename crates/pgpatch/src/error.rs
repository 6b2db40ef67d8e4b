//! Error types for pgpatch

use thiserror::Error;

/// Result type alias for pgpatch operations
pub type PatchResult<T> = Result<T, PatchError>;

/// Error types for building and running partial updates
#[derive(Debug, Error)]
pub enum PatchError {
    /// The caller supplied unusable input (e.g. no fields to update).
    ///
    /// HTTP layers should answer this with `400 Bad Request`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A column or table name cannot be rendered as a quoted identifier
    #[error("Validation error: {0}")]
    Validation(String),

    /// The UPDATE matched no row
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl PatchError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this error stems from the caller's input rather than the database
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Validation(_))
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for PatchError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_bad_request() {
        let err = PatchError::invalid_argument("No data");
        assert!(err.is_bad_request());
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: No data");
    }

    #[test]
    fn not_found_is_not_bad_request() {
        let err = PatchError::not_found("No user: alice");
        assert!(!err.is_bad_request());
        assert!(err.is_not_found());
    }
}
