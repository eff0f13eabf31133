// Copyright 2025 Cowboy AI, LLC.

//! Error types for mapping and repository operations

use thiserror::Error;

/// Errors that can occur while describing schemas, mapping records, or
/// executing repository operations
///
/// The taxonomy separates construction-time mistakes (configuration and
/// schema errors, surfaced before the first call) from per-call failures
/// (validation and decoding errors) and from failures owned by the executor
/// collaborator (transport errors, propagated unchanged and never retried
/// here).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Bad naming-convention pairing or another configuration mistake
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed key declaration, surfaced when the descriptor is built
    #[error("Schema error: {0}")]
    Schema(String),

    /// Caller supplied a wrong key arity or a null key field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Row is missing an expected column or holds the wrong value kind
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Failure reported by the executor collaborator
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        StoreError::Configuration(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        StoreError::Schema(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    /// Create a decoding error
    pub fn decoding(msg: impl Into<String>) -> Self {
        StoreError::Decoding(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        StoreError::Transport(msg.into())
    }

    /// Check if this error indicates a construction-time mistake
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StoreError::Configuration(_) | StoreError::Schema(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, StoreError::Schema(_))
    }

    /// Check if this is a decoding error
    pub fn is_decoding(&self) -> bool {
        matches!(self, StoreError::Decoding(_))
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error creation and display messages
    #[test]
    fn test_error_display_messages() {
        let err = StoreError::configuration("unsupported convention pairing");
        assert_eq!(
            err.to_string(),
            "Configuration error: unsupported convention pairing"
        );

        let err = StoreError::schema("no partition-key field declared");
        assert_eq!(
            err.to_string(),
            "Schema error: no partition-key field declared"
        );

        let err = StoreError::validation("expected 4 key values, got 2");
        assert_eq!(
            err.to_string(),
            "Validation error: expected 4 key values, got 2"
        );

        let err = StoreError::decoding("column last_name missing from row");
        assert_eq!(
            err.to_string(),
            "Decoding error: column last_name missing from row"
        );

        let err = StoreError::transport("connection reset by peer");
        assert_eq!(err.to_string(), "Transport error: connection reset by peer");
    }

    /// Test error cloning
    #[test]
    fn test_error_clone() {
        let original = StoreError::validation("test error");
        let cloned = original.clone();

        assert_eq!(original.to_string(), cloned.to_string());
    }

    /// Test helper predicates match only their own variants
    ///
    /// ```mermaid
    /// graph TD
    ///     A[Configuration] -->|is_fatal| B[true]
    ///     C[Schema] -->|is_fatal| D[true]
    ///     E[Validation] -->|is_fatal| F[false]
    ///     G[Transport] -->|is_fatal| H[false]
    /// ```
    #[test]
    fn test_helper_method_exclusivity() {
        let config_err = StoreError::configuration("bad pairing");
        assert!(config_err.is_fatal());
        assert!(!config_err.is_validation());
        assert!(!config_err.is_decoding());
        assert!(!config_err.is_transport());

        let schema_err = StoreError::schema("clustering position gap");
        assert!(schema_err.is_fatal());
        assert!(schema_err.is_schema());
        assert!(!schema_err.is_validation());

        let validation_err = StoreError::validation("null key field");
        assert!(!validation_err.is_fatal());
        assert!(validation_err.is_validation());

        let decoding_err = StoreError::decoding("missing column");
        assert!(!decoding_err.is_fatal());
        assert!(decoding_err.is_decoding());

        let transport_err = StoreError::transport("timeout");
        assert!(!transport_err.is_fatal());
        assert!(transport_err.is_transport());
    }

    /// Test StoreResult type alias
    #[test]
    fn test_store_result() {
        let success: StoreResult<i32> = Ok(42);
        assert!(success.is_ok());

        let error: StoreResult<i32> = Err(StoreError::validation("failed"));
        assert!(error.is_err());
        assert_eq!(
            error.err().unwrap().to_string(),
            "Validation error: failed"
        );
    }
}
