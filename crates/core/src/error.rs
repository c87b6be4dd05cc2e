//! Error types for the compatibility layer
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Taxonomy
//!
//! - `InvalidRequest` / `InvalidArgument`: the caller asked for something the
//!   read model cannot express (empty filter set, malformed column selector)
//! - `OperationTimeout`: a long-running operation did not finish within the
//!   poll retry budget
//! - `QueryFailed`: the external status query failed; the poller hands this
//!   back untouched
//! - `Unsupported`: legacy API surface with no counterpart in the service

use thiserror::Error;

/// Result type alias for compatibility-layer operations
pub type CompatResult<T> = std::result::Result<T, CompatError>;

/// Error types for the compatibility layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatError {
    /// Request carries nothing the service can act on, or mixes
    /// mutually exclusive options
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A single argument is malformed (column selector, timestamp, count)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Poll retry budget exhausted before the operation reported done
    #[error("Operation {operation_id} did not complete after {attempts} status queries")]
    OperationTimeout {
        /// Identifier of the operation being polled
        operation_id: u64,
        /// Number of status queries issued before giving up
        attempts: u32,
    },

    /// The handle was already observed as complete
    #[error("Operation {operation_id} has already completed")]
    OperationAlreadyComplete {
        /// Identifier of the completed operation
        operation_id: u64,
    },

    /// The status query collaborator failed
    #[error("Status query failed: {0}")]
    QueryFailed(String),

    /// A resource or operation name does not have the expected shape
    #[error("Invalid resource name: {0}")]
    InvalidResourceName(String),

    /// Legacy capability that the service cannot provide
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CompatError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        CompatError::InvalidRequest(reason.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        CompatError::InvalidArgument(reason.into())
    }

    /// Create a query failure error
    pub fn query_failed(reason: impl Into<String>) -> Self {
        CompatError::QueryFailed(reason.into())
    }

    /// Create an invalid resource name error
    pub fn invalid_resource_name(name: impl Into<String>) -> Self {
        CompatError::InvalidResourceName(name.into())
    }

    /// Create an unsupported capability error
    pub fn unsupported(reason: impl Into<String>) -> Self {
        CompatError::Unsupported(reason.into())
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        CompatError::Config(reason.into())
    }

    /// True for `OperationTimeout`
    pub fn is_timeout(&self) -> bool {
        matches!(self, CompatError::OperationTimeout { .. })
    }

    /// True for request/argument validation failures
    pub fn is_invalid(&self) -> bool {
        matches!(
            self,
            CompatError::InvalidRequest(_) | CompatError::InvalidArgument(_)
        )
    }
}
