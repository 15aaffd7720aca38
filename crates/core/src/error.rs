//! Error types for catalog search
//!
//! Tokenization and criteria construction are total and never fail. Every
//! other stage reports failures through [`Error`]:
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `InvalidArgument` | Malformed page descriptor, unknown profile, missing lookup |
//! | `Conversion` | Entity to view projection |
//! | `Execution` | Index engine call failed or unavailable |
//! | `DeadlineExceeded` | Index engine call ran past the caller's deadline |
//! | `Config` | `catalog.toml` could not be read, parsed or validated |
//!
//! Conversion and execution failures propagate unmodified; nothing in the
//! pipeline turns them into empty or cached results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for catalog search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum Error {
    /// Malformed input (negative offset, zero limit, unknown profile, ...)
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// A raw entity could not be projected into the requested view
    #[error("conversion error for entity {entity}: {reason}")]
    Conversion {
        /// Identifier of the entity that failed to convert
        entity: String,
        /// Underlying shape mismatch
        reason: String,
    },

    /// The query executor failed
    #[error("execution error: {reason}")]
    Execution {
        /// Executor-provided failure description
        reason: String,
    },

    /// The query executor ran past the deadline supplied with the query
    #[error("deadline exceeded after {elapsed_micros}us")]
    DeadlineExceeded {
        /// Time spent before the executor gave up
        elapsed_micros: u64,
    },

    /// Configuration could not be loaded or failed validation
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong with the configuration
        reason: String,
    },
}

impl Error {
    /// Create an `InvalidArgument` error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a `Conversion` error for the given entity
    pub fn conversion(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Conversion {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Create an `Execution` error
    pub fn execution(reason: impl Into<String>) -> Self {
        Error::Execution {
            reason: reason.into(),
        }
    }

    /// Create a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// True when the failure happened inside the query executor
    pub fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            Error::Execution { .. } | Error::DeadlineExceeded { .. }
        )
    }
}
