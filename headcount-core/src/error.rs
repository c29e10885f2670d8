//! Error types for headcount operations

use crate::SiteId;
use thiserror::Error;

/// Record store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached at call time (no configuration, pool
    /// exhausted, connection refused).
    #[error("Database connection failed: {reason}")]
    ConnectionFailure { reason: String },

    /// The store was reachable but the statement failed.
    #[error("Database query failed: {reason}")]
    QueryFailure { reason: String },

    #[error("Could not find record ID {id}")]
    NotFound { id: SiteId },
}

impl StoreError {
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::ConnectionFailure {
            reason: reason.into(),
        }
    }

    pub fn query(reason: impl Into<String>) -> Self {
        Self::QueryFailure {
            reason: reason.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid count value for {field}: '{value}' is not an integer")]
    InvalidInteger { field: String, value: String },

    #[error("Invalid count value for {field}: {value} is negative")]
    NegativeCount { field: String, value: i64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// TESTS
// =============================================================================
