/// Record store error types
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure of a record store operation
///
/// A failed operation never leaves a partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Write payload carried a column outside the permitted set, or a
    /// permitted text column with a non-text value
    #[error("{reason}: {field}")]
    InvalidShape {
        /// Offending field name
        field: String,
        /// Human readable reason
        reason: &'static str,
    },

    /// No record matched the requested id
    #[error("User with ID {id} not found")]
    NotFound {
        /// Id exactly as the caller supplied it
        id: String,
    },
}

impl StoreError {
    /// Unknown column in a write payload
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            reason: "Invalid column names found",
        }
    }

    /// Permitted column holding a value of the wrong JSON type
    pub fn invalid_value(field: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            reason: "Invalid value for column",
        }
    }

    /// Missing record
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Error name reported to HTTP clients
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidShape { .. } => "InvalidShapeError",
            Self::NotFound { .. } => "NotFoundError",
        }
    }
}
