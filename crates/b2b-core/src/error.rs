//! # Error Types
//!
//! Domain-specific error types for b2b-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  b2b-core errors (this file)                                           │
//! │  ├── CoreError        - Domain errors (missing order / customer)       │
//! │  └── ValidationError  - Input rejected at the ingestion boundary       │
//! │                                                                         │
//! │  order-report errors (app)                                             │
//! │  └── ConfigError      - Bad environment / CLI values                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (main) → stderr            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Errors Can Happen
//! Only at the edges. The pricing functions are total: they accept any
//! slice of items and never fail. Lookups return `Option`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order number not present in the order book.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Customer id not present in the customer list.
    ///
    /// ## When This Occurs
    /// - A report is requested for an unknown customer
    /// - An order references a customer missing from the book
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when ingested data doesn't meet the data-model
/// contract. They are raised before any totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate order id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A nested record failed; `context` names which one.
    #[error("{context}: {source}")]
    In {
        context: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wraps this error with the record it came from ("order ZAM-10241").
    pub fn within(self, context: impl Into<String>) -> Self {
        ValidationError::In {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, without context wrappers.
    pub fn root(&self) -> &ValidationError {
        match self {
            ValidationError::In { source, .. } => source.root(),
            other => other,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
