//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Variant rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  stockroom-service errors                                              │
//! │  └── ServiceError     - What callers see (with an ErrorCode)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError ← DbError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup that finds nothing is never an error here: repositories and the
//! service return `Option`. A tool that is too worn to lend is reported
//! through [`BorrowOutcome`](crate::item::BorrowOutcome), not through
//! this module.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough material on hand.
    ///
    /// ## When This Occurs
    /// ```text
    /// Material "Plywood" amount=5
    ///      │
    ///      ▼
    /// consume(3) → OK, amount=2
    ///      │
    ///      ▼
    /// consume(3) → InsufficientStock { available: 2, requested: 3 }
    ///              amount stays 2
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// Item creation asked for a kind other than `tool` or `material`.
    #[error("Invalid item kind '{0}': expected tool or material")]
    InvalidVariant(String),

    /// A tool-only operation was aimed at a material.
    #[error("{0} is not a tool and cannot be used")]
    NotATool(String),

    /// A material-only operation was aimed at a tool.
    #[error("{0} is not a material and cannot be consumed")]
    NotAMaterial(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field value rejected before anything is built or mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Absent, empty or whitespace only.
    #[error("{field} must not be empty")]
    Missing { field: String },

    #[error("{field} exceeds {max} characters")]
    TooLong { field: String, max: usize },

    /// Tool condition above 100.
    #[error("{field} {value} exceeds maximum {max}")]
    AboveMaximum { field: String, value: i64, max: i64 },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// A quantity of zero where at least one unit is needed.
    #[error("{field} must be at least 1")]
    Zero { field: String },

    #[error("unrecognized {field} '{value}'")]
    Unrecognized { field: String, value: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
