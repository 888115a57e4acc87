//! # Service Error Type
//!
//! Unified error type for [`Inventory`](crate::Inventory) operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CoreError ──────┐                                                      │
//! │  DbError ────────┼──► ServiceError ──► code() ──► ErrorCode             │
//! │  ConfigError ────┘                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups that find nothing are `Ok(None)` and a worn tool that declines a
//! borrow is a [`UseOutcome`](crate::UseOutcome); neither reaches this type.

use serde::Serialize;
use stockroom_core::CoreError;
use stockroom_db::DbError;

use crate::config::ConfigError;

/// Errors returned by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Machine-readable error category.
///
/// ## Serialization
/// ```json
/// "INSUFFICIENT_STOCK"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A write targeted a record that vanished
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Material consumption beyond the amount on hand
    InsufficientStock,

    /// Unknown item kind tag
    InvalidVariant,

    /// Operation not meaningful for this variant
    BusinessLogic,

    /// Storage failure or bad configuration
    DatabaseError,
}

impl ServiceError {
    /// Categorizes the error for callers that present it.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Core(err) => match err {
                CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                CoreError::InvalidVariant(_) => ErrorCode::InvalidVariant,
                CoreError::NotATool(_) | CoreError::NotAMaterial(_) => ErrorCode::BusinessLogic,
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            ServiceError::Db(err) => match err {
                DbError::NotFound { .. } => ErrorCode::NotFound,
                DbError::QueryFailed(msg) => {
                    tracing::error!("Database query failed: {}", msg);
                    ErrorCode::DatabaseError
                }
                _ => ErrorCode::DatabaseError,
            },
            ServiceError::Config(_) => ErrorCode::DatabaseError,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
