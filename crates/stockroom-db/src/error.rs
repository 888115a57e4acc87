//! # Storage Errors
//!
//! ```text
//! sqlx::Error ─────────────┐
//! MigrateError ────────────┼──► DbError ──► ServiceError (stockroom-service)
//! stored row won't decode ─┘
//! ```

use thiserror::Error;

/// Failures from the SQLite layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// A `save` found no row with the item's id.
    ///
    /// Lookups never produce this; they return `Ok(None)`.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The pool could not open or has been closed.
    #[error("Cannot connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement (constraint text kept).
    #[error("Statement rejected: {0}")]
    QueryFailed(String),

    /// A stored row could not be turned back into a domain record.
    ///
    /// ## When This Occurs
    /// - Tool row without usage or condition
    /// - Borrower log column is not a JSON string array
    /// - Negative quantity that does not fit the domain type
    #[error("Corrupt {entity} row {id}: {reason}")]
    Corrupt {
        entity: &'static str,
        id: String,
        reason: String,
    },

    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    #[error("Database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn corrupt(entity: &'static str, id: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::Corrupt {
            entity,
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// ```text
/// Database(e)        → QueryFailed
/// ColumnDecode       → Corrupt (row id unknown at this level)
/// PoolTimedOut       → PoolExhausted
/// PoolClosed, Io     → ConnectionFailed
/// anything else      → Internal
/// ```
///
/// `RowNotFound` never occurs: every lookup uses `fetch_optional`.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) => DbError::QueryFailed(e.message().to_string()),
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::corrupt("row", "?", format!("column {index}: {source}"))
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// The borrower log column failed to serialize.
impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Internal(format!("borrower log encoding: {err}"))
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DbError::not_found("Item", "abc").to_string(),
            "Item not found: abc"
        );
        assert_eq!(
            DbError::corrupt("Item", "abc", "tool without condition").to_string(),
            "Corrupt Item row abc: tool without condition"
        );
    }

    #[test]
    fn test_sqlx_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }
}
