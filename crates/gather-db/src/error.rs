use std::time::Duration;

use rusqlite::ErrorCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// The targeted row does not exist (lookup miss, or zero rows affected).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// The unit of work ran past its deadline and was interrupted.
    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to {op}: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database connection unavailable: {0}")]
    Unavailable(String),
}

impl DbError {
    /// Wraps a rusqlite error with the operation it came from.
    pub(crate) fn query(op: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| DbError::Query { op, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DbError::Timeout(_))
    }

    /// SQLite reports a deadline hit as an interrupt, and lock waits that
    /// outlive `busy_timeout` as busy/locked.
    pub(crate) fn is_interrupted(&self) -> bool {
        match self {
            DbError::Query {
                source: rusqlite::Error::SqliteFailure(e, _),
                ..
            } => matches!(
                e.code,
                ErrorCode::OperationInterrupted | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

/// Single-row lookups: a missing row becomes `NotFound` instead of a query failure.
pub(crate) trait SingleRowExt<T> {
    fn single(self, entity: &'static str, op: &'static str) -> Result<T>;
}

impl<T> SingleRowExt<T> for std::result::Result<T, rusqlite::Error> {
    fn single(self, entity: &'static str, op: &'static str) -> Result<T> {
        match self {
            Ok(val) => Ok(val),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(DbError::NotFound { entity }),
            Err(source) => Err(DbError::Query { op, source }),
        }
    }
}

/// Targeted UPDATE/DELETE: zero rows affected is a not-found, never a silent success.
pub(crate) fn ensure_affected(affected: usize, entity: &'static str) -> Result<()> {
    if affected == 0 {
        return Err(DbError::NotFound { entity });
    }
    Ok(())
}
