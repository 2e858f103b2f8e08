//! Storage error model.

use thiserror::Error;

/// Result type used by the storage layer.
pub type DbResult<T> = Result<T, DbError>;

/// Failures raised by the storage layer itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DbError {
    /// A unique key constraint rejected the row.
    #[error("duplicate key value violates unique constraint \"{constraint}\": {value}")]
    UniqueViolation {
        constraint: &'static str,
        value: String,
    },

    /// A row referenced a parent row that does not exist.
    #[error("insert or update violates foreign key constraint \"{constraint}\": {value}")]
    ForeignKeyViolation {
        constraint: &'static str,
        value: String,
    },

    /// An update targeted a row that does not exist.
    #[error("no row with id {id} in table \"{table}\"")]
    MissingRow { table: &'static str, id: i64 },
}

impl DbError {
    pub fn unique_violation(constraint: &'static str, value: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint,
            value: value.into(),
        }
    }

    pub fn foreign_key_violation(constraint: &'static str, value: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            constraint,
            value: value.into(),
        }
    }

    pub fn missing_row(table: &'static str, id: i64) -> Self {
        Self::MissingRow { table, id }
    }
}
