//! Resolver error model and its mapping onto HTTP errors.

use std::fmt;

use folio_db::DbError;
use folio_http::error::AppError;
use thiserror::Error;

use crate::modules::authors::models::AuthorId;
use crate::utils::InvalidDateFormat;

pub type ResolverResult<T> = Result<T, ResolverError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Book,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Author => f.write_str("Author"),
            EntityKind::Book => f.write_str("Book"),
        }
    }
}

/// Failures surfaced by the author and book resolvers.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: EntityKind, id: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl ResolverError {
    pub fn not_found(entity: EntityKind, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Author ID is required")]
    AuthorIdRequired,

    #[error("Author not found with id: {0}")]
    UnknownAuthor(AuthorId),

    #[error("Invalid date format. Please use ISO format (yyyy-MM-ddTHH:mm:ss)")]
    InvalidDateFormat { field: &'static str, value: String },

    #[error("{field} is required")]
    RequiredField { field: &'static str },
}

impl ValidationError {
    pub fn invalid_date(field: &'static str, err: InvalidDateFormat) -> Self {
        Self::InvalidDateFormat {
            field,
            value: err.value,
        }
    }

    /// Reject blank mandatory text.
    pub fn require(field: &'static str, value: String) -> Result<String, Self> {
        if value.trim().is_empty() {
            Err(Self::RequiredField { field })
        } else {
            Ok(value)
        }
    }

    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::AuthorIdRequired | ValidationError::UnknownAuthor(_) => "authorId",
            ValidationError::InvalidDateFormat { field, .. }
            | ValidationError::RequiredField { field } => field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::AuthorIdRequired | ValidationError::RequiredField { .. } => "required",
            ValidationError::UnknownAuthor(_) => "unknown_reference",
            ValidationError::InvalidDateFormat { .. } => "invalid_format",
        }
    }
}

impl From<ResolverError> for AppError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::NotFound { .. } => AppError::not_found(err.to_string()),
            ResolverError::Validation(validation) => AppError::validation(
                vec![serde_json::json!({
                    "field": validation.field(),
                    "error": validation.code(),
                })],
                validation.to_string(),
            ),
            ResolverError::Storage(db) => AppError::Internal(anyhow::Error::new(db)),
        }
    }
}
