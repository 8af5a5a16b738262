//! Centralized error types for the service layer.

use crate::geometry::ParseError;
use crate::validation::{BatchValidationError, ValidationError};
use spatial_db::DbError;
use thiserror::Error;

/// Main error type for feature operations.
#[derive(Error, Debug)]
pub enum SpatialError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Batch(#[from] BatchValidationError),

    #[error("Feature not found: {0}")]
    NotFound(i64),

    #[error("Stored geometry of feature {id} is unreadable: {source}")]
    CorruptGeometry {
        id: i64,
        #[source]
        source: ParseError,
    },

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Result type for feature operations.
pub type SpatialResult<T> = Result<T, SpatialError>;

impl SpatialError {
    /// The request itself was wrong (bad name or WKT).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Batch(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Map a repository miss on `id` to [`SpatialError::NotFound`].
    pub(crate) fn not_found(id: i64) -> impl FnOnce(DbError) -> Self {
        move |e| match e {
            DbError::NotFound(_) => Self::NotFound(id),
            e => Self::Database(e),
        }
    }
}
