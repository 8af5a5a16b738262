//! Uniform success / message / data wrapper returned to API callers.

use crate::error::{SpatialError, SpatialResult};
use crate::validation::ItemFailure;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Per-item failures of a rejected batch.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemFailure>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Vec::new(),
        }
    }

    /// Wrap a service result; `message` is used on success, the error's own
    /// text otherwise.
    pub fn from_result(result: SpatialResult<T>, message: impl Into<String>) -> Self {
        match result {
            Ok(data) => Self::ok(message, data),
            Err(SpatialError::Batch(batch)) => Self {
                success: false,
                message: batch.to_string(),
                data: None,
                errors: batch.failures,
            },
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
