//! Input validation for features.

use crate::feature::model::FeatureInput;
use crate::geometry::{self, Geometry, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest accepted feature name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Why a single feature was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name can't be empty")]
    EmptyName,

    #[error("Name is too long: {len} characters (max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Name can't contain control characters")]
    ControlCharacter,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] ParseError),
}

/// Check a name on its own.
///
/// Control characters are refused: SQLite's `length()` stops at a NUL, so
/// such names would disagree with the table's length check.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate a name and WKT pair, returning the parsed geometry.
pub fn validate(name: &str, wkt: &str) -> Result<Geometry, ValidationError> {
    validate_name(name)?;
    Ok(geometry::parse(wkt)?)
}

/// One rejected item of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} '{}': {}", self.index, self.name, self.reason)
    }
}

/// Every failure of a rejected batch.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Number of features that couldn't pass validation: {}", .failures.len())]
pub struct BatchValidationError {
    pub failures: Vec<ItemFailure>,
}

/// Validate every item independently.
///
/// Succeeds with the parsed geometries, in input order, only when all items
/// pass. Otherwise every failing item is reported with its position.
pub fn validate_batch(items: &[FeatureInput]) -> Result<Vec<Geometry>, BatchValidationError> {
    let mut geometries = Vec::with_capacity(items.len());
    let mut failures = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate(&item.name, &item.wkt) {
            Ok(geometry) => geometries.push(geometry),
            Err(e) => failures.push(ItemFailure {
                index,
                name: item.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if failures.is_empty() {
        Ok(geometries)
    } else {
        Err(BatchValidationError { failures })
    }
}
