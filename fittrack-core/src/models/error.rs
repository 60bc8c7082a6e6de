use thiserror::Error;

use super::Category;

/// Validation failures raised while building or decoding records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("value must be a finite number greater than 0, got {0}")]
    InvalidValue(f64),

    #[error("record is a {actual} record, not {expected}")]
    CategoryMismatch { expected: Category, actual: Category },

    #[error("invalid {category} unit: {unit}")]
    InvalidUnit { category: Category, unit: String },

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
