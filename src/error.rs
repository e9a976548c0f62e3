use thiserror::Error;

use crate::model::Field;

/// Errors that can occur while driving a recipe form
///
/// Validation failures are not errors; they are reported through
/// [`crate::validation::ErrorMap`]. These are refused operations and
/// failures loading input or configuration.
#[derive(Error, Debug)]
pub enum FormError {
    /// A field name that the form does not know about
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Scalar edit attempted on a collection field
    #[error("Field '{0}' is a collection and cannot be edited as a single value")]
    NotScalar(Field),

    /// Row index past the end of a collection
    #[error("Index {index} is out of range for {field} (length {len})")]
    IndexOutOfRange {
        field: Field,
        index: usize,
        len: usize,
    },

    /// Attempt to remove the only remaining row of a collection
    #[error("Cannot remove the last entry from {0}")]
    LastRow(Field),

    /// Draft did not pass validation
    #[error("Recipe draft is invalid: {0}")]
    InvalidDraft(String),

    /// Failed to read or write JSON input
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
