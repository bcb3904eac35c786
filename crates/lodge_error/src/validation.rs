//! Block payload validation errors.

use serde::Serialize;
use std::fmt;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldError {
    /// Dotted path of the offending field (e.g. `link.href`, `bullets[2]`)
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure for a block payload, carrying every failing field.
///
/// A payload that fails validation must not be persisted.
///
/// # Examples
///
/// ```
/// use lodge_error::{FieldError, ValidationError};
///
/// let err = ValidationError::new(
///     "split-block",
///     vec![FieldError::new("description", "is required")],
/// );
/// assert!(err.has_field("description"));
/// assert!(err.to_string().contains("description: is required"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ValidationError {
    /// Block type whose schema was violated
    pub block_type: String,
    /// Every failing field, in schema order
    pub fields: Vec<FieldError>,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(block_type: impl Into<String>, fields: Vec<FieldError>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            block_type: block_type.into(),
            fields,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the given field is among the failures.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    /// Message for a specific field, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.message.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation Error ({}): ", self.block_type)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", field)?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
