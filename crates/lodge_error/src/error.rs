//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{
    ConfigError, EditorError, HttpError, JsonError, ServerError, StoreError, ValidationError,
};

/// Every error condition the Lodge workspace can surface.
///
/// # Examples
///
/// ```
/// use lodge_error::{LodgeError, LodgeErrorKind, HttpError};
///
/// let err: LodgeError = HttpError::new(500, "boom").into();
/// assert!(matches!(err.kind(), LodgeErrorKind::Http(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LodgeErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Block payload failed its schema
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Admin editor misuse
    #[from(EditorError)]
    Editor(EditorError),
    /// Store transport error
    #[from(StoreError)]
    Store(StoreError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Lodge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lodge_error::{LodgeResult, ConfigError};
///
/// fn might_fail() -> LodgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().unwrap_err().to_string().contains("Missing field"));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lodge Error: {}", _0)]
pub struct LodgeError(Box<LodgeErrorKind>);

impl LodgeError {
    /// Create a new error from a kind.
    pub fn new(kind: LodgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LodgeErrorKind {
        &self.0
    }

    /// The validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self.kind() {
            LodgeErrorKind::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// The editor failure, if this error is one.
    pub fn as_editor(&self) -> Option<&EditorError> {
        match self.kind() {
            LodgeErrorKind::Editor(err) => Some(err),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to LodgeErrorKind
impl<T> From<T> for LodgeError
where
    T: Into<LodgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lodge operations.
pub type LodgeResult<T> = std::result::Result<T, LodgeError>;
