//! Configuration error types.

/// Configuration error with source location.
///
/// Raised when configuration files cannot be read or parsed, and when a
/// required environment variable such as `LODGE_SERVICE_KEY` is missing.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge_error::ConfigError;
    ///
    /// let err = ConfigError::new("DATABASE_URL not set");
    /// assert!(err.message.contains("DATABASE_URL"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
