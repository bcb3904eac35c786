//! HTTP error types.

/// HTTP error with status code and source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error ({}): {} at line {} in {}", status, message, line, file)]
pub struct HttpError {
    /// HTTP status code to answer with
    pub status: u16,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given status and message.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge_error::HttpError;
    ///
    /// let err = HttpError::new(404, "No such block");
    /// assert_eq!(err.status, 404);
    /// ```
    #[track_caller]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
