//! Store transport error types.

/// Failure reported by a content store that is not backed by diesel.
///
/// The Postgres store reports [`crate::LodgeErrorKind::Database`] instead;
/// this type covers in-memory and remote stores.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", message, line, file)]
pub struct StoreError {
    /// What the store reported
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl StoreError {
    /// Create a new StoreError with the given message at the current location.
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
