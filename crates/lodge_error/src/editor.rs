//! Admin block editor error types.

/// Editor error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EditorErrorKind {
    /// Block id not present on the page being edited
    #[display("Block '{}' is not part of this page", _0)]
    UnknownBlock(String),
    /// Page id not present in the store
    #[display("Page '{}' does not exist", _0)]
    UnknownPage(String),
    /// Index outside the block list
    #[display("Index {} out of range for {} blocks", index, len)]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of blocks on the page
        len: usize,
    },
    /// Drop or cancel without a drag in progress
    #[display("No drag in progress")]
    NotDragging,
    /// Drag started while another drag was active
    #[display("A drag is already in progress")]
    AlreadyDragging,
    /// Publish requested for a block with no valid draft
    #[display("Block '{}' has nothing to publish", _0)]
    NothingToPublish(String),
}

/// Editor error with source location tracking.
///
/// # Examples
///
/// ```
/// use lodge_error::{EditorError, EditorErrorKind};
///
/// let err = EditorError::new(EditorErrorKind::NotDragging);
/// assert!(err.to_string().contains("No drag"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Editor Error: {} at line {} in {}", kind, line, file)]
pub struct EditorError {
    /// The kind of error that occurred
    pub kind: EditorErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl EditorError {
    /// Create a new EditorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EditorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
