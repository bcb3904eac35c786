//! Error types for the HTTP server.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Listener could not bind
    #[display("Failed to bind {}: {}", addr, reason)]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying reason
        reason: String,
    },

    /// Server loop terminated with an error
    #[display("Server error: {}", _0)]
    Serve(String),

    /// Admin route called without a valid service key
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),

    /// Request body or parameters could not be used
    #[display("Bad request: {}", _0)]
    BadRequest(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
