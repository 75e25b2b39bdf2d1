//! Transport error types for calls to external generation services.

/// Specific transport failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// The request could not be sent or the connection failed
    #[display("Request failed: {}", _0)]
    Request(String),
    /// The service answered with a non-success status
    #[display("Status {}: {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
    /// The response body could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// The response decoded but carried no usable content
    #[display("Empty response: {}", _0)]
    EmptyResponse(String),
}

/// Transport error with source location.
///
/// # Examples
///
/// ```
/// use storybook_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Status {
///     status: 503,
///     body: "unavailable".to_string(),
/// });
/// assert_eq!(err.status(), Some(503));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The specific failure
    pub kind: TransportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError at the current location.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status code, if the failure was a non-success response.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            TransportErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
