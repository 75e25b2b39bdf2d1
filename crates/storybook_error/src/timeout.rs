//! Polling timeout errors.

/// An asynchronous job did not produce a result within its attempt budget.
///
/// # Examples
///
/// ```
/// use storybook_error::TimeoutError;
///
/// let err = TimeoutError::new("image generation abc-123", 20);
/// assert_eq!(err.attempts, 20);
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Timeout Error: {} timed out after {} attempts at line {} in {}", operation, attempts, line, file)]
pub struct TimeoutError {
    /// Description of the operation that timed out
    pub operation: String,
    /// Number of attempts made before giving up
    pub attempts: u32,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TimeoutError {
    /// Create a new TimeoutError at the current location.
    #[track_caller]
    pub fn new(operation: impl Into<String>, attempts: u32) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            attempts,
            line: location.line(),
            file: location.file(),
        }
    }
}
