//! Input validation errors.

/// Reasons an input was rejected before any generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Input mentions a banned topic
    #[display("{} mentions banned topic '{}'", field, topic)]
    UnsafeInput {
        /// Name of the offending field
        field: String,
        /// First banned topic found
        topic: String,
    },
    /// Input is empty after trimming
    #[display("{} is required", _0)]
    MissingInput(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use storybook_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingInput("title".into()));
/// assert!(format!("{}", err).contains("title is required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The specific validation failure
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
