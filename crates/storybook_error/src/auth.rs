//! Credential errors.

/// A required credential is absent from the environment.
///
/// # Examples
///
/// ```
/// use storybook_error::AuthError;
///
/// let err = AuthError::new("OPENAI_API_KEY");
/// assert!(format!("{}", err).contains("OPENAI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: credential {} is not set at line {} in {}", credential, line, file)]
pub struct AuthError {
    /// Name of the missing credential (usually an environment variable)
    pub credential: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError for the named credential.
    #[track_caller]
    pub fn new(credential: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            credential: credential.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
