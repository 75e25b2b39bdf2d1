//! Top-level error wrapper types.

use crate::{
    AuthError, BuilderError, ConfigError, RenderError, StorageError, TimeoutError,
    TransportError, ValidationError,
};

/// Every error condition the workspace can produce.
///
/// # Examples
///
/// ```
/// use storybook_error::{AuthError, StorybookError, StorybookErrorKind};
///
/// let err: StorybookError = AuthError::new("LEONARDO_API_KEY").into();
/// assert!(matches!(err.kind(), StorybookErrorKind::Auth(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorybookErrorKind {
    /// Unsafe or missing input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Missing credential
    #[from(AuthError)]
    Auth(AuthError),
    /// Network failure or non-success response
    #[from(TransportError)]
    Transport(TransportError),
    /// Polling exhausted its attempt budget
    #[from(TimeoutError)]
    Timeout(TimeoutError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Local content store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Document rendering error
    #[from(RenderError)]
    Render(RenderError),
}

/// Storybook error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storybook_error::{ConfigError, StorybookResult};
///
/// fn might_fail() -> StorybookResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storybook Error: {}", _0)]
pub struct StorybookError(Box<StorybookErrorKind>);

impl StorybookError {
    /// Create a new error from a kind.
    pub fn new(kind: StorybookErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorybookErrorKind {
        &self.0
    }

    /// Whether this error is a missing credential.
    pub fn is_auth(&self) -> bool {
        matches!(self.kind(), StorybookErrorKind::Auth(_))
    }

    /// Whether this error is an exhausted polling budget.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind(), StorybookErrorKind::Timeout(_))
    }
}

// Generic From implementation for any type that converts to StorybookErrorKind
impl<T> From<T> for StorybookError
where
    T: Into<StorybookErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storybook operations.
pub type StorybookResult<T> = std::result::Result<T, StorybookError>;
