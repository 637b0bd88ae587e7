//! Top-level error wrapper types.

use crate::{
    BackendError, CommandError, ConfigError, MediaError, OpenAiError, StorageError,
    ValidationError,
};

/// Every failure a Keytween run can surface.
///
/// # Examples
///
/// ```
/// use keytween_error::{BackendError, KeytweenError};
///
/// let backend_err = BackendError::new("Response carried no image");
/// let err: KeytweenError = backend_err.into();
/// assert!(format!("{}", err).contains("Backend Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum KeytweenErrorKind {
    /// Missing or invalid run input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Unusable provider response
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Output bundle I/O error
    #[from(StorageError)]
    Storage(StorageError),
    /// OpenAI-compatible provider error
    #[from(OpenAiError)]
    OpenAi(OpenAiError),
    /// Animation or video assembly error
    #[from(MediaError)]
    Media(MediaError),
    /// External tool failure
    #[from(CommandError)]
    Command(CommandError),
}

/// Keytween error with kind discrimination.
///
/// # Examples
///
/// ```
/// use keytween_error::{KeytweenErrorKind, KeytweenResult, ValidationError};
///
/// fn might_fail() -> KeytweenResult<()> {
///     Err(ValidationError::new("Missing start keyframe"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(err.is_validation());
/// assert!(matches!(err.kind(), KeytweenErrorKind::Validation(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Keytween Error: {}", _0)]
pub struct KeytweenError(Box<KeytweenErrorKind>);

impl KeytweenError {
    /// Create a new error from a kind.
    pub fn new(kind: KeytweenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &KeytweenErrorKind {
        &self.0
    }

    /// Whether this error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), KeytweenErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to KeytweenErrorKind
impl<T> From<T> for KeytweenError
where
    T: Into<KeytweenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Keytween operations.
pub type KeytweenResult<T> = std::result::Result<T, KeytweenError>;
