//! Animation and video assembly errors.

/// Kinds of media errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Nothing to assemble
    #[display("No {} to assemble", _0)]
    EmptySequence(String),
    /// A frame could not be decoded
    #[display("Failed to decode frame: {}", _0)]
    Decode(String),
    /// The animation could not be encoded
    #[display("Failed to encode animation: {}", _0)]
    Encode(String),
    /// A blocking media task was cancelled or panicked
    #[display("Media task failed: {}", _0)]
    Task(String),
}

/// Media error with location tracking.
///
/// # Examples
///
/// ```
/// use keytween_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::EmptySequence("frames".to_string()));
/// assert!(err.to_string().contains("No frames to assemble"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
