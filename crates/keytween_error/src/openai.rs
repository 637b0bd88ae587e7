//! OpenAI-compatible provider error types.

/// OpenAI-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum OpenAiErrorKind {
    /// Transport failure before a response arrived
    #[display("Request failed: {}", _0)]
    Http(String),
    /// The API answered with a non-success status
    #[display("API error {}: {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The response body could not be parsed
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// A request could not be converted to the wire format
    #[display("Conversion error: {}", _0)]
    Conversion(String),
    /// Base64 image payload could not be decoded
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Builder failure while assembling a DTO
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// OpenAI error with location tracking.
///
/// # Examples
///
/// ```
/// use keytween_error::{OpenAiError, OpenAiErrorKind};
///
/// let err = OpenAiError::new(OpenAiErrorKind::ApiError {
///     status: 401,
///     message: "Incorrect API key provided".to_string(),
/// });
/// assert!(err.to_string().contains("API error 401"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("OpenAI Error: {} at line {} in {}", kind, line, file)]
pub struct OpenAiError {
    /// The specific error kind
    pub kind: OpenAiErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl OpenAiError {
    /// Create a new OpenAI error.
    #[track_caller]
    pub fn new(kind: OpenAiErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<OpenAiErrorKind> for OpenAiError {
    #[track_caller]
    fn from(kind: OpenAiErrorKind) -> Self {
        Self::new(kind)
    }
}
