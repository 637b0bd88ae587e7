//! Input validation errors.

/// A required run input is missing or out of range.
///
/// Validation errors are always raised before a run touches the filesystem
/// or the network.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// What was missing or invalid
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytween_error::ValidationError;
    ///
    /// let err = ValidationError::new("Please select all images and provide the API key.");
    /// assert!(err.to_string().contains("select all images"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
