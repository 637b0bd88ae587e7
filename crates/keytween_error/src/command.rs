//! External process errors.

/// An external tool could not be launched or exited unsuccessfully.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command Error: `{}` {} at line {} in {}", program, message, line, file)]
pub struct CommandError {
    /// Program that was invoked
    pub program: String,
    /// Exit status or spawn failure, followed by captured stderr
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CommandError {
    /// Create a new CommandError for `program` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytween_error::CommandError;
    ///
    /// let err = CommandError::new("ffmpeg", "exited with status 1: unknown format");
    /// assert!(err.to_string().contains("`ffmpeg` exited with status 1"));
    /// ```
    #[track_caller]
    pub fn new(program: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            program: program.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
