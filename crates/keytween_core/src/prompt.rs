//! Tween prompt type.

use serde::{Deserialize, Serialize};

/// Text describing one intermediate visual state of a transition.
///
/// # Examples
///
/// ```
/// use keytween_core::Prompt;
///
/// let prompt = Prompt::from("A cat with floppy ears");
/// assert_eq!(prompt.as_str(), "A cat with floppy ears");
/// assert_eq!(prompt.to_string(), "A cat with floppy ears");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Wraps a prompt string.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
