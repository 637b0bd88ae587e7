//! Image synthesis requests.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One image-synthesis call: a prompt plus optional provider overrides.
///
/// # Examples
///
/// ```
/// use keytween_core::ImageRequest;
///
/// let request = ImageRequest::new("A cat halfway to becoming a dog");
/// assert_eq!(request.prompt(), "A cat halfway to becoming a dog");
/// assert!(request.size().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Text prompt describing the image
    prompt: String,
    /// Model identifier (provider default when `None`)
    #[builder(default)]
    model: Option<String>,
    /// Output size such as `1024x1024` (provider default when `None`)
    #[builder(default)]
    size: Option<String>,
}

impl ImageRequest {
    /// Creates a request for `prompt` with provider defaults.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            size: None,
        }
    }

    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}
