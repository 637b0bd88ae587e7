//! Input types for completion requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input types to the completion model.
///
/// # Examples
///
/// ```
/// use keytween_core::{Input, MediaSource};
///
/// let text = Input::Text("Describe the transition".to_string());
///
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Base64("iVBORw0KGgo...".to_string()),
/// };
/// assert!(image.is_image());
/// assert!(!text.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, GIF).
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (URL, base64, or raw bytes)
        source: MediaSource,
    },
}

impl Input {
    /// Whether this input carries an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Input::Image { .. })
    }
}
