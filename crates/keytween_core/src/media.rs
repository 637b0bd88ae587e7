//! Media source types for multimodal content.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where media content is sourced from.
///
/// # Examples
///
/// ```
/// use keytween_core::MediaSource;
///
/// let url = MediaSource::Url("https://example.com/image.png".to_string());
/// let base64 = MediaSource::Base64("iVBORw0KGgo...".to_string());
/// let binary = MediaSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Base64-encoded content
    Base64(String),
    /// Raw binary data
    Binary(Vec<u8>),
}

/// Guess an image MIME type from a file extension.
///
/// Unknown or missing extensions fall back to `image/png`, which is what the
/// keyframes are assumed to be when nothing better is known.
///
/// # Examples
///
/// ```
/// use keytween_core::mime_from_extension;
/// use std::path::Path;
///
/// assert_eq!(mime_from_extension(Path::new("a/start.JPG")), "image/jpeg");
/// assert_eq!(mime_from_extension(Path::new("middle.webp")), "image/webp");
/// assert_eq!(mime_from_extension(Path::new("end")), "image/png");
/// ```
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}
