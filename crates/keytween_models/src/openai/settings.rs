//! Endpoint and model selection for the OpenAI client.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Endpoints and default models used by [`OpenAiClient`](crate::OpenAiClient).
///
/// # Examples
///
/// ```
/// use keytween_models::OpenAiSettings;
///
/// let settings = OpenAiSettings::default().with_image_size("1792x1024");
/// assert_eq!(settings.chat_model(), "gpt-4o");
/// assert_eq!(settings.image_size(), "1792x1024");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct OpenAiSettings {
    /// Chat completions endpoint
    #[serde(default = "default_chat_endpoint")]
    chat_endpoint: String,

    /// Image generation endpoint
    #[serde(default = "default_images_endpoint")]
    images_endpoint: String,

    /// Default completion model
    #[serde(default = "default_chat_model")]
    chat_model: String,

    /// Default image model
    #[serde(default = "default_image_model")]
    image_model: String,

    /// Default image size
    #[serde(default = "default_image_size")]
    image_size: String,

    /// `b64_json` to receive image bytes inline, `url` to download them
    #[serde(default = "default_response_format")]
    response_format: String,
}

fn default_chat_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_images_endpoint() -> String {
    "https://api.openai.com/v1/images/generations".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_response_format() -> String {
    "b64_json".to_string()
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            chat_endpoint: default_chat_endpoint(),
            images_endpoint: default_images_endpoint(),
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            response_format: default_response_format(),
        }
    }
}
