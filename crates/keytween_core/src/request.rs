//! Request and response types for completion calls.

use crate::{Message, Output};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Generic completion request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use keytween_core::{GenerateRequest, Input, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::new(Role::User, vec![Input::Text("Hello!".to_string())])])
///     .max_tokens(Some(100))
///     .temperature(Some(0.7))
///     .model(Some("gpt-4o".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.max_tokens(), Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder, Getters,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Model identifier to use (provider default when `None`)
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a request with the given messages and provider defaults.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use keytween_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::new(vec![
///     Output::Text("1. A cat".to_string()),
///     Output::Text("2. A dog".to_string()),
/// ]);
///
/// assert_eq!(response.text(), "1. A cat\n2. A dog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateResponse {
    /// The generated outputs from the model
    outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Creates a response from its outputs.
    pub fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }

    /// Creates a new builder for `GenerateResponse`.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// All text outputs joined by newlines.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
