//! Generation provider integrations for Keytween.
//!
//! The pipeline needs two services from a provider: a multimodal chat
//! completion that can look at two keyframes, and an image generator. Both
//! are offered by the OpenAI API and by the many services that mirror its
//! wire format, so a single client covers them.
//!
//! # Example
//!
//! ```no_run
//! use keytween_core::{GenerateRequest, Input, Message, Role};
//! use keytween_interface::TweenDriver;
//! use keytween_models::OpenAiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(std::env::var("OPENAI_API_KEY")?);
//! let message = Message::new(Role::User, vec![Input::Text("Hello".to_string())]);
//! let request = GenerateRequest::new(vec![message]);
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatChoice, ChatContent, ChatMessage, ChatMessageBuilder, ChatRequest, ChatRequestBuilder,
    ChatResponse, ChatResponseMessage, ChatRole, ContentPart, ImageDatum, ImageGenerationRequest,
    ImageGenerationRequestBuilder, ImageGenerationResponse, ImageUrl, OpenAiClient,
    OpenAiFactory, OpenAiSettings, from_chat_response, to_chat_request, to_image_request,
};
