//! OpenAI-compatible chat completion and image generation.

mod client;
mod conversion;
mod dto;
mod settings;

pub use client::{OpenAiClient, OpenAiFactory};
pub use conversion::{from_chat_response, to_chat_request, to_image_request};
pub use dto::{
    ChatChoice, ChatContent, ChatMessage, ChatMessageBuilder, ChatRequest, ChatRequestBuilder,
    ChatResponse, ChatResponseMessage, ChatRole, ContentPart, ImageDatum, ImageGenerationRequest,
    ImageGenerationRequestBuilder, ImageGenerationResponse, ImageUrl,
};
pub use settings::OpenAiSettings;
