//! Type conversions between Keytween and OpenAI wire types.

use super::dto::{
    ChatContent, ChatMessage, ChatRequest, ChatResponse, ChatRole, ContentPart,
    ImageGenerationRequest, ImageUrl,
};
use super::settings::OpenAiSettings;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use keytween_core::{
    GenerateRequest, GenerateResponse, ImageRequest, Input, MediaSource, Message, Output, Role,
};
use keytween_error::{OpenAiError, OpenAiErrorKind};

/// Converts a Keytween request to an OpenAI chat completion request.
///
/// Text-only messages are sent as plain strings; messages carrying images
/// are sent as ordered content parts with images inlined as `data:` URLs.
pub fn to_chat_request(
    request: &GenerateRequest,
    settings: &OpenAiSettings,
) -> Result<ChatRequest, OpenAiError> {
    if request.messages().is_empty() {
        return Err(OpenAiError::new(OpenAiErrorKind::Conversion(
            "Request must contain at least one message".to_string(),
        )));
    }

    let messages = request
        .messages()
        .iter()
        .map(to_chat_message)
        .collect::<Result<Vec<_>, _>>()?;

    let model = request
        .model()
        .clone()
        .unwrap_or_else(|| settings.chat_model().clone());

    ChatRequest::builder()
        .model(model)
        .messages(messages)
        .temperature(*request.temperature())
        .max_tokens(*request.max_tokens())
        .build()
        .map_err(|e| OpenAiError::new(OpenAiErrorKind::Builder(e.to_string())))
}

fn to_chat_message(message: &Message) -> Result<ChatMessage, OpenAiError> {
    let role = match message.role() {
        Role::System => ChatRole::System,
        Role::User => ChatRole::User,
        Role::Assistant => ChatRole::Assistant,
    };

    let content = if message.content().iter().any(Input::is_image) {
        ChatContent::Parts(message.content().iter().map(to_content_part).collect())
    } else {
        let text = message
            .content()
            .iter()
            .filter_map(|input| match input {
                Input::Text(text) => Some(text.as_str()),
                Input::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        ChatContent::Text(text)
    };

    ChatMessage::builder()
        .role(role)
        .content(content)
        .build()
        .map_err(|e| OpenAiError::new(OpenAiErrorKind::Builder(e.to_string())))
}

fn to_content_part(input: &Input) -> ContentPart {
    match input {
        Input::Text(text) => ContentPart::Text { text: text.clone() },
        Input::Image { mime, source } => {
            let mime = mime.as_deref().unwrap_or("image/png");
            let url = match source {
                MediaSource::Url(url) => url.clone(),
                MediaSource::Base64(data) => format!("data:{};base64,{}", mime, data),
                MediaSource::Binary(bytes) => {
                    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
                }
            };
            ContentPart::ImageUrl {
                image_url: ImageUrl { url },
            }
        }
    }
}

/// Converts an OpenAI chat completion response to a Keytween response.
///
/// Only the first choice is used. A response without choices or without
/// message text is reported as a parse failure.
pub fn from_chat_response(response: &ChatResponse) -> Result<GenerateResponse, OpenAiError> {
    let choice = response.choices().first().ok_or_else(|| {
        OpenAiError::new(OpenAiErrorKind::Parse(
            "Completion response contained no choices".to_string(),
        ))
    })?;

    let text = choice.message().content().clone().ok_or_else(|| {
        OpenAiError::new(OpenAiErrorKind::Parse(format!(
            "Completion choice contained no text (finish reason: {})",
            choice.finish_reason().as_deref().unwrap_or("unknown")
        )))
    })?;

    Ok(GenerateResponse::new(vec![Output::Text(text)]))
}

/// Converts a Keytween image request to an OpenAI image generation request.
pub fn to_image_request(
    request: &ImageRequest,
    settings: &OpenAiSettings,
) -> Result<ImageGenerationRequest, OpenAiError> {
    ImageGenerationRequest::builder()
        .model(
            request
                .model()
                .clone()
                .unwrap_or_else(|| settings.image_model().clone()),
        )
        .prompt(request.prompt().clone())
        .size(
            request
                .size()
                .clone()
                .unwrap_or_else(|| settings.image_size().clone()),
        )
        .response_format(settings.response_format().clone())
        .build()
        .map_err(|e| OpenAiError::new(OpenAiErrorKind::Builder(e.to_string())))
}
