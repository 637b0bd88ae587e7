//! OpenAI API client.

use super::conversion::{from_chat_response, to_chat_request, to_image_request};
use super::dto::{ChatRequest, ChatResponse, ImageGenerationRequest, ImageGenerationResponse};
use super::settings::OpenAiSettings;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use keytween_core::{GenerateRequest, GenerateResponse, ImageRequest, Output};
use keytween_error::{KeytweenResult, OpenAiError, OpenAiErrorKind, ValidationError};
use keytween_interface::{BackendFactory, ImageSynthesis, TweenDriver, Vision};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, instrument};

/// OpenAI API client.
///
/// Holds the API key for the lifetime of one run. The key is sent as a
/// bearer token and never logged.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    settings: OpenAiSettings,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client with the default endpoints and models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_settings(api_key, OpenAiSettings::default())
    }

    /// Creates a client with explicit settings.
    pub fn with_settings(api_key: impl Into<String>, settings: OpenAiSettings) -> Self {
        debug!(chat_model = %settings.chat_model(), image_model = %settings.image_model(), "Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            settings,
        }
    }

    /// Endpoint and model settings.
    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    /// Sends a chat completion request.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, OpenAiError> {
        debug!(messages = request.messages().len(), "Sending chat completion request");
        let response: ChatResponse = self.post_json(self.settings.chat_endpoint(), request).await?;
        debug!(response_id = ?response.id(), choices = response.choices().len(), "Received chat completion");
        Ok(response)
    }

    /// Sends an image generation request.
    #[instrument(skip(self, request), fields(model = %request.model(), size = %request.size()))]
    pub async fn create_image(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse, OpenAiError> {
        debug!("Sending image generation request");
        self.post_json(self.settings.images_endpoint(), request).await
    }

    async fn post_json<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, OpenAiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                OpenAiError::new(OpenAiErrorKind::Http(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(OpenAiError::new(OpenAiErrorKind::ApiError {
                status: status.as_u16(),
                message: body,
            }));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            OpenAiError::new(OpenAiErrorKind::Parse(e.to_string()))
        })
    }

    /// Fetches image bytes returned by URL instead of inline.
    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> Result<Vec<u8>, OpenAiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OpenAiError::new(OpenAiErrorKind::Http(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OpenAiError::new(OpenAiErrorKind::ApiError { status, message }));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| OpenAiError::new(OpenAiErrorKind::Http(e.to_string())))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TweenDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = "openai"))]
    async fn generate(&self, req: &GenerateRequest) -> KeytweenResult<GenerateResponse> {
        let chat_request = to_chat_request(req, &self.settings)?;
        let chat_response = self.chat(&chat_request).await?;
        Ok(from_chat_response(&chat_response)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.settings.chat_model()
    }
}

impl Vision for OpenAiClient {}

#[async_trait]
impl ImageSynthesis for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = "openai", prompt_len = req.prompt().len()))]
    async fn synthesize(&self, req: &ImageRequest) -> KeytweenResult<Output> {
        let image_request = to_image_request(req, &self.settings)?;
        let response = self.create_image(&image_request).await?;

        let datum = response.data().first().ok_or_else(|| {
            OpenAiError::new(OpenAiErrorKind::Parse(
                "Image response contained no images".to_string(),
            ))
        })?;

        if let Some(revised) = datum.revised_prompt() {
            debug!(revised_prompt = %revised, "Provider revised the image prompt");
        }

        let data = match (datum.b64_json(), datum.url()) {
            (Some(encoded), _) => STANDARD
                .decode(encoded)
                .map_err(|e| OpenAiError::new(OpenAiErrorKind::Base64Decode(e.to_string())))?,
            (None, Some(url)) => self.download(url).await?,
            (None, None) => {
                return Err(OpenAiError::new(OpenAiErrorKind::Parse(
                    "Image response contained neither b64_json nor url".to_string(),
                ))
                .into());
            }
        };

        debug!(bytes = data.len(), "Received synthesized image");
        Ok(Output::Image {
            mime: Some("image/png".to_string()),
            data,
        })
    }

    fn image_model_name(&self) -> &str {
        self.settings.image_model()
    }
}

/// Builds an [`OpenAiClient`] for each run's API key.
#[derive(Debug, Clone, Default)]
pub struct OpenAiFactory {
    settings: OpenAiSettings,
}

impl OpenAiFactory {
    /// Creates a factory that hands `settings` to every client.
    pub fn new(settings: OpenAiSettings) -> Self {
        Self { settings }
    }
}

impl BackendFactory for OpenAiFactory {
    type Backend = OpenAiClient;

    fn connect(&self, api_key: &str) -> KeytweenResult<OpenAiClient> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ValidationError::new("An OpenAI API key is required").into());
        }
        Ok(OpenAiClient::with_settings(api_key, self.settings.clone()))
    }
}
