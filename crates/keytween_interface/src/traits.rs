//! Trait definitions for generation backends and their capabilities.

use async_trait::async_trait;
use keytween_core::{GenerateRequest, GenerateResponse, ImageRequest, Output};
use keytween_error::KeytweenResult;

/// Core trait for completion backends.
///
/// Implementations issue exactly one request per call and never retry; any
/// transport or service failure is returned to the caller unchanged.
#[async_trait]
pub trait TweenDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> KeytweenResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when the request does not name one.
    fn model_name(&self) -> &str;
}

/// Trait for completion backends that accept image inputs.
///
/// Prompt generation checks both keyframes against these limits before
/// reading or sending anything.
pub trait Vision: TweenDriver {
    /// Maximum number of images per request.
    fn max_images_per_request(&self) -> usize {
        2
    }

    /// Supported image formats (MIME types).
    fn supported_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg", "image/webp", "image/gif"]
    }
}

/// Trait for backends that synthesize images from text prompts.
#[async_trait]
pub trait ImageSynthesis: Send + Sync {
    /// Synthesize one image. The result is an [`Output::Image`].
    async fn synthesize(&self, req: &ImageRequest) -> KeytweenResult<Output>;

    /// Model identifier used when the request does not name one.
    fn image_model_name(&self) -> &str;
}

/// A backend offering both services a run needs.
pub trait TweenBackend: Vision + ImageSynthesis {}

impl<T> TweenBackend for T where T: Vision + ImageSynthesis {}

/// Creates a backend bound to the credentials supplied for one run.
///
/// Credentials are never stored by the factory itself; each run connects
/// with the key it was given.
pub trait BackendFactory: Send + Sync {
    /// Backend type produced by this factory.
    type Backend: TweenBackend;

    /// Bind `api_key` to a new backend.
    fn connect(&self, api_key: &str) -> KeytweenResult<Self::Backend>;
}
