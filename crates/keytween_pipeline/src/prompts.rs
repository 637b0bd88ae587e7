//! Transition prompt generation.

use crate::{CompletionConfig, parse_prompt_list};
use keytween_core::{
    GenerateRequest, Input, MediaSource, Message, Prompt, Role, mime_from_extension,
};
use keytween_error::{BackendError, KeytweenError, KeytweenResult, ValidationError};
use keytween_interface::Vision;
use keytween_storage::FrameStore;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// System message sent with every prompt request.
pub const SYSTEM_INSTRUCTION: &str = "You generate concise DALL·E prompts describing a smooth \
visual transition between two images. Number the prompts starting at 1 and do not include \
additional commentary.";

/// Asks a multimodal completion backend to describe the in-between states
/// of a transition.
pub struct PromptGenerator<'a, D: Vision + ?Sized> {
    driver: &'a D,
    config: &'a CompletionConfig,
}

impl<'a, D: Vision + ?Sized> PromptGenerator<'a, D> {
    /// Creates a generator over `driver`.
    pub fn new(driver: &'a D, config: &'a CompletionConfig) -> Self {
        Self { driver, config }
    }

    /// Rejects a pair of images the driver cannot accept in one request.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the driver takes fewer than two images
    /// per request, or when either file's type is not one it supports.
    pub fn check_images(&self, from: &Path, to: &Path) -> KeytweenResult<()> {
        let max = self.driver.max_images_per_request();
        if max < 2 {
            return Err(ValidationError::new(format!(
                "{} accepts {} image(s) per request, a transition needs 2",
                self.driver.model_name(),
                max
            ))
            .into());
        }

        let supported = self.driver.supported_image_formats();
        for path in [from, to] {
            let mime = mime_from_extension(path);
            if !supported.contains(&mime) {
                return Err(ValidationError::new(format!(
                    "{} does not accept {} ({})",
                    self.driver.model_name(),
                    mime,
                    path.display()
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Builds the completion request for `count` prompts between two images.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `count` is zero or the images fail
    /// [`check_images`](Self::check_images).
    pub fn request(
        &self,
        from: &Path,
        from_bytes: Vec<u8>,
        to: &Path,
        to_bytes: Vec<u8>,
        count: u32,
    ) -> KeytweenResult<GenerateRequest> {
        if count == 0 {
            return Err(ValidationError::new("Frame count must be at least 1").into());
        }
        self.check_images(from, to)?;

        let instruction = format!(
            "Create {} intermediate image descriptions for DALL·E 3 that morph the first \
             image into the second. Reply with one numbered prompt per line.",
            count
        );

        let image = |path: &Path, bytes: Vec<u8>| Input::Image {
            mime: Some(mime_from_extension(path).to_string()),
            source: MediaSource::Binary(bytes),
        };

        let messages = vec![
            Message::new(Role::System, vec![Input::Text(SYSTEM_INSTRUCTION.to_string())]),
            Message::new(
                Role::User,
                vec![
                    Input::Text(instruction),
                    image(from, from_bytes),
                    image(to, to_bytes),
                ],
            ),
        ];

        GenerateRequest::builder()
            .messages(messages)
            .model(self.config.model().clone())
            .temperature(*self.config.temperature())
            .max_tokens(count.saturating_mul(*self.config.tokens_per_frame()))
            .build()
            .map_err(|e| {
                KeytweenError::from(BackendError::new(format!(
                    "Failed to build prompt request: {}",
                    e
                )))
            })
    }

    /// Generates prompts describing the transition from `from` to `to`.
    ///
    /// Returns whatever prompts survive parsing. A count other than `count`
    /// is logged, not treated as an error.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `count` is zero or the driver cannot
    /// take these images, a storage error if an image cannot be read, or the
    /// driver's error unchanged.
    #[instrument(skip(self, from, to), fields(from = %from.display(), to = %to.display(), provider = self.driver.provider_name()))]
    pub async fn generate(&self, from: &Path, to: &Path, count: u32) -> KeytweenResult<Vec<Prompt>> {
        if count == 0 {
            return Err(ValidationError::new("Frame count must be at least 1").into());
        }
        self.check_images(from, to)?;

        let from_bytes = FrameStore::read_image(from).await?;
        let to_bytes = FrameStore::read_image(to).await?;
        let request = self.request(from, from_bytes, to, to_bytes, count)?;

        debug!("Requesting transition prompts");
        let response = self.driver.generate(&request).await?;
        let prompts = parse_prompt_list(&response.text());

        if prompts.len() != count as usize {
            warn!(
                expected = count,
                actual = prompts.len(),
                "Prompt count differs from the requested frame count"
            );
        }

        info!(count = prompts.len(), "Generated prompts");
        Ok(prompts)
    }
}
