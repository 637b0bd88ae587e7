//! Frame synthesis from prompts.

use keytween_core::{Frame, ImageRequest, Output, Prompt};
use keytween_error::{BackendError, KeytweenResult};
use keytween_interface::ImageSynthesis;
use keytween_storage::FrameStore;
use tracing::{debug, instrument};

/// Renders one frame per prompt into a [`FrameStore`].
pub struct ImageSynthesizer<'a, S: ImageSynthesis + ?Sized> {
    backend: &'a S,
    store: &'a FrameStore,
}

impl<'a, S: ImageSynthesis + ?Sized> ImageSynthesizer<'a, S> {
    /// Creates a synthesizer writing into `store`.
    pub fn new(backend: &'a S, store: &'a FrameStore) -> Self {
        Self { backend, store }
    }

    /// Synthesizes `prompts` in order, numbering frames from `start_index`.
    ///
    /// The first failure aborts the batch; frames already written stay on disk.
    #[instrument(skip(self, prompts), fields(prompts = prompts.len(), model = self.backend.image_model_name()))]
    pub async fn synthesize(
        &self,
        prompts: &[Prompt],
        start_index: usize,
    ) -> KeytweenResult<Vec<Frame>> {
        let mut frames = Vec::with_capacity(prompts.len());

        for (offset, prompt) in prompts.iter().enumerate() {
            let index = start_index + offset;
            debug!(index, prompt = %prompt, "Synthesizing frame");

            let output = self.backend.synthesize(&ImageRequest::new(prompt.as_str())).await?;
            let data = match output {
                Output::Image { data, .. } => data,
                Output::Text(_) => {
                    return Err(BackendError::new(format!(
                        "Image backend returned text instead of an image for frame {}",
                        index
                    ))
                    .into());
                }
            };

            frames.push(self.store.write_frame(index, &data).await?);
        }

        Ok(frames)
    }
}
