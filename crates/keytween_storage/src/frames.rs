//! Frame file writes.

use crate::OutputLayout;
use keytween_core::{Frame, FrameOrigin};
use keytween_error::{KeytweenResult, StorageError, StorageErrorKind};
use std::path::Path;

/// Writes numbered frame files into an output bundle.
///
/// The store never picks indices itself; callers pass the running index so
/// that the sequence stays gap-free across keyframes and synthesized batches.
#[derive(Debug, Clone)]
pub struct FrameStore {
    layout: OutputLayout,
}

impl FrameStore {
    /// Creates the bundle directories (idempotently) and returns a store.
    ///
    /// # Errors
    ///
    /// Returns error if the directories cannot be created.
    #[tracing::instrument(skip(layout), fields(frames_dir = %layout.frames_dir().display()))]
    pub async fn create(layout: OutputLayout) -> KeytweenResult<Self> {
        tokio::fs::create_dir_all(layout.frames_dir())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    layout.frames_dir().display(),
                    e
                )))
            })?;

        tracing::debug!("Output directories ready");
        Ok(Self { layout })
    }

    /// The bundle layout.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Copies a user keyframe into the bundle at `index`.
    #[tracing::instrument(skip(self, source), fields(source = %source.display()))]
    pub async fn copy_keyframe(&self, source: &Path, index: usize) -> KeytweenResult<Frame> {
        let target = self.layout.frame_path(index);

        tokio::fs::copy(source, &target).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileCopy(format!(
                "{} -> {}: {}",
                source.display(),
                target.display(),
                e
            )))
        })?;

        tracing::debug!(target = %target.display(), "Copied keyframe");
        Ok(Frame::new(index, target, FrameOrigin::Keyframe))
    }

    /// Writes synthesized image bytes as the frame at `index`.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn write_frame(&self, index: usize, data: &[u8]) -> KeytweenResult<Frame> {
        let target = self.layout.frame_path(index);

        tokio::fs::write(&target, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                target.display(),
                e
            )))
        })?;

        tracing::debug!(target = %target.display(), "Wrote frame");
        Ok(Frame::new(index, target, FrameOrigin::Synthesized))
    }

    /// Reads an input image for transmission.
    pub async fn read_image(path: &Path) -> KeytweenResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }
}
