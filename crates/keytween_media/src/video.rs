//! First-last-frame video tweening and segment concatenation.

use crate::{CommandInvocation, CommandRunner};
use derive_getters::Getters;
use derive_setters::Setters;
use keytween_error::{KeytweenResult, StorageError, StorageErrorKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Environment variable naming the Wan2.1 checkout.
pub const WAN2_DIR_VAR: &str = "WAN2_DIR";
/// Environment variable naming the FLF2V model weights directory.
pub const FLF2V_MODEL_DIR_VAR: &str = "FLF2V_MODEL_DIR";

const CONCAT_LIST_NAME: &str = "segments.txt";

/// Locations of the external video tooling.
///
/// Read once at startup. The video stage runs only when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct VideoToolConfig {
    wan2_dir: Option<PathBuf>,
    flf2v_model_dir: Option<PathBuf>,
}

impl VideoToolConfig {
    /// Builds a config from explicit directories.
    pub fn new(wan2_dir: Option<PathBuf>, flf2v_model_dir: Option<PathBuf>) -> Self {
        Self {
            wan2_dir,
            flf2v_model_dir,
        }
    }

    /// A config with video disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Reads `WAN2_DIR` and `FLF2V_MODEL_DIR`. Empty values count as unset.
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        let config = Self::new(read(WAN2_DIR_VAR), read(FLF2V_MODEL_DIR_VAR));
        debug!(
            wan2_dir = ?config.wan2_dir,
            flf2v_model_dir = ?config.flf2v_model_dir,
            "Read video tool configuration"
        );
        config
    }

    /// Both directories, if the video stage is enabled.
    pub fn tools(&self) -> Option<VideoTools> {
        match (&self.wan2_dir, &self.flf2v_model_dir) {
            (Some(wan2_dir), Some(model_dir)) => Some(VideoTools {
                wan2_dir: wan2_dir.clone(),
                model_dir: model_dir.clone(),
            }),
            _ => None,
        }
    }

    /// Whether the video stage will run.
    pub fn is_enabled(&self) -> bool {
        self.tools().is_some()
    }
}

/// Resolved tool locations for an enabled video stage.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VideoTools {
    wan2_dir: PathBuf,
    model_dir: PathBuf,
}

/// Tunables for the video stage, loaded from the `[video]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct VideoSettings {
    /// Python interpreter used to run `generate.py`
    #[serde(default = "default_python")]
    python: String,
    /// ffmpeg binary used for concatenation
    #[serde(default = "default_ffmpeg")]
    ffmpeg: String,
    /// Wan2.1 task name
    #[serde(default = "default_task")]
    task: String,
    /// Output resolution in Wan2.1 `W*H` form
    #[serde(default = "default_size")]
    size: String,
    /// Text prompt guiding each clip
    #[serde(default = "default_prompt")]
    prompt: String,
}

fn default_python() -> String {
    "python".to_string()
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_task() -> String {
    "flf2v-14B".to_string()
}

fn default_size() -> String {
    "1280*720".to_string()
}

fn default_prompt() -> String {
    "A smooth, continuous transition from the first frame to the last frame.".to_string()
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            python: default_python(),
            ffmpeg: default_ffmpeg(),
            task: default_task(),
            size: default_size(),
            prompt: default_prompt(),
        }
    }
}

/// Renders an ffmpeg concat-demuxer list for `segments`.
///
/// # Examples
///
/// ```
/// use keytween_media::concat_list;
/// use std::path::PathBuf;
///
/// let list = concat_list(&[PathBuf::from("/out/segment_01.mp4"), PathBuf::from("/out/it's.mp4")]);
/// assert_eq!(list, "file '/out/segment_01.mp4'\nfile '/out/it'\\''s.mp4'\n");
/// ```
pub fn concat_list(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|path| {
            let escaped = path.to_string_lossy().replace('\'', "'\\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}

/// Synthesizes clips between still frames and joins them.
pub struct VideoTweener<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    tools: VideoTools,
    settings: VideoSettings,
}

impl<'a, R: CommandRunner + ?Sized> VideoTweener<'a, R> {
    /// Creates a tweener that runs commands through `runner`.
    pub fn new(runner: &'a R, tools: VideoTools, settings: VideoSettings) -> Self {
        Self {
            runner,
            tools,
            settings,
        }
    }

    /// Generates one clip interpolating from `first` to `last`, written to `output`.
    ///
    /// Runs `generate.py` from the Wan2.1 directory.
    #[instrument(skip(self, first, last, output), fields(first = %first.display(), last = %last.display(), output = %output.display()))]
    pub async fn synthesize_segment(
        &self,
        first: &Path,
        last: &Path,
        output: &Path,
    ) -> KeytweenResult<()> {
        let invocation = CommandInvocation::new(&self.settings.python)
            .arg("generate.py")
            .args(["--task", self.settings.task.as_str()])
            .args(["--size", self.settings.size.as_str()])
            .arg("--ckpt_dir")
            .arg(&self.tools.model_dir)
            .arg("--first_frame")
            .arg(first)
            .arg("--last_frame")
            .arg(last)
            .args(["--prompt", self.settings.prompt.as_str()])
            .arg("--save_file")
            .arg(output)
            .current_dir(&self.tools.wan2_dir);

        self.runner.run(&invocation).await?;
        info!("Synthesized video segment");
        Ok(())
    }

    /// Concatenates `segments` in order into `output` without re-encoding.
    ///
    /// The concat list is written beside `output` and removed on success.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty segment list, a storage error
    /// if the list cannot be written, or the runner's error.
    #[instrument(skip(self, segments, output), fields(segments = segments.len(), output = %output.display()))]
    pub async fn combine(&self, segments: &[PathBuf], output: &Path) -> KeytweenResult<()> {
        if segments.is_empty() {
            return Err(ValidationError::new("No video segments to combine").into());
        }

        let list_path = output
            .parent()
            .map(|dir| dir.join(CONCAT_LIST_NAME))
            .unwrap_or_else(|| PathBuf::from(CONCAT_LIST_NAME));

        tokio::fs::write(&list_path, concat_list(segments))
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    list_path.display(),
                    e
                )))
            })?;

        let invocation = CommandInvocation::new(&self.settings.ffmpeg)
            .args(["-y", "-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .args(["-c", "copy"])
            .arg(output);

        self.runner.run(&invocation).await?;

        if let Err(e) = tokio::fs::remove_file(&list_path).await {
            warn!(path = %list_path.display(), error = %e, "Could not remove concat list");
        }

        info!("Combined video segments");
        Ok(())
    }
}
