//! User actions carried to the orchestrator.

use crate::{Orchestrator, ProgressReporter, RunReport};
use derive_getters::Getters;
use derive_setters::Setters;
use keytween_core::{Keyframes, Prompt};
use keytween_error::{KeytweenResult, ValidationError};
use keytween_interface::BackendFactory;
use keytween_media::CommandRunner;
use keytween_storage::MAX_FRAMES;
use std::path::{Path, PathBuf};

const MISSING_INPUTS: &str = "Please select all images and provide the API key.";

fn present(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

fn present_key(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

/// Largest per-transition count whose run, three keyframes included, still
/// fits the fixed-width frame names.
pub const MAX_FRAMES_PER_TRANSITION: u32 = ((MAX_FRAMES - 3) / 2) as u32;

fn check_frames(frames: u32) -> KeytweenResult<()> {
    if frames == 0 {
        return Err(ValidationError::new("Frame count must be at least 1").into());
    }
    if frames > MAX_FRAMES_PER_TRANSITION {
        return Err(ValidationError::new(format!(
            "Frame count must be at most {}",
            MAX_FRAMES_PER_TRANSITION
        ))
        .into());
    }
    Ok(())
}

/// The full three-keyframe run.
///
/// Every field is optional so that a half-filled form can be handed over
/// as is; [`Orchestrator::generate`] rejects it before touching anything.
///
/// # Examples
///
/// ```
/// use keytween_pipeline::GenerateCommand;
///
/// let command = GenerateCommand::new("a.png", "b.png", "c.png", 3).with_api_key("sk-test");
/// assert_eq!(*command.frames(), 3);
/// assert!(!format!("{:?}", command).contains("sk-test"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct GenerateCommand {
    start: Option<PathBuf>,
    middle: Option<PathBuf>,
    end: Option<PathBuf>,
    frames: u32,
    api_key: Option<String>,
}

impl GenerateCommand {
    /// A command with all three keyframes and no credentials yet.
    pub fn new(
        start: impl Into<PathBuf>,
        middle: impl Into<PathBuf>,
        end: impl Into<PathBuf>,
        frames: u32,
    ) -> Self {
        Self {
            start: Some(start.into()),
            middle: Some(middle.into()),
            end: Some(end.into()),
            frames,
            api_key: None,
        }
    }

    /// A command from possibly incomplete inputs, as collected from a form.
    pub fn from_inputs(
        start: Option<PathBuf>,
        middle: Option<PathBuf>,
        end: Option<PathBuf>,
        frames: u32,
        api_key: Option<String>,
    ) -> Self {
        Self {
            start,
            middle,
            end,
            frames,
            api_key,
        }
    }

    /// Keyframes and trimmed API key, or a validation error.
    pub(crate) fn validate(&self) -> KeytweenResult<(Keyframes, &str)> {
        let (Some(start), Some(middle), Some(end), Some(key)) = (
            present(&self.start),
            present(&self.middle),
            present(&self.end),
            present_key(&self.api_key),
        ) else {
            return Err(ValidationError::new(MISSING_INPUTS).into());
        };
        check_frames(self.frames)?;
        Ok((Keyframes::new(start, middle, end), key))
    }

    /// Runs this command.
    pub async fn execute<F, R, P>(&self, orchestrator: &Orchestrator<F, R, P>) -> KeytweenResult<RunReport>
    where
        F: BackendFactory,
        R: CommandRunner,
        P: ProgressReporter,
    {
        orchestrator.generate(self).await
    }
}

impl std::fmt::Debug for GenerateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateCommand")
            .field("start", &self.start)
            .field("middle", &self.middle)
            .field("end", &self.end)
            .field("frames", &self.frames)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Prompt generation for a single transition, without rendering anything.
#[derive(Clone, Default, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct PromptsCommand {
    from: Option<PathBuf>,
    to: Option<PathBuf>,
    frames: u32,
    api_key: Option<String>,
}

impl PromptsCommand {
    /// A command for `from -> to` with no credentials yet.
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>, frames: u32) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            frames,
            api_key: None,
        }
    }

    /// A command from possibly incomplete inputs.
    pub fn from_inputs(
        from: Option<PathBuf>,
        to: Option<PathBuf>,
        frames: u32,
        api_key: Option<String>,
    ) -> Self {
        Self {
            from,
            to,
            frames,
            api_key,
        }
    }

    pub(crate) fn validate(&self) -> KeytweenResult<(&Path, &Path, &str)> {
        let (Some(from), Some(to), Some(key)) = (
            present(&self.from),
            present(&self.to),
            present_key(&self.api_key),
        ) else {
            return Err(ValidationError::new(MISSING_INPUTS).into());
        };
        check_frames(self.frames)?;
        Ok((from, to, key))
    }

    /// Runs this command.
    pub async fn execute<F, R, P>(&self, orchestrator: &Orchestrator<F, R, P>) -> KeytweenResult<Vec<Prompt>>
    where
        F: BackendFactory,
        R: CommandRunner,
        P: ProgressReporter,
    {
        orchestrator.prompts(self).await
    }
}

impl std::fmt::Debug for PromptsCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptsCommand")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("frames", &self.frames)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
