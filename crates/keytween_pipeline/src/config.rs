//! Layered run configuration.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (`keytween.toml` compiled into the binary)
//! - `~/.config/keytween/keytween.toml`
//! - `./keytween.toml`
//!
//! Any key left out of a user file keeps its bundled value. The video stage
//! is switched on by environment variables, never by this file.

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use derive_setters::Setters;
use keytween_error::{ConfigError, KeytweenError, KeytweenResult};
use keytween_media::VideoSettings;
use keytween_models::OpenAiSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../keytween.toml");

/// Completion request tuning for prompt generation.
///
/// ```toml
/// [completion]
/// model = "gpt-4o"
/// temperature = 0.7
/// tokens_per_frame = 50
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct CompletionConfig {
    /// Chat completions endpoint
    #[serde(default = "default_completion_endpoint")]
    endpoint: String,
    /// Multimodal model that writes the prompts
    #[serde(default = "default_completion_model")]
    model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Response budget per requested frame
    #[serde(default = "default_tokens_per_frame")]
    tokens_per_frame: u32,
}

fn default_completion_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_completion_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_tokens_per_frame() -> u32 {
    50
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_completion_endpoint(),
            model: default_completion_model(),
            temperature: default_temperature(),
            tokens_per_frame: default_tokens_per_frame(),
        }
    }
}

/// Image synthesis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct ImageConfig {
    /// Image generation endpoint
    #[serde(default = "default_image_endpoint")]
    endpoint: String,
    /// Image model
    #[serde(default = "default_image_model")]
    model: String,
    /// Output size, `WxH`
    #[serde(default = "default_image_size")]
    size: String,
    /// `b64_json` or `url`
    #[serde(default = "default_response_format")]
    response_format: String,
}

fn default_image_endpoint() -> String {
    "https://api.openai.com/v1/images/generations".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_response_format() -> String {
    "b64_json".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_image_endpoint(),
            model: default_image_model(),
            size: default_image_size(),
            response_format: default_response_format(),
        }
    }
}

/// GIF timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct AnimationConfig {
    /// Display time of each frame in milliseconds
    #[serde(default = "default_frame_delay_ms")]
    frame_delay_ms: u64,
}

fn default_frame_delay_ms() -> u64 {
    500
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

impl AnimationConfig {
    /// Frame delay as a duration.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// Everything a run needs besides its inputs.
///
/// # Examples
///
/// ```
/// use keytween_pipeline::TweenConfig;
///
/// let config = TweenConfig::from_toml_str(
///     r#"
///     [completion]
///     temperature = 0.2
///
///     [animation]
///     frame_delay_ms = 120
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(*config.completion().temperature(), 0.2);
/// assert_eq!(config.completion().model(), "gpt-4o");
/// assert_eq!(*config.animation().frame_delay_ms(), 120);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct TweenConfig {
    /// `[completion]`
    #[serde(default)]
    completion: CompletionConfig,
    /// `[image]`
    #[serde(default)]
    image: ImageConfig,
    /// `[animation]`
    #[serde(default)]
    animation: AnimationConfig,
    /// `[video]`
    #[serde(default)]
    video: VideoSettings,
}

impl TweenConfig {
    /// Load configuration from the bundled defaults and any user files.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a user file exists but cannot be parsed.
    #[instrument]
    pub fn load() -> KeytweenResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/keytween/keytween.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("keytween").required(false));

        Self::finish(builder.build())
    }

    /// Load configuration from a single file, layered over the bundled defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> KeytweenResult<Self> {
        debug!("Loading configuration from file");

        let built = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                KeytweenError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;

        Self::finish(Ok(built))
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(toml: &str) -> KeytweenResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .build(),
        )
    }

    fn finish(built: Result<Config, config::ConfigError>) -> KeytweenResult<Self> {
        built
            .map_err(|e| {
                KeytweenError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                KeytweenError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Client settings for the OpenAI-compatible backend.
    pub fn openai_settings(&self) -> OpenAiSettings {
        OpenAiSettings::default()
            .with_chat_endpoint(self.completion.endpoint())
            .with_chat_model(self.completion.model())
            .with_images_endpoint(self.image.endpoint())
            .with_image_model(self.image.model())
            .with_image_size(self.image.size())
            .with_response_format(self.image.response_format())
    }
}
