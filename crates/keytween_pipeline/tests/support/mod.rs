//! Mock backends, runners, and reporters shared by the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use keytween_core::{GenerateRequest, GenerateResponse, ImageRequest, Output};
use keytween_error::{KeytweenResult, OpenAiError, OpenAiErrorKind};
use keytween_interface::{BackendFactory, ImageSynthesis, TweenDriver, Vision};
use keytween_media::{CommandInvocation, CommandRunner};
use keytween_pipeline::{ProgressReporter, RunEvent};
use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Encodes a solid 4x4 PNG.
pub fn png_bytes(color: [u8; 3]) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(4, 4, Rgb(color))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes
}

/// Writes a solid keyframe PNG and returns its path.
pub fn keyframe(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(color)).expect("Failed to write keyframe");
    path
}

/// Shared record of everything a mock backend was asked to do.
#[derive(Default)]
pub struct BackendLog {
    pub api_keys: Vec<String>,
    pub completions: Vec<GenerateRequest>,
    pub image_prompts: Vec<String>,
}

/// Backend that replays canned completions and returns solid PNGs.
#[derive(Clone)]
pub struct MockBackend {
    responses: Arc<Mutex<VecDeque<String>>>,
    log: Arc<Mutex<BackendLog>>,
    fail_image_at: Option<usize>,
    image_formats: Option<&'static [&'static str]>,
}

#[async_trait]
impl TweenDriver for MockBackend {
    async fn generate(&self, req: &GenerateRequest) -> KeytweenResult<GenerateResponse> {
        self.log.lock().unwrap().completions.push(req.clone());
        let text = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(GenerateResponse::new(vec![Output::Text(text)]))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-vision"
    }
}

impl Vision for MockBackend {
    fn supported_image_formats(&self) -> &[&'static str] {
        self.image_formats
            .unwrap_or(&["image/png", "image/jpeg", "image/webp", "image/gif"])
    }
}

#[async_trait]
impl ImageSynthesis for MockBackend {
    async fn synthesize(&self, req: &ImageRequest) -> KeytweenResult<Output> {
        let call = {
            let mut log = self.log.lock().unwrap();
            log.image_prompts.push(req.prompt().clone());
            log.image_prompts.len() - 1
        };
        if self.fail_image_at == Some(call) {
            return Err(OpenAiError::new(OpenAiErrorKind::ApiError {
                status: 503,
                message: "Image service unavailable (503)".to_string(),
            })
            .into());
        }
        let shade = (call as u8).wrapping_mul(40);
        Ok(Output::Image {
            mime: Some("image/png".to_string()),
            data: png_bytes([shade, 128, 255 - shade]),
        })
    }

    fn image_model_name(&self) -> &str {
        "mock-image"
    }
}

/// Factory handing out [`MockBackend`]s that share one log.
#[derive(Clone, Default)]
pub struct MockFactory {
    responses: Arc<Mutex<VecDeque<String>>>,
    pub log: Arc<Mutex<BackendLog>>,
    fail_image_at: Option<usize>,
    image_formats: Option<&'static [&'static str]>,
}

impl MockFactory {
    /// Completions are replayed in order, one per prompt request.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Into::into).collect())),
            ..Default::default()
        }
    }

    /// Fail the image call with this zero-based position.
    pub fn failing_image_at(mut self, call: usize) -> Self {
        self.fail_image_at = Some(call);
        self
    }

    /// Limit the image types the connected backends accept.
    pub fn accepting_formats(mut self, formats: &'static [&'static str]) -> Self {
        self.image_formats = Some(formats);
        self
    }
}

impl BackendFactory for MockFactory {
    type Backend = MockBackend;

    fn connect(&self, api_key: &str) -> KeytweenResult<MockBackend> {
        self.log.lock().unwrap().api_keys.push(api_key.to_string());
        Ok(MockBackend {
            responses: self.responses.clone(),
            log: self.log.clone(),
            fail_image_at: self.fail_image_at,
            image_formats: self.image_formats,
        })
    }
}

/// Runner that records invocations and touches each command's output file.
#[derive(Default)]
pub struct MockRunner {
    pub invocations: Mutex<Vec<CommandInvocation>>,
    /// Contents of each `-i` list file, read while the command runs.
    pub concat_lists: Mutex<Vec<String>>,
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, invocation: &CommandInvocation) -> KeytweenResult<()> {
        let args = invocation.get_args();
        if let Some(pos) = args.iter().position(|a| a == "-i") {
            let list = std::fs::read_to_string(&args[pos + 1]).expect("Failed to read list");
            self.concat_lists.lock().unwrap().push(list);
        }
        let output = args
            .iter()
            .position(|a| a == "--save_file")
            .map(|pos| PathBuf::from(&args[pos + 1]))
            .or_else(|| args.last().map(PathBuf::from));
        if let Some(output) = output {
            std::fs::write(output, b"mp4").expect("Failed to touch output");
        }
        self.invocations.lock().unwrap().push(invocation.clone());
        Ok(())
    }
}

/// Reporter that keeps every event.
#[derive(Default)]
pub struct CollectingReporter {
    pub events: Mutex<Vec<RunEvent>>,
}

impl CollectingReporter {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for CollectingReporter {
    fn report(&self, event: &RunEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
