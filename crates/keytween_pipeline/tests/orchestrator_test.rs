//! End-to-end orchestrator tests against mock services.

mod support;

use keytween_core::FrameOrigin;
use keytween_media::VideoToolConfig;
use keytween_pipeline::{
    GenerateCommand, MAX_FRAMES_PER_TRANSITION, Orchestrator, RunEvent, RunStage, TweenConfig,
};
use keytween_storage::{MAX_FRAMES, frame_file_name};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use support::{CollectingReporter, MockFactory, MockRunner, keyframe};
use tempfile::TempDir;

struct Fixture {
    inputs: TempDir,
    root: TempDir,
    start: PathBuf,
    middle: PathBuf,
    end: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let inputs = TempDir::new().expect("Failed to create input dir");
        let root = TempDir::new().expect("Failed to create output root");
        let start = keyframe(inputs.path(), "start.png", [255, 0, 0]);
        let middle = keyframe(inputs.path(), "middle.png", [0, 255, 0]);
        let end = keyframe(inputs.path(), "end.png", [0, 0, 255]);
        Self {
            inputs,
            root,
            start,
            middle,
            end,
        }
    }

    fn command(&self, frames: u32) -> GenerateCommand {
        GenerateCommand::new(&self.start, &self.middle, &self.end, frames).with_api_key("sk-test")
    }

    fn out_dir(&self) -> PathBuf {
        self.root.path().join("tween_output")
    }
}

fn orchestrator<'a>(
    fixture: &Fixture,
    factory: MockFactory,
    video: VideoToolConfig,
    runner: &'a MockRunner,
    reporter: &'a CollectingReporter,
) -> Orchestrator<MockFactory, &'a MockRunner, &'a CollectingReporter> {
    Orchestrator::new(TweenConfig::default(), video, factory, runner, reporter)
        .with_output_root(fixture.root.path())
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|e| e == ext))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_full_run_without_video_writes_gif_only() {
    let fixture = Fixture::new();
    let factory = MockFactory::with_responses([
        "1. Red fading toward green\n2. Mostly green",
        "1. Green cooling to teal\n2. Nearly blue",
    ]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = orchestrator(
        &fixture,
        factory.clone(),
        VideoToolConfig::disabled(),
        &runner,
        &reporter,
    );

    let report = fixture
        .command(2)
        .execute(&orch)
        .await
        .expect("Run failed");

    // start, 2 tweens, middle, 2 tweens, end
    assert_eq!(report.frames().len(), 7);
    let origins: Vec<FrameOrigin> = report.frames().iter().map(|f| *f.origin()).collect();
    assert_eq!(
        origins,
        vec![
            FrameOrigin::Keyframe,
            FrameOrigin::Synthesized,
            FrameOrigin::Synthesized,
            FrameOrigin::Keyframe,
            FrameOrigin::Synthesized,
            FrameOrigin::Synthesized,
            FrameOrigin::Keyframe,
        ]
    );
    for (expected, frame) in report.frames().iter().enumerate() {
        assert_eq!(*frame.index(), expected);
        assert!(frame.path().exists(), "missing {}", frame.path().display());
    }

    assert_eq!(report.gif_path(), &fixture.out_dir().join("tween.gif"));
    assert!(report.gif_path().exists());
    assert!(report.video_path().is_none());
    assert!(files_with_extension(&fixture.out_dir(), "mp4").is_empty());
    assert!(runner.invocations.lock().unwrap().is_empty());

    let labels: Vec<&str> = report.prompts().iter().map(|t| t.label().as_str()).collect();
    assert_eq!(labels, ["start->middle", "middle->end"]);
    assert_eq!(report.prompts()[0].prompts()[1].as_str(), "Mostly green");

    let log = factory.log.lock().unwrap();
    assert_eq!(log.api_keys, vec!["sk-test".to_string()]);
    assert_eq!(log.completions.len(), 2);
    assert_eq!(
        log.image_prompts,
        vec![
            "Red fading toward green",
            "Mostly green",
            "Green cooling to teal",
            "Nearly blue"
        ]
    );

    let events = reporter.events();
    assert!(events.contains(&RunEvent::VideoSkipped));
    assert!(events.contains(&RunEvent::StageEntered(RunStage::Done)));
    assert!(events.contains(&RunEvent::Completed { frames: 7 }));
    assert!(!events.iter().any(|e| matches!(e, RunEvent::Failed { .. })));
}

#[tokio::test]
async fn test_stages_are_entered_in_order() {
    let fixture = Fixture::new();
    let factory = MockFactory::with_responses(["1. a", "1. b"]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = orchestrator(
        &fixture,
        factory,
        VideoToolConfig::disabled(),
        &runner,
        &reporter,
    );

    fixture.command(1).execute(&orch).await.expect("Run failed");

    let stages: Vec<RunStage> = reporter
        .events()
        .into_iter()
        .filter_map(|e| match e {
            RunEvent::StageEntered(stage) => Some(stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        vec![
            RunStage::CopyStartFrame,
            RunStage::GeneratePromptsAB,
            RunStage::SynthesizeImagesAB,
            RunStage::CopyMiddleFrame,
            RunStage::GeneratePromptsBC,
            RunStage::SynthesizeImagesBC,
            RunStage::CopyEndFrame,
            RunStage::AssembleAnimation,
            RunStage::Done,
        ]
    );
}

#[tokio::test]
async fn test_short_prompt_list_warns_and_keeps_indices_contiguous() {
    let fixture = Fixture::new();
    // Three requested, two usable lines for the first transition.
    let factory = MockFactory::with_responses([
        "Sure! Here are your prompts:\n\n1. Dusk\n2.\n",
        "1. One\n2. Two\n3. Three",
    ]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = orchestrator(
        &fixture,
        factory,
        VideoToolConfig::disabled(),
        &runner,
        &reporter,
    );

    let report = fixture.command(3).execute(&orch).await.expect("Run failed");

    assert_eq!(report.prompts()[0].prompts().len(), 2);
    assert_eq!(*report.prompts()[0].requested(), 3);
    assert!(reporter.events().contains(&RunEvent::PromptCountMismatch {
        transition: "start->middle".to_string(),
        expected: 3,
        actual: 2,
    }));

    // 3 keyframes + 2 + 3 tweens
    assert_eq!(report.frames().len(), 8);
    let names: Vec<String> = report
        .frames()
        .iter()
        .map(|f| f.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let expected: Vec<String> = (0..8).map(|i| format!("frame_{:03}.png", i)).collect();
    assert_eq!(names, expected);
    assert_eq!(*report.frames()[3].origin(), FrameOrigin::Keyframe);
}

#[tokio::test]
async fn test_long_prompt_list_warns_and_keeps_every_prompt() {
    let fixture = Fixture::new();
    // Two requested, four lines returned for the first transition.
    let factory = MockFactory::with_responses(["1. a\n2. b\n3. c\n4. d", "1. e\n2. f"]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = orchestrator(
        &fixture,
        factory.clone(),
        VideoToolConfig::disabled(),
        &runner,
        &reporter,
    );

    let report = fixture.command(2).execute(&orch).await.expect("Run failed");

    assert_eq!(report.prompts()[0].prompts().len(), 4);
    assert!(reporter.events().contains(&RunEvent::PromptCountMismatch {
        transition: "start->middle".to_string(),
        expected: 2,
        actual: 4,
    }));
    assert!(!reporter.events().iter().any(|e| matches!(
        e,
        RunEvent::PromptCountMismatch { transition, .. } if transition == "middle->end"
    )));
    assert_eq!(factory.log.lock().unwrap().image_prompts.len(), 6);

    // 3 keyframes + 4 + 2 tweens
    assert_eq!(report.frames().len(), 9);
    let names: Vec<String> = report
        .frames()
        .iter()
        .map(|f| f.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let expected: Vec<String> = (0..9).map(|i| format!("frame_{:03}.png", i)).collect();
    assert_eq!(names, expected);
    assert_eq!(*report.frames()[5].origin(), FrameOrigin::Keyframe);
    assert_eq!(*report.frames()[8].origin(), FrameOrigin::Keyframe);
}

#[tokio::test]
async fn test_missing_inputs_fail_before_any_side_effect() {
    let fixture = Fixture::new();
    let cases = vec![
        GenerateCommand::default()
            .with_start(&fixture.start)
            .with_end(&fixture.end)
            .with_frames(2u32)
            .with_api_key("sk-test"),
        GenerateCommand::new(&fixture.start, &fixture.middle, &fixture.end, 2),
        GenerateCommand::new(&fixture.start, &fixture.middle, &fixture.end, 2).with_api_key("   "),
        GenerateCommand::new(&fixture.start, "", &fixture.end, 2).with_api_key("sk-test"),
        GenerateCommand::new(&fixture.start, &fixture.middle, &fixture.end, 0)
            .with_api_key("sk-test"),
        GenerateCommand::new(
            &fixture.start,
            &fixture.middle,
            &fixture.end,
            MAX_FRAMES_PER_TRANSITION + 1,
        )
        .with_api_key("sk-test"),
    ];

    for command in cases {
        let factory = MockFactory::default();
        let runner = MockRunner::default();
        let reporter = CollectingReporter::default();
        let orch = orchestrator(
            &fixture,
            factory.clone(),
            VideoToolConfig::disabled(),
            &runner,
            &reporter,
        );

        let err = command
            .execute(&orch)
            .await
            .expect_err("Invalid command should fail");

        assert!(err.is_validation(), "{:?} gave {}", command, err);
        assert!(!fixture.out_dir().exists());
        assert!(factory.log.lock().unwrap().api_keys.is_empty());
        assert!(matches!(
            reporter.events().as_slice(),
            [RunEvent::Failed {
                stage: RunStage::Idle,
                ..
            }]
        ));
    }
}

#[test]
fn test_largest_run_fits_three_digit_frame_names() {
    let last_index = 2 * MAX_FRAMES_PER_TRANSITION as usize + 2;
    assert!(last_index < MAX_FRAMES);
    assert_eq!(frame_file_name(last_index), "frame_998.png");
}

#[tokio::test]
async fn test_video_stage_runs_two_tweens_then_concat() {
    let fixture = Fixture::new();
    let factory = MockFactory::with_responses(["1. a\n2. b", "1. c\n2. d"]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let video = VideoToolConfig::new(Some("/opt/Wan2.1".into()), Some("/models/flf2v".into()));
    let orch = orchestrator(&fixture, factory, video, &runner, &reporter);

    let report = fixture.command(2).execute(&orch).await.expect("Run failed");

    let out_dir = fixture.out_dir();
    assert_eq!(report.video_path().as_deref(), Some(out_dir.join("tween.mp4").as_path()));
    assert!(report.gif_path().exists());

    let invocations = runner.invocations.lock().unwrap();
    let programs: Vec<OsString> = invocations.iter().map(|i| i.program().to_os_string()).collect();
    assert_eq!(programs, ["python", "python", "ffmpeg"].map(OsString::from));

    let value_after = |index: usize, flag: &str| -> PathBuf {
        let args = invocations[index].get_args();
        let pos = args.iter().position(|a| a == flag).expect(flag);
        PathBuf::from(&args[pos + 1])
    };
    let frames_dir = out_dir.join("frames");
    assert_eq!(value_after(0, "--first_frame"), frames_dir.join("frame_000.png"));
    assert_eq!(value_after(0, "--last_frame"), frames_dir.join("frame_003.png"));
    assert_eq!(value_after(0, "--save_file"), out_dir.join("segment_01.mp4"));
    assert_eq!(value_after(1, "--first_frame"), frames_dir.join("frame_003.png"));
    assert_eq!(value_after(1, "--last_frame"), frames_dir.join("frame_006.png"));
    assert_eq!(value_after(1, "--save_file"), out_dir.join("segment_02.mp4"));
    assert_eq!(
        invocations[0].working_dir(),
        Some(Path::new("/opt/Wan2.1"))
    );
    assert_eq!(
        runner.concat_lists.lock().unwrap().as_slice(),
        [format!(
            "file '{}'\nfile '{}'\n",
            out_dir.join("segment_01.mp4").display(),
            out_dir.join("segment_02.mp4").display()
        )]
    );

    let events = reporter.events();
    assert!(events.contains(&RunEvent::StageEntered(RunStage::VideoStage)));
    assert!(events.contains(&RunEvent::VideoSaved(out_dir.join("tween.mp4"))));
    assert!(!events.contains(&RunEvent::VideoSkipped));
    assert!(!out_dir.join("segments.txt").exists());
}

#[tokio::test]
async fn test_relative_output_root_hands_absolute_paths_to_video_tools() {
    let fixture = Fixture::new();
    // A directory below the test's working directory, named relatively.
    let relative = tempfile::Builder::new()
        .prefix("relative-root")
        .tempdir_in(".")
        .expect("Failed to create relative root");
    assert!(relative.path().is_relative());

    let factory = MockFactory::with_responses(["1. a", "1. b"]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let video = VideoToolConfig::new(Some("/opt/Wan2.1".into()), Some("/models/flf2v".into()));
    let orch = Orchestrator::new(TweenConfig::default(), video, factory, &runner, &reporter)
        .with_output_root(relative.path());

    assert!(orch.output_root().is_absolute());
    assert!(orch.output_root().ends_with(relative.path().file_name().unwrap()));

    let report = fixture.command(1).execute(&orch).await.expect("Run failed");

    assert!(report.gif_path().is_absolute());
    assert!(report.gif_path().exists());
    let invocations = runner.invocations.lock().unwrap();
    assert_eq!(invocations.len(), 3);
    for invocation in invocations.iter().take(2) {
        let args = invocation.get_args();
        for flag in ["--first_frame", "--last_frame", "--save_file"] {
            let pos = args.iter().position(|a| a == flag).expect(flag);
            let path = PathBuf::from(&args[pos + 1]);
            assert!(path.is_absolute(), "{} got {}", flag, path.display());
        }
    }
    let lists = runner.concat_lists.lock().unwrap();
    assert_eq!(lists.len(), 1);
    for line in lists[0].lines() {
        let entry = line
            .strip_prefix("file '")
            .and_then(|rest| rest.strip_suffix('\''))
            .expect("Malformed list entry");
        assert!(Path::new(entry).is_absolute(), "relative entry {}", entry);
    }
}

#[tokio::test]
async fn test_default_output_root_is_absolute() {
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = Orchestrator::new(
        TweenConfig::default(),
        VideoToolConfig::disabled(),
        MockFactory::default(),
        &runner,
        &reporter,
    );

    assert!(orch.output_root().is_absolute());
}

#[tokio::test]
async fn test_image_failure_aborts_without_gif() {
    let fixture = Fixture::new();
    let factory = MockFactory::with_responses(["1. a\n2. b", "1. c\n2. d"]).failing_image_at(1);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = orchestrator(
        &fixture,
        factory.clone(),
        VideoToolConfig::new(Some("/opt/Wan2.1".into()), Some("/models".into())),
        &runner,
        &reporter,
    );

    let err = fixture
        .command(2)
        .execute(&orch)
        .await
        .expect_err("Image failure should abort");

    assert!(err.to_string().contains("Image service unavailable (503)"));
    assert!(!fixture.out_dir().join("tween.gif").exists());
    // The batch stops at the failing prompt and the second transition never starts.
    assert_eq!(factory.log.lock().unwrap().image_prompts.len(), 2);
    assert_eq!(factory.log.lock().unwrap().completions.len(), 1);
    assert!(runner.invocations.lock().unwrap().is_empty());

    let events = reporter.events();
    match events.last() {
        Some(RunEvent::Failed { stage, message }) => {
            assert_eq!(*stage, RunStage::SynthesizeImagesAB);
            assert_eq!(message, &err.to_string());
        }
        other => panic!("Expected a Failed event, got {:?}", other),
    }
    assert!(!events.contains(&RunEvent::StageEntered(RunStage::AssembleAnimation)));
}

#[tokio::test]
async fn test_unreadable_keyframe_is_reported() {
    let fixture = Fixture::new();
    let factory = MockFactory::with_responses(["1. a"]);
    let runner = MockRunner::default();
    let reporter = CollectingReporter::default();
    let orch = orchestrator(
        &fixture,
        factory,
        VideoToolConfig::disabled(),
        &runner,
        &reporter,
    );

    let missing = fixture.inputs.path().join("nope.png");
    let err = GenerateCommand::new(&missing, &fixture.middle, &fixture.end, 1)
        .with_api_key("sk-test")
        .execute(&orch)
        .await
        .expect_err("Missing keyframe should fail");

    assert!(!err.is_validation());
    assert!(err.to_string().contains("nope.png"));
    assert!(matches!(
        reporter.events().last(),
        Some(RunEvent::Failed {
            stage: RunStage::CopyStartFrame,
            ..
        })
    ));
}
