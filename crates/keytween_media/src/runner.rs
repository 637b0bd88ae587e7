//! External process invocation.

use async_trait::async_trait;
use keytween_error::{CommandError, KeytweenResult};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::{debug, error, instrument};

/// A fully described external command.
///
/// # Examples
///
/// ```
/// use keytween_media::CommandInvocation;
///
/// let invocation = CommandInvocation::new("ffmpeg")
///     .arg("-y")
///     .args(["-f", "concat"])
///     .current_dir("/tmp");
///
/// assert_eq!(invocation.display_line(), "ffmpeg -y -f concat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: OsString,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl CommandInvocation {
    /// Starts an invocation of `program`.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Runs the program from `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Program to run.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments, in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, if set.
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Program and arguments joined by spaces, for logs.
    pub fn display_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs external commands to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the program cannot be spawned or exits
    /// unsuccessfully.
    async fn run(&self, invocation: &CommandInvocation) -> KeytweenResult<()>;
}

/// Spawns real processes with `tokio::process`.
///
/// stdout is discarded and stderr captured for error messages. The child is
/// killed if the future is dropped before it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self, invocation), fields(command = %invocation.display_line()))]
    async fn run(&self, invocation: &CommandInvocation) -> KeytweenResult<()> {
        let program = invocation.program().to_string_lossy().into_owned();

        let mut cmd = tokio::process::Command::new(invocation.program());
        cmd.args(invocation.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = invocation.working_dir() {
            cmd.current_dir(dir);
        }

        debug!("Spawning external command");
        let output = cmd.output().await.map_err(|e| {
            error!(error = %e, "Failed to spawn external command");
            CommandError::new(&program, format!("could not be started: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(status = %output.status, stderr = %stderr.trim(), "External command failed");
            return Err(CommandError::new(
                program,
                format!("exited with {}: {}", output.status, stderr.trim()),
            )
            .into());
        }

        debug!("External command finished");
        Ok(())
    }
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    async fn run(&self, invocation: &CommandInvocation) -> KeytweenResult<()> {
        (**self).run(invocation).await
    }
}
