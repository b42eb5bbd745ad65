use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Environment applied to children whose output is captured, to keep package
/// managers at their quietest.
pub const QUIET_ENV: &[(&str, &str)] = &[
    ("npm_config_loglevel", "error"),
    ("PNPM_REPORTER", "silent"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Must exist before the command is launched.
    pub working_dir: PathBuf,

    /// When false, stdout/stderr are captured instead of streamed.
    pub output_visible: bool,
}

impl RunOptions {
    pub fn new(working_dir: impl Into<PathBuf>, output_visible: bool) -> Self {
        Self {
            working_dir: working_dir.into(),
            output_visible,
        }
    }
}

/// How a failed command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitKind {
    Code(i32),
    /// Terminated by a signal; no exit code.
    Signal,
    /// The process could not be started.
    Spawn(String),
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Code(code) => write!(f, "exited with code {}", code),
            ExitKind::Signal => f.write_str("was terminated by a signal"),
            ExitKind::Spawn(reason) => write!(f, "could not be started: {}", reason),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Command `{}` {exit}", join_command(.program, .args))]
pub struct ExecutionError {
    pub program: String,
    pub args: Vec<String>,
    pub exit: ExitKind,
    /// Tail of the captured stderr, when output was hidden.
    pub stderr: Option<String>,
}

impl ExecutionError {
    pub fn new(program: impl Into<String>, args: &[String], exit: ExitKind) -> Self {
        Self {
            program: program.into(),
            args: args.to_vec(),
            exit,
            stderr: None,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        if !stderr.trim().is_empty() {
            self.stderr = Some(stderr);
        }
        self
    }

    pub fn command_line(&self) -> String {
        join_command(&self.program, &self.args)
    }
}

fn join_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Executes external commands. A non-zero exit is a failure; nothing is retried.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: &RunOptions,
    ) -> Result<(), ExecutionError>;
}
