use async_trait::async_trait;
use domain::ports::process_runner::{ExecutionError, ExitKind, ProcessRunner, RunOptions, QUIET_ENV};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Number of trailing stderr lines kept on a failed hidden run.
const STDERR_TAIL_LINES: usize = 20;

/// Runs commands on the host with `tokio::process`.
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: &RunOptions,
    ) -> Result<(), ExecutionError> {
        if !options.working_dir.is_dir() {
            return Err(ExecutionError::new(
                program,
                args,
                ExitKind::Spawn(format!(
                    "working directory {} does not exist",
                    options.working_dir.display()
                )),
            ));
        }

        debug!(
            program,
            ?args,
            cwd = %options.working_dir.display(),
            visible = options.output_visible,
            "spawning"
        );

        let mut command = Command::new(program);
        command.args(args).current_dir(&options.working_dir);

        let spawn_error =
            |e: std::io::Error| ExecutionError::new(program, args, ExitKind::Spawn(e.to_string()));

        if options.output_visible {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map_err(spawn_error)?;

            return check(program, args, status, None);
        }

        for (key, value) in QUIET_ENV {
            command.env(key, value);
        }

        let output = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(spawn_error)?;

        check(
            program,
            args,
            output.status,
            Some(String::from_utf8_lossy(&output.stderr).into_owned()),
        )
    }
}

fn check(
    program: &str,
    args: &[String],
    status: ExitStatus,
    stderr: Option<String>,
) -> Result<(), ExecutionError> {
    if status.success() {
        return Ok(());
    }

    let exit = match status.code() {
        Some(code) => ExitKind::Code(code),
        None => ExitKind::Signal,
    };

    let mut error = ExecutionError::new(program, args, exit);
    if let Some(stderr) = stderr {
        error = error.with_stderr(tail(&stderr, STDERR_TAIL_LINES));
    }

    debug!(%error, "command failed");
    Err(error)
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
