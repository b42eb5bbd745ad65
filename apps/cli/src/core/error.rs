use crate::ui::{Icon, Theme};
use nexst::application::FailureReport;
use nexst::domain::{ExitKind, ScaffoldError, ValidationError};
use nexst_manifest::PackageManager;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("Scaffolding Cancelled")]
    Cancelled,

    #[error("Terminal error: {0:#}")]
    Terminal(#[from] anyhow::Error),
}

impl From<ValidationError> for CliError {
    fn from(error: ValidationError) -> Self {
        CliError::Scaffold(error.into())
    }
}

impl CliError {
    /// Returns an actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        let CliError::Scaffold(error) = self else {
            return None;
        };

        match error {
            ScaffoldError::Validation(ValidationError::MissingProjectName) => {
                Some("Example: nexst my-project".to_string())
            }
            ScaffoldError::Validation(ValidationError::PackageManagerMissing(pm)) => match pm {
                PackageManager::Pnpm => Some(
                    "Install PNPM with: npm install -g pnpm\n\
                     Or enable it via Corepack (Node 16.13+ / 18+): corepack enable\n\
                     More info: https://pnpm.io/installation"
                        .to_string(),
                ),
                PackageManager::Npm => Some(
                    "NPM should come with NodeJS\nVisit: https://nodejs.org/".to_string(),
                ),
            },
            ScaffoldError::Validation(ValidationError::PortConflict(_)) => {
                Some("Pass different values to --web-port and --api-port.".to_string())
            }
            ScaffoldError::Validation(ValidationError::AliasNotConfigurable { .. }) => {
                Some("Use --profile src to scaffold without the import alias.".to_string())
            }
            ScaffoldError::Execution(e) => match &e.exit {
                ExitKind::Spawn(_) => Some(format!(
                    "Check that `{}` is installed and on your PATH.",
                    e.program
                )),
                _ => Some("Re-run with --verbose to see the full command output.".to_string()),
            },
            ScaffoldError::PrerequisiteMissing { .. } => {
                Some("Re-run with --verbose to see what the generator printed.".to_string())
            }
            _ => None,
        }
    }

    /// Prints the error. `root` is the project directory a failed run may have
    /// left behind.
    pub fn render(&self, root: &Path) {
        match self {
            CliError::Cancelled => {
                eprintln!();
                eprintln!("{} {}", Theme::warning(Icon::Warning), Theme::warning(self));
            }
            CliError::Scaffold(error) if !error.is_validation() => {
                self.render_fatal(error, root);
            }
            _ => {
                eprintln!();
                eprintln!(
                    "{} {}",
                    Theme::error(format!("{} ERROR:", Icon::Cross)),
                    Theme::muted(self)
                );
            }
        }

        if let Some(help) = self.suggestion() {
            for line in help.lines() {
                eprintln!("  {}", Theme::muted(line));
            }
        }
        eprintln!();
    }

    fn render_fatal(&self, error: &ScaffoldError, root: &Path) {
        let report = FailureReport::new(error, root);

        eprintln!();
        eprintln!("{}", Theme::error(format!("{} FATAL ERROR", Icon::Cross)));
        eprintln!("{}", Theme::error(crate::ui::rule()));
        eprintln!("{}", Theme::muted(&report.message));
        if let Some(details) = &report.details {
            eprintln!();
            for line in details.lines() {
                eprintln!("  {}", Theme::muted(line));
            }
        }
        eprintln!("{}", Theme::error(crate::ui::rule()));

        if let Some(command) = report.cleanup_command() {
            eprintln!();
            eprintln!("{}", Theme::warning(format!("{} Partial scaffold created.", Icon::Warning)));
            eprintln!("{}", Theme::muted("  You may want to delete the folder:"));
            eprintln!("  {}", Theme::path(command));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexst::domain::ExecutionError;

    #[test]
    fn pnpm_missing_suggests_corepack() {
        let error = CliError::from(ValidationError::PackageManagerMissing(PackageManager::Pnpm));
        let help = error.suggestion().unwrap();
        assert!(help.contains("npm install -g pnpm"));
        assert!(help.contains("corepack enable"));
    }

    #[test]
    fn npm_missing_points_at_nodejs() {
        let error = CliError::from(ValidationError::PackageManagerMissing(PackageManager::Npm));
        assert!(error.suggestion().unwrap().contains("https://nodejs.org/"));
    }

    #[test]
    fn spawn_failure_names_the_program() {
        let error = CliError::from(ScaffoldError::Execution(ExecutionError::new(
            "npx",
            &[],
            ExitKind::Spawn("No such file or directory".to_string()),
        )));
        assert!(error.suggestion().unwrap().contains("`npx`"));
    }

    #[test]
    fn terminal_error_keeps_its_context() {
        let source = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let error = CliError::from(anyhow::Error::new(source).context("failed to read confirmation"));

        assert_eq!(
            error.to_string(),
            "Terminal error: failed to read confirmation: stdin closed"
        );
        assert_eq!(error.suggestion(), None);
    }

    #[test]
    fn cancellation_has_no_suggestion() {
        assert_eq!(CliError::Cancelled.suggestion(), None);
    }
}
