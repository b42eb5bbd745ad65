use domain::ScaffoldError;
use std::fmt;
use std::path::{Path, PathBuf};

/// What the operator is told after a run aborts.
///
/// Built once at the top level. It only points at partial state; deleting it
/// is left to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub message: String,
    /// Captured stderr of the failed command, if any.
    pub details: Option<String>,
    /// Project root left behind by the aborted run.
    pub partial_root: Option<PathBuf>,
}

impl FailureReport {
    pub fn new(error: &ScaffoldError, root: &Path) -> Self {
        let details = match error {
            ScaffoldError::Execution(e) => e.stderr.clone().filter(|s| !s.trim().is_empty()),
            _ => None,
        };

        // A validation failure happens before the root is created, so an
        // existing directory at that point belongs to someone else.
        let partial_root = if !error.is_validation() && root.exists() {
            Some(root.to_path_buf())
        } else {
            None
        };

        Self {
            message: error.to_string(),
            details,
            partial_root,
        }
    }

    pub fn cleanup_command(&self) -> Option<String> {
        self.partial_root
            .as_ref()
            .map(|root| format!("rm -rf {}", root.display()))
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FATAL ERROR")?;
        writeln!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            writeln!(f)?;
            writeln!(f, "{}", details)?;
        }

        if let Some(command) = self.cleanup_command() {
            writeln!(f)?;
            writeln!(f, "Partial scaffold created.")?;
            writeln!(f, "You may want to delete the folder:")?;
            writeln!(f, "  {}", command)?;
        }

        Ok(())
    }
}
