use crate::config::Profile;
use crate::ports::process_runner::ExecutionError;
use nexst_manifest::PackageManager;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Bad or missing input caught before anything is written.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Project name is required")]
    MissingProjectName,

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("Folder already exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    #[error("{0} is not installed")]
    PackageManagerMissing(PackageManager),

    #[error("Port {0} is not a valid service port")]
    InvalidPort(u16),

    #[error("Frontend and backend cannot both listen on port {0}")]
    PortConflict(u16),

    #[error("The '{profile}' profile always uses the @/* import alias; --no-alias is not available")]
    AliasNotConfigurable { profile: Profile },

    #[error("Project contract is invalid: {0}")]
    InvalidContract(String),
}

/// Every failure that can abort a scaffold run.
///
/// Patch outcomes that only warrant a warning are not errors; see
/// [`crate::patch::PatchResult`].
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} not found - the generator that creates it may have failed", path.display())]
    PrerequisiteMissing { path: PathBuf },

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid patch pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ScaffoldError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error was raised before any state was created.
    pub fn is_validation(&self) -> bool {
        matches!(self, ScaffoldError::Validation(_))
    }
}
