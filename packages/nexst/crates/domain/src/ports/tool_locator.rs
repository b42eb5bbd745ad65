use std::path::PathBuf;

/// Finds executables on the host.
pub trait ToolLocator: Send + Sync {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}
