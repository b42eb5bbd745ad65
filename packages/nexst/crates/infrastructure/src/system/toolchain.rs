use domain::ports::tool_locator::ToolLocator;
use std::path::PathBuf;
use tracing::debug;

/// Looks executables up on `PATH`.
pub struct PathToolLocator;

impl ToolLocator for PathToolLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        match which::which(program) {
            Ok(path) => {
                debug!(program, path = %path.display(), "found on PATH");
                Some(path)
            }
            Err(e) => {
                debug!(program, error = %e, "not found on PATH");
                None
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn finds_a_shell() {
        assert!(PathToolLocator.locate("sh").is_some());
    }

    #[test]
    fn misses_unknown_programs() {
        assert!(PathToolLocator
            .locate("nexst-definitely-not-installed")
            .is_none());
    }
}
