use domain::{ProcessRunner, RunOptions, ScaffoldConfig, ToolLocator, ValidationError};
use tracing::debug;

/// Checks that must pass before anything is written: the target directory is
/// free and the package manager answers `--version`.
pub async fn preflight(
    config: &ScaffoldConfig,
    locator: &dyn ToolLocator,
    runner: &dyn ProcessRunner,
) -> Result<(), ValidationError> {
    if config.root.exists() {
        return Err(ValidationError::DirectoryExists(config.root.clone()));
    }

    let pm = config.package_manager;
    let Some(path) = locator.locate(pm.binary()) else {
        return Err(ValidationError::PackageManagerMissing(pm));
    };
    debug!(package_manager = %pm, path = %path.display(), "package manager located");

    // The root does not exist yet; run from its parent.
    let cwd = config
        .root
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    let options = RunOptions::new(cwd, false);
    runner
        .run(pm.binary(), &["--version".to_string()], &options)
        .await
        .map_err(|error| {
            debug!(%error, "package manager version check failed");
            ValidationError::PackageManagerMissing(pm)
        })
}
