use crate::entities::invocation::Invocation;
use crate::patch::{PatchResult, PatchRule};
use nexst_manifest::PackageManager;
use std::fmt;
use std::path::PathBuf;

/// One unit of the scaffolding pipeline.
///
/// Each variant carries only the data it needs, so a plan can be inspected and
/// executed against a fake process runner.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStep {
    Generate(GeneratorStep),
    Install(InstallStep),
    Patch(PatchStep),
    Write(WriteStep),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Generate,
    Install,
    Patch,
    Write,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Generate => "generate",
            StepKind::Install => "install",
            StepKind::Patch => "patch",
            StepKind::Write => "write",
        };
        f.write_str(name)
    }
}

/// Runs an external scaffolding tool.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorStep {
    pub label: String,
    pub invocation: Invocation,
}

/// Installs dependencies with the package manager.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallStep {
    pub label: String,
    pub invocation: Invocation,
}

impl InstallStep {
    /// `<pm> install` in `dir`.
    pub fn base(label: impl Into<String>, pm: PackageManager, dir: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            invocation: Invocation::new(pm.binary(), dir).arg("install"),
        }
    }

    /// `<pm> add [-D] <packages>` in `dir`.
    pub fn add(
        label: impl Into<String>,
        pm: PackageManager,
        dir: impl Into<PathBuf>,
        packages: &[&str],
        dev: bool,
    ) -> Self {
        let mut invocation = Invocation::new(pm.binary(), dir).arg("add");
        if dev {
            invocation = invocation.arg("-D");
        }

        Self {
            label: label.into(),
            invocation: invocation.args(packages.iter().copied()),
        }
    }
}

/// Rewrites a known pattern in a generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchStep {
    pub label: String,
    pub path: PathBuf,
    pub rule: PatchRule,
}

/// Writes a fully rendered file.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStep {
    pub label: String,
    pub path: PathBuf,
    pub contents: String,
}

impl PipelineStep {
    pub fn label(&self) -> &str {
        match self {
            PipelineStep::Generate(step) => &step.label,
            PipelineStep::Install(step) => &step.label,
            PipelineStep::Patch(step) => &step.label,
            PipelineStep::Write(step) => &step.label,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            PipelineStep::Generate(_) => StepKind::Generate,
            PipelineStep::Install(_) => StepKind::Install,
            PipelineStep::Patch(_) => StepKind::Patch,
            PipelineStep::Write(_) => StepKind::Write,
        }
    }

    /// The external command this step spawns, if any.
    pub fn invocation(&self) -> Option<&Invocation> {
        match self {
            PipelineStep::Generate(step) => Some(&step.invocation),
            PipelineStep::Install(step) => Some(&step.invocation),
            PipelineStep::Patch(_) | PipelineStep::Write(_) => None,
        }
    }

    /// One-line description of the effect, for dry runs.
    pub fn describe(&self) -> String {
        match self {
            PipelineStep::Generate(GeneratorStep { invocation, .. })
            | PipelineStep::Install(InstallStep { invocation, .. }) => {
                format!(
                    "{} (in {})",
                    invocation.command_line(),
                    invocation.working_dir.display()
                )
            }
            PipelineStep::Patch(step) => format!("patch {}", step.path.display()),
            PipelineStep::Write(step) => format!("write {}", step.path.display()),
        }
    }
}

/// What a successful step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Ran,
    Patched(PatchResult),
    Wrote { path: PathBuf, bytes: usize },
}

impl StepOutcome {
    /// Non-fatal problem the operator should see, if any.
    pub fn warning(&self) -> Option<&PatchResult> {
        match self {
            StepOutcome::Patched(result) if !result.is_applied() => Some(result),
            _ => None,
        }
    }
}
