use crate::engine::StepEngine;
use crate::planner::PipelinePlan;
use domain::{
    Invocation, PatchResult, PipelineStep, ProcessRunner, RunOptions, ScaffoldError,
    SourcePatcher, StepObserver, StepOutcome,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Labels and outcomes of a completed run, in execution order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub steps: Vec<(String, StepOutcome)>,
}

impl RunSummary {
    /// Patch results that need the operator's attention.
    pub fn warnings(&self) -> impl Iterator<Item = (&str, &PatchResult)> {
        self.steps
            .iter()
            .filter_map(|(label, outcome)| outcome.warning().map(|w| (label.as_str(), w)))
    }
}

/// Dispatches each planned step to the process runner, the patcher or the
/// filesystem, stopping at the first failure.
pub struct PipelineExecutor<'a> {
    runner: &'a dyn ProcessRunner,
    observer: &'a dyn StepObserver,
    output_visible: bool,
}

impl<'a> PipelineExecutor<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        observer: &'a dyn StepObserver,
        output_visible: bool,
    ) -> Self {
        Self {
            runner,
            observer,
            output_visible,
        }
    }

    /// Runs the plan to completion, consuming it.
    pub async fn run(&self, plan: PipelinePlan) -> Result<RunSummary, ScaffoldError> {
        let root = plan.root().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| ScaffoldError::io(&root, e))?;
        info!(root = %root.display(), steps = plan.len(), "starting scaffold");

        let engine = StepEngine::new(self.observer, plan.len());
        let mut summary = RunSummary::default();

        for step in plan.into_steps() {
            let label = step.label().to_string();
            let outcome = engine.execute(&label, || self.perform(step)).await?;
            summary.steps.push((label, outcome));
        }

        info!(root = %root.display(), "scaffold complete");
        Ok(summary)
    }

    async fn perform(&self, step: PipelineStep) -> Result<StepOutcome, ScaffoldError> {
        match step {
            PipelineStep::Generate(step) => self.spawn(&step.invocation).await,
            PipelineStep::Install(step) => self.spawn(&step.invocation).await,
            PipelineStep::Patch(step) => {
                SourcePatcher::apply(&step.path, &step.rule).map(StepOutcome::Patched)
            }
            PipelineStep::Write(step) => write_file(&step.path, &step.contents),
        }
    }

    async fn spawn(&self, invocation: &Invocation) -> Result<StepOutcome, ScaffoldError> {
        let options = RunOptions::new(&invocation.working_dir, self.output_visible);
        self.runner
            .run(&invocation.program, &invocation.args, &options)
            .await?;
        Ok(StepOutcome::Ran)
    }
}

/// Writes into a directory an earlier step generated; a missing parent means
/// that step did not produce what it should have.
fn write_file(path: &Path, contents: &str) -> Result<StepOutcome, ScaffoldError> {
    if let Some(parent) = path.parent() {
        if !parent.is_dir() {
            return Err(ScaffoldError::PrerequisiteMissing {
                path: parent.to_path_buf(),
            });
        }
    }

    fs::write(path, contents).map_err(|e| ScaffoldError::io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");

    Ok(StepOutcome::Wrote {
        path: path.to_path_buf(),
        bytes: contents.len(),
    })
}
