use crate::ui::{self, components::Spinner, diagnostic, Icon, Theme};
use nexst::application::PipelinePlan;
use nexst::domain::{PatchResult, PipelineStep, StepEvent, StepObserver};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A patch step remembered before the plan is consumed, so warnings can point
/// at the file.
#[derive(Debug, Clone)]
pub struct PatchTarget {
    pub label: String,
    pub path: PathBuf,
    pub invocation: String,
}

impl PatchTarget {
    pub fn collect(plan: &PipelinePlan) -> Vec<Self> {
        plan.steps()
            .iter()
            .filter_map(|step| match step {
                PipelineStep::Patch(patch) => Some(Self {
                    label: patch.label.clone(),
                    path: patch.path.clone(),
                    invocation: patch.rule.invocation.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// Renders step progress on the terminal.
///
/// With spinners off (no UX, or child output streaming through) each event
/// becomes a plain line instead. Patch warnings are printed as soon as their
/// step finishes, so they survive a later failure.
pub struct TerminalObserver {
    spinners: bool,
    current: Mutex<Option<Spinner>>,
    targets: Vec<PatchTarget>,
    port: u16,
    warnings: AtomicUsize,
}

impl TerminalObserver {
    pub fn new(spinners: bool) -> Self {
        Self {
            spinners,
            current: Mutex::new(None),
            targets: Vec::new(),
            port: 0,
            warnings: AtomicUsize::new(0),
        }
    }

    /// `port` is the fallback suggested when a listen call cannot be rewritten.
    pub fn with_patch_targets(mut self, targets: Vec<PatchTarget>, port: u16) -> Self {
        self.targets = targets;
        self.port = port;
        self
    }

    /// Number of patch warnings printed so far.
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    fn report_patch(&self, label: &str, result: &PatchResult) {
        let Some(target) = self.targets.iter().find(|t| t.label == label) else {
            ui::warn(format!("{}: {:?}", label, result));
            self.warnings.fetch_add(1, Ordering::Relaxed);
            return;
        };

        match result {
            PatchResult::Ambiguous { snippet } => {
                diagnostic::report_ambiguous_listen(&target.path, snippet, self.port);
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            PatchResult::NotFound {
                already_patched: false,
            } => {
                ui::warn(format!(
                    "WARNING: {}(...) not found in {}",
                    target.invocation,
                    target.path.display()
                ));
                ui::println(Theme::muted(
                    "  Please ensure your app reads PORT from process.env manually.",
                ));
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            PatchResult::NotFound {
                already_patched: true,
            } => {
                ui::println(Theme::muted(format!(
                    "  {} already reads PORT; left unchanged.",
                    target.path.display()
                )));
            }
            PatchResult::Applied => {}
        }
    }
}

impl StepObserver for TerminalObserver {
    fn on_event(&self, event: StepEvent<'_>) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());

        match event {
            StepEvent::Started {
                index,
                total,
                label,
            } => {
                let counter = format!("[{}/{}]", index, total);
                if self.spinners {
                    let spinner = Spinner::new(label);
                    spinner.set_prefix(counter);
                    *current = Some(spinner);
                } else {
                    ui::println(format!("{} {}", Theme::muted(counter), label));
                }
            }
            StepEvent::Succeeded { label, outcome } => {
                match current.take() {
                    Some(spinner) => spinner.success(label),
                    None => ui::println(format!(
                        "{} {}",
                        Theme::success(Icon::Check),
                        Theme::primary(label)
                    )),
                }
                if let Some(result) = outcome.warning() {
                    self.report_patch(label, result);
                }
            }
            StepEvent::Failed { label, .. } => match current.take() {
                Some(spinner) => spinner.fail(label),
                None => ui::println(format!(
                    "{} {}",
                    Theme::error(Icon::Cross),
                    Theme::muted(label)
                )),
            },
        }
    }
}
