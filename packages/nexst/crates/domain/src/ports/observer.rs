use crate::entities::step::StepOutcome;
use crate::error::ScaffoldError;

/// Progress notifications emitted around every step.
#[derive(Debug)]
pub enum StepEvent<'a> {
    /// `index` is 1-based.
    Started {
        index: usize,
        total: usize,
        label: &'a str,
    },
    Succeeded {
        label: &'a str,
        outcome: &'a StepOutcome,
    },
    Failed {
        label: &'a str,
        error: &'a ScaffoldError,
    },
}

impl StepEvent<'_> {
    pub fn label(&self) -> &str {
        match self {
            StepEvent::Started { label, .. }
            | StepEvent::Succeeded { label, .. }
            | StepEvent::Failed { label, .. } => label,
        }
    }
}

pub trait StepObserver: Send + Sync {
    fn on_event(&self, event: StepEvent<'_>);
}

/// Observer that discards every event.
pub struct SilentObserver;

impl StepObserver for SilentObserver {
    fn on_event(&self, _event: StepEvent<'_>) {}
}
