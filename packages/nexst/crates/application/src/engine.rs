use domain::{ScaffoldError, StepEvent, StepObserver, StepOutcome};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Wraps one labeled unit of work with start/success/failure reporting.
///
/// Beyond the position counter used for "step i of n" reporting the engine
/// keeps no state between steps. A failure is reported and handed back
/// unchanged; nothing is retried.
pub struct StepEngine<'a> {
    observer: &'a dyn StepObserver,
    total: usize,
    index: AtomicUsize,
}

impl<'a> StepEngine<'a> {
    pub fn new(observer: &'a dyn StepObserver, total: usize) -> Self {
        Self {
            observer,
            total,
            index: AtomicUsize::new(0),
        }
    }

    pub async fn execute<F, Fut>(&self, label: &str, action: F) -> Result<StepOutcome, ScaffoldError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StepOutcome, ScaffoldError>>,
    {
        let index = self.index.fetch_add(1, Ordering::Relaxed) + 1;

        debug!(step = label, index, total = self.total, "started");
        self.observer.on_event(StepEvent::Started {
            index,
            total: self.total,
            label,
        });

        match action().await {
            Ok(outcome) => {
                debug!(step = label, ?outcome, "succeeded");
                self.observer.on_event(StepEvent::Succeeded {
                    label,
                    outcome: &outcome,
                });
                Ok(outcome)
            }
            Err(error) => {
                warn!(step = label, %error, "failed");
                self.observer.on_event(StepEvent::Failed {
                    label,
                    error: &error,
                });
                Err(error)
            }
        }
    }
}
