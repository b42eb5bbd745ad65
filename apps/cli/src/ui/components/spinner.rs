use crate::ui::{Icon, Theme};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(msg: impl Into<String>) -> Self {
        let pb = crate::ui::multi_progress().add(ProgressBar::new_spinner());
        let style = ProgressStyle::with_template("{spinner:.green} {prefix:.dim} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]);
        pb.set_style(style);
        pb.set_message(msg.into());
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb }
    }

    /// Short counter shown before the message, e.g. `[3/16]`.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.pb.set_prefix(prefix.into());
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.pb.finish_with_message(format!(
            "{} {}",
            Theme::success(Icon::Check),
            Theme::primary(msg.as_ref())
        ));
    }

    pub fn fail(&self, msg: impl AsRef<str>) {
        self.pb.finish_with_message(format!(
            "{} {}",
            Theme::error(Icon::Cross),
            Theme::muted(msg.as_ref())
        ));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
