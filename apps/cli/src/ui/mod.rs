use indicatif::MultiProgress;
use std::sync::OnceLock;

pub mod beauty;
pub mod components;
pub mod diagnostic;
pub mod theme;

pub use theme::{Icon, Theme};

static MULTI_PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

pub fn multi_progress() -> &'static MultiProgress {
    MULTI_PROGRESS.get_or_init(MultiProgress::new)
}

/// Whether spinners can be drawn. False when stderr is not a terminal.
pub fn progress_visible() -> bool {
    !multi_progress().is_hidden()
}

/// Where a line ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Progress,
    Stdout,
}

/// A hidden `MultiProgress` accepts `println` and drops the line, so it is
/// bypassed entirely when nothing is drawn.
fn print_through(progress: &MultiProgress, line: &str) -> Sink {
    if !progress.is_hidden() && progress.println(line).is_ok() {
        return Sink::Progress;
    }
    println!("{}", line);
    Sink::Stdout
}

pub fn warn(message: impl AsRef<str>) {
    let msg = format!("{} {}", Theme::warning(Icon::Warning), message.as_ref());
    print_through(multi_progress(), &msg);
}

pub fn println(message: impl AsRef<str>) {
    print_through(multi_progress(), message.as_ref());
}

/// A horizontal rule, the width of the summary box.
pub fn rule() -> String {
    "━".repeat(60)
}
