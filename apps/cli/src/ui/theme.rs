use console::style;
use std::fmt;

/// Colour palette for nexst output.
pub struct Theme;

impl Theme {
    /// Brand green: headings, commands to copy.
    pub fn primary(text: impl fmt::Display) -> String {
        style(text).green().bright().bold().to_string()
    }

    pub fn bold(text: impl fmt::Display) -> String {
        style(text).bold().to_string()
    }

    pub fn success(text: impl fmt::Display) -> String {
        style(text).green().bold().to_string()
    }

    pub fn warning(text: impl fmt::Display) -> String {
        style(text).yellow().bold().to_string()
    }

    pub fn error(text: impl fmt::Display) -> String {
        style(text).red().bold().to_string()
    }

    /// File names the operator should edit.
    pub fn path(text: impl fmt::Display) -> String {
        style(text).color256(214).to_string()
    }

    pub fn muted(text: impl fmt::Display) -> String {
        style(text).dim().to_string()
    }
}

pub enum Icon {
    Check,
    Cross,
    Warning,
    Bullet,
    Bolt,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self {
            Icon::Check => "✓",
            Icon::Cross => "✗",
            Icon::Warning => "⚠",
            Icon::Bullet => "▸",
            Icon::Bolt => "⚡",
        };
        write!(f, "{}", icon)
    }
}
