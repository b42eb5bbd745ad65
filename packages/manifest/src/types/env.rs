use std::fmt;

/// One line of an example environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLine {
    Comment(String),
    Blank,
    Var { key: String, value: String },
}

/// Ordered key/value pairs (with comments) written verbatim to an `.env.*example` file.
///
/// No validation happens beyond the literal substitution the caller performs
/// when building the values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvTemplate {
    lines: Vec<EnvLine>,
}

impl EnvTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.lines.push(EnvLine::Comment(text.into()));
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.lines.push(EnvLine::Var {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(EnvLine::Blank);
        self
    }

    pub fn lines(&self) -> &[EnvLine] {
        &self.lines
    }

    /// Value of the first assignment to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            EnvLine::Var { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EnvTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                EnvLine::Comment(text) => writeln!(f, "# {}", text)?,
                EnvLine::Blank => writeln!(f)?,
                EnvLine::Var { key, value } => writeln!(f, "{}={}", key, value)?,
            }
        }
        Ok(())
    }
}
