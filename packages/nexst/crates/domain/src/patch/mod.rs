//! Conservative rewriting of files produced by third-party generators.
//!
//! A [`PatchRule`] names one expected call (e.g. `await app.listen(3000);`) and
//! the text it should become. The rule refuses to touch anything it cannot
//! classify with confidence: several candidate calls, a call whose argument
//! list never closes, or one with more than one argument, are reported as
//! [`PatchResult::Ambiguous`] and the file is left as it was.

mod args;

use crate::error::ScaffoldError;
use regex::Regex;
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

pub use args::{closing_paren, split_arguments};

/// Outcome of applying a [`PatchRule`] to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResult {
    /// The file was rewritten.
    Applied,

    /// Nothing matched. `already_patched` is set when a candidate call exists but
    /// already reads the configured value.
    NotFound { already_patched: bool },

    /// The file deviates from the expected shape; `snippet` is the raw matched text.
    Ambiguous { snippet: String },
}

impl PatchResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, PatchResult::Applied)
    }
}

/// A rewrite of one call site in generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRule {
    /// Exact text emitted by an unmodified generator.
    pub literal: String,

    /// Call prefix used when the literal is absent, without the parenthesis.
    pub invocation: String,

    /// Full replacement statement.
    pub replacement: String,
}

/// Result of the pure rewrite: the classification and, when applied, the new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub result: PatchResult,
    pub content: Option<String>,
}

impl Rewrite {
    fn unchanged(result: PatchResult) -> Self {
        Self {
            result,
            content: None,
        }
    }
}

impl PatchRule {
    pub fn new(
        literal: impl Into<String>,
        invocation: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            literal: literal.into(),
            invocation: invocation.into(),
            replacement: replacement.into(),
        }
    }

    /// Makes a NestJS bootstrap read `PORT` from the environment, falling back
    /// to `fallback_port`.
    pub fn listen_port(fallback_port: u16) -> Self {
        Self::new(
            "await app.listen(3000);",
            "await app.listen",
            format!(
                "await app.listen(Number(process.env.PORT) || {});",
                fallback_port
            ),
        )
    }

    fn call_pattern(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(r"{}\(", regex::escape(&self.invocation)))
    }

    /// Classifies `content` and computes the rewritten text without touching disk.
    pub fn rewrite(&self, content: &str) -> Result<Rewrite, regex::Error> {
        match content.matches(self.literal.as_str()).count() {
            0 => {}
            1 => {
                let patched = content.replacen(&self.literal, &self.replacement, 1);
                return Ok(self.finish(content, patched));
            }
            _ => {
                return Ok(Rewrite::unchanged(PatchResult::Ambiguous {
                    snippet: self.literal.clone(),
                }))
            }
        }

        // Each candidate spans `invocation(` up to its balanced `)` and a `;`.
        let pattern = self.call_pattern()?;
        let mut calls: Vec<(Range<usize>, &str)> = Vec::new();
        for open in pattern.find_iter(content) {
            let rest = &content[open.end()..];
            let Some(close) = closing_paren(rest) else {
                debug!("unterminated `{}` call", self.invocation);
                let line = content[open.start()..].lines().next().unwrap_or_default();
                return Ok(Rewrite::unchanged(PatchResult::Ambiguous {
                    snippet: line.to_string(),
                }));
            };
            if rest[close + 1..].starts_with(';') {
                calls.push((open.start()..open.end() + close + 2, &rest[..close]));
            }
        }

        let Some((range, arguments)) = calls.first().cloned() else {
            return Ok(Rewrite::unchanged(PatchResult::NotFound {
                already_patched: false,
            }));
        };
        let snippet = content[range.clone()].to_string();

        if calls.len() > 1 {
            debug!("multiple `{}` calls found", self.invocation);
            return Ok(Rewrite::unchanged(PatchResult::Ambiguous { snippet }));
        }

        if split_arguments(arguments).len() > 1 {
            return Ok(Rewrite::unchanged(PatchResult::Ambiguous { snippet }));
        }

        let mut patched = String::with_capacity(content.len() + self.replacement.len());
        patched.push_str(&content[..range.start]);
        patched.push_str(&self.replacement);
        patched.push_str(&content[range.end..]);

        Ok(self.finish(content, patched))
    }

    fn finish(&self, original: &str, patched: String) -> Rewrite {
        if patched == original {
            Rewrite::unchanged(PatchResult::NotFound {
                already_patched: true,
            })
        } else {
            Rewrite {
                result: PatchResult::Applied,
                content: Some(patched),
            }
        }
    }
}

/// Applies [`PatchRule`]s to files on disk.
pub struct SourcePatcher;

impl SourcePatcher {
    /// Reads `path`, rewrites it if the rule applies, and writes back only when
    /// the bytes changed.
    ///
    /// A missing file is fatal: it means the generator that should have
    /// produced it did not.
    pub fn apply(path: &Path, rule: &PatchRule) -> Result<PatchResult, ScaffoldError> {
        if !path.exists() {
            return Err(ScaffoldError::PrerequisiteMissing {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        let rewrite = rule.rewrite(&content)?;

        if let Some(patched) = rewrite.content {
            if patched.as_bytes() != content.as_bytes() {
                fs::write(path, patched).map_err(|e| ScaffoldError::io(path, e))?;
                debug!("patched {}", path.display());
            }
        }

        Ok(rewrite.result)
    }
}
