use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Backend port was not configured automatically")]
#[diagnostic(
    code(nexst::patch::ambiguous),
    severity(Warning)
)]
pub struct AmbiguousListen {
    #[help]
    pub advice: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("custom listen call left untouched")]
    pub span: SourceSpan,
}

impl AmbiguousListen {
    pub fn new(file_name: &str, content: &str, snippet: &str, port: u16) -> Self {
        let span = match content.find(snippet) {
            Some(offset) => SourceSpan::new(offset.into(), snippet.len()),
            None => SourceSpan::new(SourceOffset::from(0), 0),
        };

        Self {
            advice: format!(
                "Make the server read PORT itself, e.g. `await app.listen(Number(process.env.PORT) || {});`",
                port
            ),
            src: NamedSource::new(file_name, content.to_string()),
            span,
        }
    }
}

/// Prints the ambiguous call in context. Falls back to a plain warning when
/// the file can no longer be read.
pub fn report_ambiguous_listen(path: &Path, snippet: &str, port: u16) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            crate::ui::warn(format!(
                "{} uses a custom listen call: {}",
                path.display(),
                snippet
            ));
            return;
        }
    };

    let report = miette::Report::new(AmbiguousListen::new(
        &path.display().to_string(),
        &content,
        snippet,
        port,
    ));
    crate::ui::println(format!("{:?}", report));
}
