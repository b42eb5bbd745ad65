use std::io;

/// Yes/no question defaulting to yes. Ctrl-C counts as "no".
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let answer = crate::ui::multi_progress()
        .suspend(|| cliclack::confirm(prompt).initial_value(true).interact());

    match answer {
        Ok(answer) => Ok(answer),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(false),
        Err(e) => Err(e),
    }
}
