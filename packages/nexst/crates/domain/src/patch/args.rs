/// Walks `source`, calling `visit(offset, char, depth)` for every character
/// outside a string literal. `depth` is the bracket nesting before the
/// character. Stops early when `visit` returns `false`.
fn walk(source: &str, mut visit: impl FnMut(usize, char, usize) -> bool) {
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in source.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if !visit(i, c, depth) {
            return;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
}

/// Splits a call's argument list on top-level commas.
///
/// Commas nested in brackets or inside string literals do not separate
/// arguments. Empty segments (a trailing comma, or no arguments at all) are
/// dropped.
pub fn split_arguments(source: &str) -> Vec<&str> {
    let mut arguments = Vec::new();
    let mut start = 0;

    walk(source, |i, c, depth| {
        if c == ',' && depth == 0 {
            arguments.push(&source[start..i]);
            start = i + c.len_utf8();
        }
        true
    });
    arguments.push(&source[start..]);

    arguments
        .into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .collect()
}

/// Offset of the `)` that closes an argument list starting at the beginning of
/// `source`, skipping nested calls, callbacks and string literals.
///
/// `None` when the list is never closed.
pub fn closing_paren(source: &str) -> Option<usize> {
    let mut found = None;
    walk(source, |i, c, depth| {
        if c == ')' && depth == 0 {
            found = Some(i);
            return false;
        }
        true
    });
    found
}
