use similar::TextDiff;

/// Lines of context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// Unified diff of expected vs actual output, labelled `Exp` and `Out`.
///
/// Identical inputs produce an empty string. A missing final newline on one
/// side shows up as an added or removed blank line.
pub fn unified_diff(expected: &str, actual: &str) -> String {
    let exp = split_lines(expected);
    let out = split_lines(actual);
    let exp: Vec<&str> = exp.iter().map(String::as_str).collect();
    let out: Vec<&str> = out.iter().map(String::as_str).collect();

    TextDiff::configure()
        .diff_slices(exp.as_slice(), out.as_slice())
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header("Exp", "Out")
        .to_string()
}

/// Split after each newline and terminate the last piece with one more, so
/// every line ends in `\n`.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    match lines.last_mut() {
        Some(last) if !text.ends_with('\n') => last.push('\n'),
        _ => lines.push("\n".to_string()),
    }
    lines
}
