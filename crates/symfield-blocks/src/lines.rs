//! Line splitting that keeps terminators.
//!
//! `\n`, `\r\n` and a lone `\r` all end a line. The terminator stays attached
//! to its line, so concatenating the pieces reproduces the input exactly.

/// Split `text` into lines, each keeping its own terminator.
///
/// # Example
/// ```
/// use symfield_blocks::lines::split_lines;
///
/// let lines = split_lines("a\r\nb\nc");
/// assert_eq!(lines, vec!["a\r\n", "b\n", "c"]);
/// assert_eq!(lines.concat(), "a\r\nb\nc");
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') {
                    i + 1
                } else {
                    i
                };
                lines.push(&text[start..=end]);
                start = end + 1;
                i = end;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Rewrite every line terminator as `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in split_lines(text) {
        let body = line.trim_end_matches(['\r', '\n']);
        out.push_str(body);
        if body.len() != line.len() {
            out.push('\n');
        }
    }
    out
}
