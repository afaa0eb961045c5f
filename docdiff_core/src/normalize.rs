//! Canonicalization of text extracted from laid-out documents.
//!
//! PDF extraction produces irregular spacing and blank lines that would
//! otherwise dominate a line diff. Markdown and plain text are never passed
//! through here.

/// Normalize extracted text.
///
/// Line endings become `\n`, runs of spaces and tabs become one space, every
/// line is trimmed and blank lines are dropped, so consecutive newlines
/// collapse into one. The function is idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .split('\n')
        .map(collapse_horizontal_whitespace)
        .filter_map(|line| {
            let trimmed = line.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_horizontal_whitespace(line: &str) -> String {
    let mut collapsed = String::with_capacity(line.len());
    let mut in_run = false;
    for ch in line.chars() {
        if ch == ' ' || ch == '\t' {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(ch);
            in_run = false;
        }
    }
    collapsed
}
