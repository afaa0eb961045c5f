//! Standalone HTML rendering of a [`DiffDocument`].

use crate::navigation::CollapsedState;
use crate::view::{placeholder_label, split_rows, unified_rows, SideRow, ViewMode, ViewRow};
use crate::{DiffDocument, DiffLine, LineKind, SpanKind};

const STYLES: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%;font-family:monospace;font-size:13px}\
td{padding:0 .5rem;white-space:pre-wrap;vertical-align:top}\
td.num{color:#6e7781;text-align:right;width:3rem;user-select:none}\
tr.added{background:#e6ffec}tr.removed{background:#ffebe9}\
tr.collapsed td{background:#f6f8fa;color:#57606a;text-align:center}\
span.word-added{background:#abf2bc}span.word-removed{background:#ff818266}\
.columns{display:flex;gap:1rem}.columns>table{flex:1}";

/// Options for [`render_html`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Page title.
    pub title: String,
    /// Name shown for the original document.
    pub original_name: String,
    /// Name shown for the modified document.
    pub modified_name: String,
    /// Layout of the diff table.
    pub view_mode: ViewMode,
    /// Render every line instead of collapsed placeholders.
    pub expand_collapsed: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Diff Report".to_string(),
            original_name: String::new(),
            modified_name: String::new(),
            view_mode: ViewMode::Unified,
            expand_collapsed: true,
        }
    }
}

impl ExportOptions {
    /// Set the displayed file names.
    #[must_use]
    pub fn with_names(mut self, original: impl Into<String>, modified: impl Into<String>) -> Self {
        self.original_name = original.into();
        self.modified_name = modified.into();
        self
    }

    /// Set the layout.
    #[must_use]
    pub const fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Keep collapsible sections folded in the output.
    #[must_use]
    pub const fn with_expand_collapsed(mut self, expand_collapsed: bool) -> Self {
        self.expand_collapsed = expand_collapsed;
        self
    }
}

/// Render `document` as a complete HTML page.
#[must_use]
pub fn render_html(document: &DiffDocument, options: &ExportOptions) -> String {
    let state = if options.expand_collapsed {
        CollapsedState::new()
    } else {
        CollapsedState::all_collapsed(&document.lines)
    };

    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    output.push_str(&format!(
        "<title>{}</title>\n",
        html_escape::encode_text(&options.title)
    ));
    output.push_str(&format!("<style>{STYLES}</style>\n</head>\n<body>\n"));
    output.push_str(&format!(
        "<h1>{}</h1>\n",
        html_escape::encode_text(&options.title)
    ));

    output.push_str("<div class=\"meta\">\n");
    if !options.original_name.is_empty() {
        output.push_str(&format!(
            "<p><strong>Original:</strong> {}</p>\n",
            html_escape::encode_text(&options.original_name)
        ));
    }
    if !options.modified_name.is_empty() {
        output.push_str(&format!(
            "<p><strong>Modified:</strong> {}</p>\n",
            html_escape::encode_text(&options.modified_name)
        ));
    }
    output.push_str(&format!(
        "<p class=\"summary\">{} additions, {} deletions, {} changes</p>\n</div>\n",
        document.summary.additions, document.summary.deletions, document.summary.changes
    ));

    match options.view_mode {
        ViewMode::Unified => render_unified(&mut output, document, &state),
        ViewMode::Split => render_split(&mut output, document, &state),
    }

    output.push_str("</body>\n</html>\n");
    tracing::debug!(
        file = %document.file_name,
        bytes = output.len(),
        view_mode = ?options.view_mode,
        "rendered html export"
    );
    output
}

fn render_unified(output: &mut String, document: &DiffDocument, state: &CollapsedState) {
    output.push_str("<table class=\"diff unified\">\n<tbody>\n");
    for row in unified_rows(document, state) {
        match row {
            ViewRow::Line { line, .. } => {
                output.push_str(&format!(
                    "<tr class=\"{}\"><td class=\"num\">{}</td><td class=\"num\">{}</td><td>{}{}</td></tr>\n",
                    row_class(line),
                    number_cell(line.old_line_number()),
                    number_cell(line.new_line_number()),
                    sign(line),
                    line_body(line)
                ));
            }
            ViewRow::Collapsed { count, .. } => push_placeholder(output, count, 3),
        }
    }
    output.push_str("</tbody>\n</table>\n");
}

fn render_split(output: &mut String, document: &DiffDocument, state: &CollapsedState) {
    let view = split_rows(document, state);
    output.push_str("<div class=\"columns\">\n");
    for column in [&view.left, &view.right] {
        output.push_str("<table class=\"diff split\">\n<tbody>\n");
        for row in column {
            match *row {
                SideRow::Line { number, line, .. } => {
                    output.push_str(&format!(
                        "<tr class=\"{}\"><td class=\"num\">{}</td><td>{}{}</td></tr>\n",
                        row_class(line),
                        number,
                        sign(line),
                        line_body(line)
                    ));
                }
                SideRow::Collapsed { count, .. } => push_placeholder(output, count, 2),
            }
        }
        output.push_str("</tbody>\n</table>\n");
    }
    output.push_str("</div>\n");
}

fn push_placeholder(output: &mut String, count: usize, columns: usize) {
    output.push_str(&format!(
        "<tr class=\"collapsed\"><td colspan=\"{columns}\">{}</td></tr>\n",
        placeholder_label(count)
    ));
}

const fn row_class(line: &DiffLine) -> &'static str {
    match line.kind() {
        LineKind::Added => "added",
        LineKind::Removed => "removed",
        LineKind::Unchanged => "unchanged",
    }
}

const fn sign(line: &DiffLine) -> &'static str {
    match line.kind() {
        LineKind::Added => "+",
        LineKind::Removed => "-",
        LineKind::Unchanged => " ",
    }
}

fn number_cell(number: Option<usize>) -> String {
    number.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn line_body(line: &DiffLine) -> String {
    let Some(spans) = line.word_diff() else {
        return html_escape::encode_text(line.content()).into_owned();
    };

    let mut body = String::new();
    for span in spans {
        let text = html_escape::encode_text(&span.text);
        match span.kind {
            SpanKind::Added => body.push_str(&format!("<span class=\"word-added\">{text}</span>")),
            SpanKind::Removed => {
                body.push_str(&format!("<span class=\"word-removed\">{text}</span>"));
            }
            SpanKind::Unchanged => body.push_str(&text),
        }
    }
    body
}
