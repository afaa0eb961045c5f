use serde::{Deserialize, Serialize};

/// A complete comparison result ready to be rendered.
///
/// A serialized `summary` is ignored on input; it is always recounted from
/// `lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDiffDocument")]
pub struct DiffDocument {
    /// Display name of the compared document.
    pub file_name: String,
    /// Rendering units in document order.
    pub lines: Vec<DiffLine>,
    /// Counts of added and removed lines.
    pub summary: DiffSummary,
}

#[derive(Deserialize)]
struct RawDiffDocument {
    file_name: String,
    #[serde(default)]
    lines: Vec<DiffLine>,
}

impl From<RawDiffDocument> for DiffDocument {
    fn from(raw: RawDiffDocument) -> Self {
        Self::new(raw.file_name, raw.lines)
    }
}

impl DiffDocument {
    /// Build a document, deriving the summary from `lines`.
    #[must_use]
    pub fn new(file_name: impl Into<String>, lines: Vec<DiffLine>) -> Self {
        let summary = DiffSummary::from_lines(&lines);
        Self {
            file_name: file_name.into(),
            lines,
            summary,
        }
    }

    /// Returns `true` when neither side differs from the other.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.summary.changes == 0
    }
}

/// Summary counts for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffSummary {
    /// Number of added lines.
    pub additions: usize,
    /// Number of removed lines.
    pub deletions: usize,
    /// Total number of changed lines (`additions + deletions`).
    pub changes: usize,
}

impl DiffSummary {
    /// A summary with no changes at all.
    pub const ZERO: Self = Self {
        additions: 0,
        deletions: 0,
        changes: 0,
    };

    /// Construct a summary; `changes` is always derived from the other two counts.
    #[must_use]
    pub const fn new(additions: usize, deletions: usize) -> Self {
        Self {
            additions,
            deletions,
            changes: additions + deletions,
        }
    }

    /// Count added and removed lines.
    #[must_use]
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        let (additions, deletions) =
            lines
                .iter()
                .fold((0, 0), |(added, removed), line| match line.kind() {
                    LineKind::Added => (added + 1, removed),
                    LineKind::Removed => (added, removed + 1),
                    LineKind::Unchanged => (added, removed),
                });
        Self::new(additions, deletions)
    }
}

/// One line of a comparison.
///
/// Word-level highlighting only exists on changed lines and collapsible runs
/// only start on unchanged lines, so each variant carries just the payload
/// that is legal for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiffLine {
    /// Line present on both sides.
    Unchanged {
        /// Line text.
        content: String,
        /// 1-based line number in the original text.
        old_line: usize,
        /// 1-based line number in the modified text.
        new_line: usize,
        /// Length of the collapsible run starting at this line, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsible_count: Option<usize>,
    },
    /// Line present only in the original text.
    Removed {
        /// Line text.
        content: String,
        /// 1-based line number in the original text.
        old_line: usize,
        /// Intra-line spans when paired with the following added line.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        word_diff: Option<Vec<WordSpan>>,
    },
    /// Line present only in the modified text.
    Added {
        /// Line text.
        content: String,
        /// 1-based line number in the modified text.
        new_line: usize,
        /// Intra-line spans when paired with the preceding removed line.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        word_diff: Option<Vec<WordSpan>>,
    },
}

impl DiffLine {
    /// An unchanged line with no collapsible marker.
    #[must_use]
    pub fn unchanged(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self::Unchanged {
            content: content.into(),
            old_line,
            new_line,
            collapsible_count: None,
        }
    }

    /// A removed line without word highlighting.
    #[must_use]
    pub fn removed(content: impl Into<String>, old_line: usize) -> Self {
        Self::Removed {
            content: content.into(),
            old_line,
            word_diff: None,
        }
    }

    /// An added line without word highlighting.
    #[must_use]
    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self::Added {
            content: content.into(),
            new_line,
            word_diff: None,
        }
    }

    /// The classification of this line.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        match self {
            Self::Unchanged { .. } => LineKind::Unchanged,
            Self::Removed { .. } => LineKind::Removed,
            Self::Added { .. } => LineKind::Added,
        }
    }

    /// Line text.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Unchanged { content, .. }
            | Self::Removed { content, .. }
            | Self::Added { content, .. } => content,
        }
    }

    /// Line number in the original text, if the line exists there.
    #[must_use]
    pub const fn old_line_number(&self) -> Option<usize> {
        match self {
            Self::Unchanged { old_line, .. } | Self::Removed { old_line, .. } => Some(*old_line),
            Self::Added { .. } => None,
        }
    }

    /// Line number in the modified text, if the line exists there.
    #[must_use]
    pub const fn new_line_number(&self) -> Option<usize> {
        match self {
            Self::Unchanged { new_line, .. } | Self::Added { new_line, .. } => Some(*new_line),
            Self::Removed { .. } => None,
        }
    }

    /// Intra-line spans for a paired line.
    #[must_use]
    pub fn word_diff(&self) -> Option<&[WordSpan]> {
        match self {
            Self::Removed { word_diff, .. } | Self::Added { word_diff, .. } => {
                word_diff.as_deref()
            }
            Self::Unchanged { .. } => None,
        }
    }

    /// Whether the line is half of a replace pair.
    #[must_use]
    pub fn has_pair(&self) -> bool {
        self.word_diff().is_some()
    }

    /// Whether the line is an addition or a removal.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// Whether a collapsible run starts at this line.
    #[must_use]
    pub const fn is_collapsible_start(&self) -> bool {
        self.collapsible_count().is_some()
    }

    /// Number of lines in the collapsible run starting here.
    #[must_use]
    pub const fn collapsible_count(&self) -> Option<usize> {
        match self {
            Self::Unchanged {
                collapsible_count, ..
            } => *collapsible_count,
            Self::Removed { .. } | Self::Added { .. } => None,
        }
    }
}

/// Classification of a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Present on both sides.
    Unchanged,
    /// Present only on the modified side.
    Added,
    /// Present only on the original side.
    Removed,
}

/// A run of text inside a paired line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSpan {
    /// Span text, including any whitespace it covers.
    pub text: String,
    /// Whether the span was added, removed, or kept.
    pub kind: SpanKind,
}

impl WordSpan {
    /// Construct a span.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Classification of a word span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Text only in the modified line.
    Added,
    /// Text only in the original line.
    Removed,
    /// Text shared by both lines.
    Unchanged,
}
