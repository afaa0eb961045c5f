use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kinds of documents docdiff knows how to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Markdown source, diffed verbatim.
    Markdown,
    /// Plain UTF-8 text, diffed verbatim.
    PlainText,
    /// PDF whose extracted text is normalized before diffing.
    Pdf,
}

impl DocumentKind {
    /// All supported kinds.
    pub const ALL: [Self; 3] = [Self::Markdown, Self::PlainText, Self::Pdf];

    /// Detect the kind from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "txt" | "text" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect the kind from a MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/markdown" | "text/x-markdown" => Some(Self::Markdown),
            "text/plain" => Some(Self::PlainText),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Whether text of this kind comes from raster/PDF extraction.
    #[must_use]
    pub const fn is_raster(self) -> bool {
        matches!(self, Self::Pdf)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::PlainText => "plain_text",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document whose text has been fully materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Display name, usually the file name.
    pub name: String,
    /// Detected document kind.
    pub kind: DocumentKind,
    /// Decoded or extracted text.
    pub text: String,
}

impl SourceDocument {
    /// Construct a source document.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            text: text.into(),
        }
    }
}
