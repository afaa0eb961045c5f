use std::fs;
use std::path::Path;

use docdiff_api::DocumentKind;
use docdiff_extract_api::{ExtractorCapabilities, ExtractorError, ExtractorResult, TextExtractor};

const UTF8_BOM: &str = "\u{feff}";

/// Builtin extractor that reads Markdown and plain text files verbatim.
#[derive(Debug, Default)]
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn id(&self) -> &'static str {
        "markdown"
    }

    fn label(&self) -> &'static str {
        "Markdown / plain text"
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        ExtractorCapabilities::new(false, false)
    }

    fn kinds(&self) -> &'static [DocumentKind] {
        &[DocumentKind::Markdown, DocumentKind::PlainText]
    }

    fn extract(&self, path: &Path) -> ExtractorResult<String> {
        let bytes = fs::read(path).map_err(|err| {
            ExtractorError::message(format!("failed to read {}: {err}", path.display()))
        })?;
        let text = String::from_utf8(bytes).map_err(|_| ExtractorError::InvalidText {
            path: path.display().to_string(),
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read text document");

        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_text_verbatim() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("doc.md");
        fs::write(&path, "# Title\n\n    indented code\n").expect("write file");

        let text = MarkdownExtractor.extract(&path).expect("extract");
        assert_eq!(text, "# Title\n\n    indented code\n");
    }

    #[test]
    fn strips_byte_order_mark() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("bom.txt");
        fs::write(&path, "\u{feff}hello").expect("write file");

        assert_eq!(MarkdownExtractor.extract(&path).expect("extract"), "hello");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).expect("write file");

        let err = MarkdownExtractor.extract(&path).expect_err("invalid text");
        assert!(matches!(err, ExtractorError::InvalidText { .. }));
    }

    #[test]
    fn missing_file_is_a_failure() {
        let temp = TempDir::new().expect("tempdir");
        let err = MarkdownExtractor
            .extract(&temp.path().join("absent.md"))
            .expect_err("missing file");
        assert!(err.to_string().contains("failed to read"));
    }
}
