//! Options controlling how two texts are compared.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collapse::DEFAULT_CONTEXT_LINES;
use crate::pairing::PairingStrategy;
use crate::{Error, Result};

/// Tunables for the text diff pipeline.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it changes:
///
/// ```toml
/// context_lines = 5
/// pairing = "greedy"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffOptions {
    /// Unchanged lines kept visible around each change.
    pub context_lines: usize,
    /// Replace-pair matching used for word highlighting.
    pub pairing: PairingStrategy,
    /// Normalize text even when neither side came from a PDF.
    pub force_normalize: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            pairing: PairingStrategy::Adjacent,
            force_normalize: false,
        }
    }
}

impl DiffOptions {
    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the text is not valid TOML or names an
    /// unknown option.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Config`] when it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let options = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?options, "loaded diff options");
        Ok(options)
    }

    /// Override the context size.
    #[must_use]
    pub const fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Override the pairing strategy.
    #[must_use]
    pub const fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    /// Override forced normalization.
    #[must_use]
    pub const fn with_force_normalize(mut self, force_normalize: bool) -> Self {
        self.force_normalize = force_normalize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let options = DiffOptions::from_toml_str("").expect("parse empty config");
        assert_eq!(options, DiffOptions::default());
        assert_eq!(options.context_lines, 3);
        assert_eq!(options.pairing, PairingStrategy::Adjacent);
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let options = DiffOptions::from_toml_str("pairing = \"greedy\"\ncontext_lines = 0")
            .expect("parse config");
        assert_eq!(
            options,
            DiffOptions::default()
                .with_pairing(PairingStrategy::Greedy)
                .with_context_lines(0)
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DiffOptions::from_toml_str("context = 4").expect_err("unknown field");
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "force_normalize = true").expect("write config");

        let options = DiffOptions::load(file.path()).expect("load config");
        assert!(options.force_normalize);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = DiffOptions::load(dir.path().join("missing.toml")).expect_err("missing file");
        assert!(matches!(err, Error::Io { .. }));
    }
}
