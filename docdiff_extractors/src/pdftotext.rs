use std::env;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use docdiff_api::DocumentKind;
use docdiff_extract_api::{ExtractorCapabilities, ExtractorError, ExtractorResult, TextExtractor};
use wait_timeout::ChildExt;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const BINARY_ENV: &str = "DOCDIFF_PDFTOTEXT_BIN";
const TIMEOUT_ENV: &str = "DOCDIFF_PDFTOTEXT_TIMEOUT_SECS";
const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, Clone)]
struct PdftotextCli {
    binary: OsString,
    timeout: Duration,
}

impl PdftotextCli {
    fn from_env() -> Self {
        let binary = env::var_os(BINARY_ENV).unwrap_or_else(|| OsString::from("pdftotext"));
        let timeout = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            binary,
            timeout: Duration::from_secs(timeout),
        }
    }

    fn run(&self, pdf: &Path) -> ExtractorResult<ProcessOutput> {
        let mut command = Command::new(&self.binary);
        command.args(["-layout", "-enc", "UTF-8"]);
        command.arg(pdf);
        command.arg("-");
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|err| {
            ExtractorError::message(format!("failed to spawn pdftotext: {err}"))
        })?;

        let stdout_handle = child.stdout.take().map(|mut stdout| {
            thread::spawn(move || -> io::Result<Vec<u8>> {
                let mut buffer = Vec::new();
                stdout.read_to_end(&mut buffer)?;
                Ok(buffer)
            })
        });

        let stderr_handle = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || -> io::Result<Vec<u8>> {
                let mut buffer = Vec::new();
                stderr.read_to_end(&mut buffer)?;
                Ok(buffer)
            })
        });

        match child.wait_timeout(self.timeout) {
            Ok(Some(_)) => (),
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExtractorError::message(format!(
                    "pdftotext timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExtractorError::message(format!(
                    "failed waiting on pdftotext: {err}"
                )));
            }
        }

        let status = child
            .wait()
            .map_err(|err| ExtractorError::message(format!("failed to reap pdftotext: {err}")))?;

        let stdout = join_reader(stdout_handle, "stdout")?;
        let stderr = join_reader(stderr_handle, "stderr")?;

        if !status.success() {
            let code = status
                .code()
                .map_or_else(|| "terminated".to_string(), |c| c.to_string());
            return Err(ExtractorError::message(format!(
                "pdftotext failed with status {}: {}",
                code,
                stderr.trim()
            )));
        }

        Ok(ProcessOutput { stdout, stderr })
    }
}

fn join_reader(
    handle: Option<thread::JoinHandle<io::Result<Vec<u8>>>>,
    stream: &str,
) -> ExtractorResult<String> {
    match handle {
        Some(handle) => {
            let bytes = handle
                .join()
                .map_err(|_| {
                    ExtractorError::message(format!("failed to join pdftotext {stream} reader"))
                })?
                .map_err(|err| {
                    ExtractorError::message(format!("failed to read pdftotext {stream}: {err}"))
                })?;
            Ok(String::from_utf8_lossy(&bytes).to_string())
        }
        None => Ok(String::new()),
    }
}

#[derive(Debug)]
struct ProcessOutput {
    stdout: String,
    stderr: String,
}

/// PDF text extractor backed by poppler's `pdftotext` CLI.
///
/// The binary is taken from `DOCDIFF_PDFTOTEXT_BIN` (default `pdftotext` on
/// `PATH`) and killed after `DOCDIFF_PDFTOTEXT_TIMEOUT_SECS` (default 60).
#[derive(Debug)]
pub struct PdftotextExtractor {
    cli: PdftotextCli,
}

impl PdftotextExtractor {
    /// Construct an extractor configured from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cli: PdftotextCli::from_env(),
        }
    }

    /// Construct an extractor that runs a specific binary.
    #[must_use]
    pub fn with_binary(binary: impl Into<OsString>, timeout: Duration) -> Self {
        Self {
            cli: PdftotextCli {
                binary: binary.into(),
                timeout,
            },
        }
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdftotextExtractor {
    fn id(&self) -> &'static str {
        "pdftotext"
    }

    fn label(&self) -> &'static str {
        "Poppler pdftotext"
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        ExtractorCapabilities::new(true, true)
    }

    fn kinds(&self) -> &'static [DocumentKind] {
        &[DocumentKind::Pdf]
    }

    fn extract(&self, path: &Path) -> ExtractorResult<String> {
        let output = self.cli.run(path)?;
        if !output.stderr.trim().is_empty() {
            tracing::warn!(
                path = %path.display(),
                stderr = %output.stderr.trim(),
                "pdftotext reported warnings"
            );
        }

        let text = join_pages(&output.stdout);
        if text.is_empty() {
            return Err(ExtractorError::message("No text content extracted from PDF"));
        }
        tracing::debug!(path = %path.display(), chars = text.len(), "extracted PDF text");
        Ok(text)
    }
}

/// pdftotext ends every page with a form feed; pages become newline separated.
fn join_pages(raw: &str) -> String {
    raw.split(PAGE_BREAK)
        .map(str::trim_end)
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_joined_with_newlines() {
        let raw = "Page one\n\u{c}Page two  \n\u{c}";
        assert_eq!(join_pages(raw), "Page one\nPage two");
    }

    #[test]
    fn blank_output_is_empty() {
        assert_eq!(join_pages("\u{c}  \n\u{c}"), "");
    }

    #[test]
    fn missing_binary_fails_to_spawn() {
        let extractor = PdftotextExtractor::with_binary(
            "/nonexistent/docdiff-pdftotext",
            Duration::from_secs(1),
        );
        let err = extractor
            .extract(Path::new("missing.pdf"))
            .expect_err("spawn failure");
        assert!(err.to_string().contains("failed to spawn pdftotext"));
    }
}
