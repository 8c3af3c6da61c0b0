//! External code formatter collaborator.
//!
//! The commented-print rule hands uncommented code to an external Python
//! formatter rather than re-wrapping it heuristically. The formatter is
//! injected as a capability ([`CodeFormatter`]) so the rewrite engine never
//! probes the environment itself; availability is checked once at startup
//! by the caller.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{bail, Context};
use tempfile::NamedTempFile;

use crate::Result;

/// Capability to format a snippet of code to a given line width.
///
/// `Sync` so a single instance can be shared across the parallel per-file
/// workers.
pub trait CodeFormatter: Sync {
    /// Format `code`, returning the formatted text.
    ///
    /// An error means the formatter could not be invoked or rejected the
    /// input; callers treat this as a per-line decline, not a fatal
    /// condition.
    fn format(&self, code: &str, max_width: usize) -> Result<String>;

    /// Whether the formatter can be invoked at all. Checked once at
    /// startup; a negative answer aborts the run before any file is
    /// touched.
    fn is_available(&self) -> bool {
        true
    }
}

/// Formatter backed by the `black` binary (or a compatible replacement).
///
/// Each invocation writes the code to a uniquely-named temporary file,
/// formats it in place, and reads the result back. The temp file is
/// removed when it goes out of scope, on success and failure alike.
pub struct BlackFormatter {
    program: String,
}

impl BlackFormatter {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        BlackFormatter {
            program: program.into(),
        }
    }
}

impl CodeFormatter for BlackFormatter {
    fn format(&self, code: &str, max_width: usize) -> Result<String> {
        let mut tmp = NamedTempFile::new().context("failed to create formatter temp file")?;
        tmp.write_all(code.as_bytes())
            .context("failed to write formatter temp file")?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;

        let status = Command::new(&self.program)
            .arg("--line-length")
            .arg(max_width.to_string())
            .arg("--quiet")
            .arg(tmp.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("failed to invoke '{}'", self.program))?;

        if !status.success() {
            bail!("'{}' exited with {status}", self.program);
        }

        std::fs::read_to_string(tmp.path())
            .with_context(|| format!("failed to read back output of '{}'", self.program))
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}
