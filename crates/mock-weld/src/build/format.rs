//! Running the Go formatter over written files

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::EmitError;

/// Formatter binary invoked as `<binary> -w <file>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    binary: String,
}

impl Formatter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Find the binary in PATH
    pub fn locate(&self) -> Result<PathBuf, EmitError> {
        which::which(&self.binary).map_err(|_| EmitError::FormatterNotFound(self.binary.clone()))
    }

    /// Rewrite each file in place
    pub fn format_all(&self, paths: &[PathBuf]) -> Result<(), EmitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let exe = self.locate()?;
        for path in paths {
            self.run(&exe, path)?;
        }
        Ok(())
    }

    fn run(&self, exe: &Path, path: &Path) -> Result<(), EmitError> {
        tracing::debug!("Formatting {} with {}", path.display(), exe.display());
        let output = Command::new(exe).arg("-w").arg(path).output()?;

        if !output.status.success() {
            return Err(EmitError::FormatterFailed {
                binary: self.binary.clone(),
                path: path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
