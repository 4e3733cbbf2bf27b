//! Writing generated files
//!
//! Targets are planned and checked for existence before anything is written,
//! so a refused overwrite leaves the output directory untouched.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EmitError;

/// A rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub source: String,
}

/// Per-interface file name: `{prefix_}{interface}_mock{_test}.go`
pub fn mock_file_name(prefix: &str, interface: &str, for_test: bool) -> String {
    let mut name = String::new();
    if !prefix.is_empty() {
        name.push_str(prefix);
        name.push('_');
    }
    name.push_str(interface);
    name.push_str("_mock");
    if for_test {
        name.push_str("_test");
    }
    name.push_str(".go");
    name.to_lowercase().replace('-', "_")
}

/// Refuse two files with the same path, then refuse to overwrite existing
/// files unless `force` is set
pub fn check_targets(files: &[PendingFile], force: bool) -> Result<(), EmitError> {
    let mut seen = HashSet::new();
    if let Some(dup) = files.iter().find(|f| !seen.insert(f.path.as_path())) {
        return Err(EmitError::DuplicateTarget(dup.path.clone()));
    }
    if force {
        return Ok(());
    }
    match files.iter().find(|f| f.path.exists()) {
        Some(existing) => Err(EmitError::AlreadyExists(existing.path.clone())),
        None => Ok(()),
    }
}

/// Write every file, creating parent directories as needed
pub fn write_all(files: &[PendingFile]) -> Result<Vec<PathBuf>, EmitError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        ensure_parent(&file.path)?;
        fs::write(&file.path, &file.source)?;
        tracing::info!("Wrote {}", file.path.display());
        written.push(file.path.clone());
    }
    Ok(written)
}

fn ensure_parent(path: &Path) -> Result<(), EmitError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mock_file_name() {
        assert_eq!(mock_file_name("", "Client", false), "client_mock.go");
        assert_eq!(mock_file_name("Test", "Client", false), "test_client_mock.go");
        assert_eq!(mock_file_name("", "HTTPClient", true), "httpclient_mock_test.go");
        assert_eq!(mock_file_name("my-prefix", "Store", false), "my_prefix_store_mock.go");
    }

    #[test]
    fn test_check_targets() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("client_mock.go");
        fs::write(&existing, "package mocks\n").unwrap();

        let files = vec![
            PendingFile {
                path: dir.path().join("store_mock.go"),
                source: String::new(),
            },
            PendingFile {
                path: existing.clone(),
                source: String::new(),
            },
        ];

        let err = check_targets(&files, false).unwrap_err();
        assert_eq!(err.to_string(), format!("filename {} already exists", existing.display()));
        assert!(check_targets(&files, true).is_ok());
    }

    #[test]
    fn test_duplicate_targets_rejected_even_when_forced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(mock_file_name("", "HTTPClient", false));
        let files = vec![
            PendingFile {
                path: path.clone(),
                source: "package a\n".to_string(),
            },
            PendingFile {
                path: dir.path().join(mock_file_name("", "HttpClient", false)),
                source: "package b\n".to_string(),
            },
        ];

        for force in [false, true] {
            let err = check_targets(&files, force).unwrap_err();
            assert!(matches!(err, EmitError::DuplicateTarget(ref p) if p == &path));
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_write_all_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("mocks").join("client_mock.go");
        let files = vec![PendingFile {
            path: path.clone(),
            source: "package mocks\n".to_string(),
        }];

        let written = write_all(&files).unwrap();
        assert_eq!(written, vec![path.clone()]);
        assert_eq!(fs::read_to_string(path).unwrap(), "package mocks\n");
    }
}
