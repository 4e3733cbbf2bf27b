//! Package loading
//!
//! Loaders turn a search location into a `SourcePackage`. The JSON loader
//! reads descriptors written by the Go-side scanner.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;
use crate::ir::SourcePackage;

/// Source of scanned packages
pub trait PackageLoader {
    /// Load the package found at `location`
    fn load(&self, location: &str) -> Result<SourcePackage, ExtractError>;
}

/// Reads one JSON package descriptor per location
#[derive(Debug, Clone, Default)]
pub struct JsonPackageLoader {
    root: Option<PathBuf>,
}

impl JsonPackageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `root`
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl PackageLoader for JsonPackageLoader {
    fn load(&self, location: &str) -> Result<SourcePackage, ExtractError> {
        let path = self.resolve(location);
        tracing::debug!("Reading package descriptor {}", path.display());

        let contents = fs::read_to_string(&path).map_err(|e| ExtractError::Load {
            location: location.to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&contents).map_err(|e| ExtractError::Load {
            location: location.to_string(),
            source: Box::new(e),
        })
    }
}
