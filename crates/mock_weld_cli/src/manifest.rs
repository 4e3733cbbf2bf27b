//! Manifest loading (mock-weld.toml)
//!
//! Global settings apply to every `[[mocks]]` entry: exclude lists are
//! concatenated, unset strings fall back to the global value and a global
//! `true` forces the flag on.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use mock_weld::{Instantiation, NamingOverrides};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "mock-weld.toml";

/// Manifest root
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Manifest {
    pub exclude: Vec<String>,
    pub prefix: Option<String>,
    pub constructor_prefix: Option<String>,
    pub force: bool,
    pub disable_formatting: bool,
    pub goimports: Option<String>,
    pub for_test: bool,
    /// Name template overrides
    pub naming: NamingOverrides,
    pub mocks: Vec<MockEntry>,
}

/// One `[[mocks]]` entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MockEntry {
    pub path: Option<String>,
    pub paths: Vec<String>,
    pub package: Option<String>,
    pub interfaces: Vec<String>,
    pub exclude: Vec<String>,
    pub dirname: Option<PathBuf>,
    pub filename: Option<PathBuf>,
    pub import_path: Option<String>,
    pub prefix: Option<String>,
    pub constructor_prefix: Option<String>,
    pub force: bool,
    pub disable_formatting: bool,
    pub goimports: Option<String>,
    pub for_test: bool,
    pub instantiations: Vec<Instantiation>,
}

impl MockEntry {
    /// `path` followed by `paths`
    pub fn locations(&self) -> Vec<String> {
        self.path.iter().chain(&self.paths).cloned().collect()
    }

    fn merge_global(mut self, global: &Manifest) -> Self {
        self.exclude.extend(global.exclude.iter().cloned());
        if self.prefix.is_none() {
            self.prefix = global.prefix.clone();
        }
        if self.constructor_prefix.is_none() {
            self.constructor_prefix = global.constructor_prefix.clone();
        }
        if self.goimports.is_none() {
            self.goimports = global.goimports.clone();
        }
        self.force |= global.force;
        self.disable_formatting |= global.disable_formatting;
        self.for_test |= global.for_test;
        self
    }
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading manifest at {}", path.display()))?;
        Self::parse(&txt)
    }

    pub fn parse(txt: &str) -> Result<Self> {
        toml::from_str(txt).context("parsing manifest")
    }

    /// Entries with the global settings applied
    pub fn entries(&self) -> Vec<MockEntry> {
        self.mocks
            .iter()
            .cloned()
            .map(|entry| entry.merge_global(self))
            .collect()
    }
}
