//! Generation options
//!
//! Everything a run needs, gathered by the CLI from flags or the manifest and
//! validated before any package is loaded.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::codegen::ConstructorSet;
use crate::error::OptionsError;
use crate::extract::ExtractOptions;
use crate::ir::{Instantiation, NamingStrategy};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]([A-Za-z0-9_]*[A-Za-z])?$").expect("identifier pattern is valid")
});

/// Formatter run over written files unless disabled
pub const DEFAULT_FORMATTER: &str = "goimports";

/// Where generated source goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// All mocks in one file
    File(PathBuf),
    /// One file per interface
    Directory(PathBuf),
    /// All mocks in one file, returned instead of written
    Stdout,
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::Directory(PathBuf::from("."))
    }
}

/// Options for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Package descriptors to scan
    pub locations: Vec<String>,
    /// Name of the generated package
    pub package_name: Option<String>,
    /// Module path of the generated package
    pub output_import_path: Option<String>,
    pub interfaces: Vec<String>,
    pub exclude: Vec<String>,
    pub instantiations: Vec<Instantiation>,
    pub naming: NamingStrategy,
    pub constructors: ConstructorSet,
    pub output: OutputTarget,
    pub force: bool,
    /// Generate into the external `_test` package
    pub for_test: bool,
    pub disable_formatting: bool,
    /// Formatter binary, looked up in PATH
    pub formatter: String,
    /// Echoed into the file header
    pub command_line: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            locations: Vec::new(),
            package_name: None,
            output_import_path: None,
            interfaces: Vec::new(),
            exclude: Vec::new(),
            instantiations: Vec::new(),
            naming: NamingStrategy::default(),
            constructors: ConstructorSet::default(),
            output: OutputTarget::default(),
            force: false,
            for_test: false,
            disable_formatting: false,
            formatter: DEFAULT_FORMATTER.to_string(),
            command_line: None,
        }
    }
}

/// Package name and module path of the generated code, after defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPackage {
    pub name: String,
    pub import_path: String,
}

impl GenerateOptions {
    pub fn new(locations: Vec<String>) -> Self {
        Self {
            locations,
            ..Self::default()
        }
    }

    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn import_path(mut self, path: impl Into<String>) -> Self {
        self.output_import_path = Some(path.into());
        self
    }

    pub fn interfaces(mut self, names: Vec<String>) -> Self {
        self.interfaces = names;
        self
    }

    pub fn exclude(mut self, names: Vec<String>) -> Self {
        self.exclude = names;
        self
    }

    pub fn instantiation(mut self, inst: Instantiation) -> Self {
        self.instantiations.push(inst);
        self
    }

    pub fn naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    pub fn constructors(mut self, constructors: ConstructorSet) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn for_test(mut self, for_test: bool) -> Self {
        self.for_test = for_test;
        self
    }

    pub fn disable_formatting(mut self, disable: bool) -> Self {
        self.disable_formatting = disable;
        self
    }

    pub fn formatter(mut self, binary: impl Into<String>) -> Self {
        self.formatter = binary.into();
        self
    }

    pub fn command_line(mut self, command_line: impl Into<String>) -> Self {
        self.command_line = Some(command_line.into());
        self
    }

    /// Check the options and resolve the output package
    pub fn validate(&self) -> Result<OutputPackage, OptionsError> {
        if self.locations.is_empty() {
            return Err(OptionsError::NoLocations);
        }
        if !self.interfaces.is_empty() && !self.exclude.is_empty() {
            return Err(OptionsError::MutuallyExclusive("interfaces", "exclude"));
        }

        let (name, import_path) = match (&self.package_name, &self.output_import_path) {
            (Some(name), Some(path)) => (name.clone(), path.clone()),
            (Some(name), None) => (name.clone(), name.clone()),
            (None, Some(path)) => {
                let last = path.rsplit('/').next().unwrap_or(path);
                (last.to_string(), path.clone())
            }
            (None, None) => return Err(OptionsError::MissingPackage),
        };

        check_identifier("package name", &name)?;
        if !self.naming.prefix.is_empty() {
            check_identifier("prefix", &self.naming.prefix)?;
        }
        if !self.naming.constructor_prefix.is_empty() {
            check_identifier("constructor prefix", &self.naming.constructor_prefix)?;
        }

        let name = if self.for_test {
            format!("{name}_test")
        } else {
            name
        };

        Ok(OutputPackage { name, import_path })
    }

    /// Name filters and instantiations for the extractor
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            interfaces: self.interfaces.clone(),
            exclude: self.exclude.clone(),
            instantiations: self.instantiations.clone(),
        }
    }
}

fn check_identifier(option: &'static str, value: &str) -> Result<(), OptionsError> {
    if IDENTIFIER.is_match(value) {
        Ok(())
    } else {
        Err(OptionsError::IllegalIdentifier {
            option,
            value: value.to_string(),
        })
    }
}
