//! Scanned package descriptors
//!
//! A `SourcePackage` is the typed view of one search location, produced by an
//! external Go-side scanner and read through a `PackageLoader`.

use serde::{Deserialize, Serialize};

use super::types::{MethodSig, TypeDescriptor};

/// Type declaration found in a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    /// Type parameter names of a generic declaration, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    pub ty: TypeDescriptor,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            ty,
        }
    }

    /// Declare a type parameter
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Method set when the declaration is an interface
    pub fn capability_set(&self) -> Option<&[MethodSig]> {
        match &self.ty {
            TypeDescriptor::CapabilitySet(methods) => Some(methods.as_slice()),
            _ => None,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// All type declarations of one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePackage {
    /// Module path, e.g. `github.com/acme/store`
    pub path: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl SourcePackage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declarations: Vec::new(),
        }
    }

    /// Add a declaration
    pub fn declaration(mut self, decl: Declaration) -> Self {
        self.declarations.push(decl);
        self
    }

    /// Declarations that are interfaces
    pub fn interfaces(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|d| d.capability_set().is_some())
    }

    /// Validate the package for correctness
    pub fn validate(&self) -> Result<(), PackageValidationError> {
        if self.path.is_empty() {
            return Err(PackageValidationError::EmptyPath);
        }

        let mut seen = std::collections::HashSet::new();
        for decl in &self.declarations {
            if decl.name.is_empty() {
                return Err(PackageValidationError::EmptyDeclarationName);
            }
            if !seen.insert(&decl.name) {
                return Err(PackageValidationError::DuplicateDeclaration(
                    decl.name.clone(),
                ));
            }
        }

        Ok(())
    }
}

/// Errors that can occur during package validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageValidationError {
    /// Package path is empty
    EmptyPath,
    /// A declaration has no name
    EmptyDeclarationName,
    /// Two declarations share a name
    DuplicateDeclaration(String),
}

impl std::fmt::Display for PackageValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageValidationError::EmptyPath => write!(f, "package path cannot be empty"),
            PackageValidationError::EmptyDeclarationName => {
                write!(f, "declaration name cannot be empty")
            }
            PackageValidationError::DuplicateDeclaration(name) => {
                write!(f, "duplicate declaration: {}", name)
            }
        }
    }
}

impl std::error::Error for PackageValidationError {}

/// Request to mock a generic interface with concrete type arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instantiation {
    pub interface: String,
    pub type_args: Vec<TypeDescriptor>,
}

impl Instantiation {
    pub fn new(interface: impl Into<String>, type_args: Vec<TypeDescriptor>) -> Self {
        Self {
            interface: interface.into(),
            type_args,
        }
    }
}
