//! Error types for Mock-Weld
//!
//! Extraction, option and emission errors are usage errors: they describe a
//! configuration or input problem and abort the run. Render errors are
//! internal: a descriptor reached the renderer in a shape it cannot express.

use std::path::PathBuf;

use thiserror::Error;

use crate::ir::PackageValidationError;

/// Errors raised while selecting interfaces from scanned packages
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("type '{name}' is multiply-defined in supplied import paths ({})", .locations.join(", "))]
    MultiplyDefined {
        name: String,
        locations: Vec<String>,
    },

    #[error("type '{0}' not found in supplied import paths")]
    NotFound(String),

    #[error("type '{interface}' has an unexported method '{method}'")]
    UnexportedMethod { interface: String, method: String },

    #[error("type '{interface}' declares method '{method}' more than once")]
    DuplicateMethod { interface: String, method: String },

    #[error("method '{interface}.{method}' is variadic but its last parameter is not a slice")]
    BadVariadic { interface: String, method: String },

    #[error("interfaces '{first}' and '{second}' would both generate '{mock}'")]
    NameCollision {
        mock: String,
        first: String,
        second: String,
    },

    #[error("no interfaces found in '{0}'")]
    EmptyLocation(String),

    #[error("no interfaces found in supplied import paths")]
    NoInterfaces,

    #[error("cannot instantiate '{interface}': {reason}")]
    Instantiation { interface: String, reason: String },

    #[error("failed to load package at '{location}'")]
    Load {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid package '{location}': {source}")]
    InvalidPackage {
        location: String,
        #[source]
        source: PackageValidationError,
    },
}

/// Descriptor shapes the renderer cannot express
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("type parameter '{0}' was not substituted before rendering")]
    UnboundTypeParam(String),

    #[error("variadic signature must end in a slice, found {0}")]
    VariadicNotSlice(String),

    #[error("map key of {0} type is not comparable")]
    InvalidMapKey(&'static str),

    #[error("named type without a name")]
    EmptyName,
}

/// Invalid generation options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("{0} and {1} are mutually exclusive")]
    MutuallyExclusive(&'static str, &'static str),

    #[error("{option} `{value}` is illegal")]
    IllegalIdentifier { option: &'static str, value: String },

    #[error("no import paths supplied")]
    NoLocations,

    #[error("could not determine the output package name")]
    MissingPackage,
}

/// Errors writing or formatting generated files
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("filename {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("filename {} is generated more than once", .0.display())]
    DuplicateTarget(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("formatter '{0}' not found in PATH")]
    FormatterNotFound(String),

    #[error("formatter '{binary}' failed on {}: {stderr}", .path.display())]
    FormatterFailed {
        binary: String,
        path: PathBuf,
        stderr: String,
    },
}

/// Top-level error for a generation run
#[derive(Debug, Error)]
pub enum WeldError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("internal error: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl WeldError {
    /// Whether this error indicates a generator defect rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, WeldError::Render(_))
    }
}

/// Result alias for generation runs
pub type WeldResult<T> = Result<T, WeldError>;
