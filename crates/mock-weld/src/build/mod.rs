//! Generation runs
//!
//! - `options`: validated run configuration
//! - `builder`: the extract, render, write pipeline
//! - `emit`: output file planning and overwrite checks
//! - `format`: the external Go formatter

pub mod builder;
pub mod emit;
pub mod format;
pub mod options;

pub use builder::{BuildOutput, MockBuilder};
pub use emit::{mock_file_name, PendingFile};
pub use format::Formatter;
pub use options::{GenerateOptions, OutputPackage, OutputTarget, DEFAULT_FORMATTER};
pub use crate::codegen::ConstructorSet;
