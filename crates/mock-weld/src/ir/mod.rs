//! Intermediate Representation (IR) for Mock-Weld
//!
//! This module provides the type descriptors, scanned-package model,
//! interface descriptors and naming strategy shared by extraction and
//! code generation.

pub mod types;
pub mod interface;
pub mod package;
pub mod naming;

pub use types::*;
pub use interface::*;
pub use package::*;
pub use naming::*;
