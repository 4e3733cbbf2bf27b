//! Interface extraction
//!
//! - `loader`: the `PackageLoader` seam and the JSON descriptor loader
//! - `registry`: candidate collection across search locations
//! - `extractor`: filtering, validation and generic instantiation

pub mod loader;
pub mod registry;
pub mod extractor;

pub use loader::{JsonPackageLoader, PackageLoader};
pub use registry::{Candidate, CandidateRegistry};
pub use extractor::{extract_interfaces, ExtractOptions, Extractor};
