//! Mock-Weld: mock generation for Go interfaces
//!
//! Reads scanned Go packages, selects the interfaces to mock and writes Go
//! source containing a mock struct, constructors and a per-method behavior
//! controller with call history for each of them.
//!
//! # Architecture
//!
//! - `ir`: type descriptors, scanned packages, interfaces and naming
//! - `extract`: package loading and interface selection
//! - `codegen`: type rendering, mock synthesis and Go printing
//! - `build`: options, the generation pipeline and file emission
//! - `hook`: a Rust model of the generated controller runtime
//!
//! # Usage
//!
//! ```rust,ignore
//! use mock_weld::build::{GenerateOptions, MockBuilder, OutputTarget};
//! use mock_weld::extract::JsonPackageLoader;
//!
//! fn main() -> Result<(), mock_weld::WeldError> {
//!     let options = GenerateOptions::new(vec!["client.json".to_string()])
//!         .import_path("example.com/app/mocks")
//!         .output(OutputTarget::Directory("mocks".into()));
//!
//!     MockBuilder::new(options).build_with(&JsonPackageLoader::new())?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod ir;
pub mod extract;
pub mod codegen;
pub mod build;
pub mod hook;

// Re-export commonly used types
pub use error::{EmitError, ExtractError, OptionsError, RenderError, WeldError, WeldResult};
pub use ir::{
    ChanDir, Declaration, GoBasic, Instantiation, Interface, Method, NamingOverrides,
    NamingStrategy, NamingTemplates, SourcePackage, TypeDescriptor,
};
pub use extract::{extract_interfaces, ExtractOptions, JsonPackageLoader, PackageLoader};
pub use codegen::{generate_file, ConstructorSet, FileSpec, MockGenerator};
pub use build::{BuildOutput, GenerateOptions, MockBuilder, OutputTarget};
pub use hook::{BehaviorController, CallRecord, Values};
