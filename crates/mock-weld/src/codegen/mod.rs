//! Go code generation
//!
//! Interfaces are turned into an immutable document tree ([`ast`]) by the
//! [`mock`] generator and laid out by the [`printer`].

pub mod ast;
pub mod comment;
pub mod file;
pub mod imports;
pub mod mock;
pub mod printer;
pub mod render;
pub mod zero;

pub use file::{generate_file, FileSpec, GENERATED_HEADER};
pub use imports::ImportSet;
pub use mock::{ConstructorSet, MockGenerator};
pub use printer::{print_decl, print_expr, print_file, print_type};
pub use render::TypeRenderer;
pub use zero::zero_value;
