//! Whole-file generation

use crate::error::RenderError;
use crate::ir::{Interface, NamingStrategy};

use super::ast::File;
use super::imports::ImportSet;
use super::mock::{ConstructorSet, MockGenerator};
use super::printer::print_file;

/// First header line of every generated file
pub const GENERATED_HEADER: &str = "Code generated by mock-weld; DO NOT EDIT.";

/// Header, package and imports of a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec<'a> {
    pub package: &'a str,
    /// Module the file is written into
    pub output_module: &'a str,
    /// Command line echoed into the header, if any
    pub command_line: Option<&'a str>,
}

impl<'a> FileSpec<'a> {
    pub fn new(package: &'a str, output_module: &'a str) -> Self {
        Self {
            package,
            output_module,
            command_line: None,
        }
    }

    pub fn command_line(mut self, command_line: &'a str) -> Self {
        self.command_line = Some(command_line);
        self
    }

    fn header(&self) -> Vec<String> {
        let mut header = vec![GENERATED_HEADER.to_string()];
        if let Some(command_line) = self.command_line {
            header.push(String::new());
            header.push(format!("This file was generated by running `{}`", command_line));
        }
        header
    }
}

/// Render a Go source file holding the mocks of `interfaces`
pub fn generate_file(
    spec: &FileSpec<'_>,
    naming: &NamingStrategy,
    constructors: ConstructorSet,
    interfaces: &[Interface],
) -> Result<String, RenderError> {
    let generator = MockGenerator::new(naming, spec.output_module).constructors(constructors);

    let mut decls = Vec::new();
    for iface in interfaces {
        tracing::debug!(interface = %iface.name, module = %iface.module, "generating mock");
        decls.extend(generator.generate(iface)?);
    }

    // Every controller embeds a sync.Mutex.
    let always: &[&str] = if decls.is_empty() { &[] } else { &["sync"] };
    let file = File {
        header: spec.header(),
        package: spec.package.to_string(),
        imports: ImportSet::collect(&decls, always),
        decls,
    };
    Ok(print_file(&file))
}
