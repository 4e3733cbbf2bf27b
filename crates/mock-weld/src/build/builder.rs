//! MockBuilder: one generation run from options to files on disk

use std::collections::HashMap;
use std::path::PathBuf;

use crate::build::emit::{check_targets, mock_file_name, write_all, PendingFile};
use crate::build::format::Formatter;
use crate::build::options::{GenerateOptions, OutputPackage, OutputTarget};
use crate::codegen::{generate_file, FileSpec};
use crate::error::{ExtractError, WeldResult};
use crate::extract::{Extractor, PackageLoader};
use crate::ir::{Interface, NamingStrategy};

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Aggregate source when the target is stdout
    pub rendered: Option<String>,
}

/// Drives extraction, generation and emission
///
/// # Example
/// ```ignore
/// use mock_weld::build::{GenerateOptions, MockBuilder, OutputTarget};
/// use mock_weld::extract::JsonPackageLoader;
///
/// let options = GenerateOptions::new(vec!["client.json".to_string()])
///     .import_path("example.com/app/mocks")
///     .output(OutputTarget::Directory("mocks".into()));
///
/// let output = MockBuilder::new(options).build_with(&JsonPackageLoader::new())?;
/// ```
pub struct MockBuilder {
    options: GenerateOptions,
}

impl MockBuilder {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Run the whole pipeline. Every file is rendered before the first is
    /// written, so a failure leaves no partial output.
    pub fn build_with<L: PackageLoader + ?Sized>(&self, loader: &L) -> WeldResult<BuildOutput> {
        let opts = &self.options;
        let package = opts.validate()?;

        let extract = opts.extract_options();
        let interfaces = Extractor::new(loader, &extract).extract(&opts.locations)?;
        check_mock_names(&opts.naming, &interfaces)?;
        tracing::info!(
            "Generating {} mock(s) into package {}",
            interfaces.len(),
            package.name
        );

        let mut output = BuildOutput::default();
        let pending = match &opts.output {
            OutputTarget::Stdout => {
                output.rendered = Some(self.render(&package, &interfaces)?);
                return Ok(output);
            }
            OutputTarget::File(path) => vec![PendingFile {
                path: path.clone(),
                source: self.render(&package, &interfaces)?,
            }],
            OutputTarget::Directory(dir) => interfaces
                .iter()
                .map(|iface| {
                    Ok(PendingFile {
                        path: dir.join(mock_file_name(&opts.naming.prefix, &iface.name, opts.for_test)),
                        source: self.render(&package, std::slice::from_ref(iface))?,
                    })
                })
                .collect::<WeldResult<Vec<_>>>()?,
        };

        check_targets(&pending, opts.force)?;
        output.written = write_all(&pending)?;

        if opts.disable_formatting {
            tracing::warn!("Formatting disabled, generated files are left as rendered");
        } else {
            Formatter::new(&opts.formatter).format_all(&output.written)?;
        }

        Ok(output)
    }

    fn render(&self, package: &OutputPackage, interfaces: &[Interface]) -> WeldResult<String> {
        let mut spec = FileSpec::new(&package.name, &package.import_path);
        if let Some(command_line) = &self.options.command_line {
            spec = spec.command_line(command_line);
        }
        Ok(generate_file(
            &spec,
            &self.options.naming,
            self.options.constructors,
            interfaces,
        )?)
    }
}

/// Interfaces whose names differ only in case title-case to the same mock
fn check_mock_names(naming: &NamingStrategy, interfaces: &[Interface]) -> Result<(), ExtractError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for iface in interfaces {
        let mock = naming.mock_struct(&iface.title_name());
        if let Some(first) = seen.get(&mock) {
            return Err(ExtractError::NameCollision {
                mock,
                first: first.to_string(),
                second: iface.name.clone(),
            });
        }
        seen.insert(mock, &iface.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmitError, OptionsError, WeldError};
    use crate::ir::{Declaration, Method, MethodSig, SourcePackage, TypeDescriptor};
    use std::fs;
    use tempfile::TempDir;

    struct MapLoader(HashMap<String, SourcePackage>);

    impl PackageLoader for MapLoader {
        fn load(&self, location: &str) -> Result<SourcePackage, ExtractError> {
            self.0
                .get(location)
                .cloned()
                .ok_or_else(|| ExtractError::Load {
                    location: location.to_string(),
                    source: "missing".into(),
                })
        }
    }

    fn capability(methods: Vec<Method>) -> TypeDescriptor {
        TypeDescriptor::CapabilitySet(
            methods
                .iter()
                .map(|m| MethodSig {
                    name: m.name.clone(),
                    signature: m.signature(),
                })
                .collect(),
        )
    }

    fn loader() -> MapLoader {
        let pkg = SourcePackage::new("example.com/store")
            .declaration(Declaration::new(
                "Store",
                capability(vec![Method::new("Get")
                    .param(TypeDescriptor::string())
                    .returns(TypeDescriptor::string())]),
            ))
            .declaration(Declaration::new(
                "Closer",
                capability(vec![Method::new("Close").returns(TypeDescriptor::error())]),
            ));
        MapLoader(HashMap::from([("store".to_string(), pkg)]))
    }

    fn options(output: OutputTarget) -> GenerateOptions {
        GenerateOptions::new(vec!["store".to_string()])
            .import_path("example.com/app/mocks")
            .output(output)
            .disable_formatting(true)
    }

    #[test]
    fn test_stdout_renders_without_writing() {
        let output = MockBuilder::new(options(OutputTarget::Stdout))
            .build_with(&loader())
            .unwrap();

        assert!(output.written.is_empty());
        let source = output.rendered.unwrap();
        assert!(source.contains("package mocks\n"));
        assert!(source.contains("type MockCloser struct {"));
        assert!(source.contains("type MockStore struct {"));
    }

    #[test]
    fn test_directory_layout() {
        let dir = TempDir::new().unwrap();
        let output = MockBuilder::new(options(OutputTarget::Directory(dir.path().to_path_buf())))
            .build_with(&loader())
            .unwrap();

        assert_eq!(
            output.written,
            vec![dir.path().join("closer_mock.go"), dir.path().join("store_mock.go")]
        );
        let store = fs::read_to_string(dir.path().join("store_mock.go")).unwrap();
        assert!(store.contains("func NewMockStoreFrom(i store.Store) *MockStore {"));
        assert!(!store.contains("MockCloser"));
    }

    #[test]
    fn test_existing_file_blocks_every_write() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("store_mock.go"), "keep").unwrap();

        let err = MockBuilder::new(options(OutputTarget::Directory(dir.path().to_path_buf())))
            .build_with(&loader())
            .unwrap_err();

        assert!(matches!(err, WeldError::Emit(_)));
        assert!(!dir.path().join("closer_mock.go").exists());
        assert_eq!(fs::read_to_string(dir.path().join("store_mock.go")).unwrap(), "keep");

        let forced = MockBuilder::new(
            options(OutputTarget::Directory(dir.path().to_path_buf())).force(true),
        )
        .build_with(&loader())
        .unwrap();
        assert_eq!(forced.written.len(), 2);
    }

    #[test]
    fn test_single_file_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mocks.go");
        let output = MockBuilder::new(options(OutputTarget::File(path.clone())))
            .build_with(&loader())
            .unwrap();

        assert_eq!(output.written, vec![path.clone()]);
        let source = fs::read_to_string(path).unwrap();
        assert!(source.contains("MockCloser") && source.contains("MockStore"));
    }

    #[test]
    fn test_options_checked_before_loading() {
        let err = MockBuilder::new(GenerateOptions::new(vec!["store".to_string()]))
            .build_with(&loader())
            .unwrap_err();
        assert!(matches!(err, WeldError::Options(OptionsError::MissingPackage)));
    }

    #[test]
    fn test_render_failure_is_internal() {
        let pkg = SourcePackage::new("example.com/store").declaration(Declaration::new(
            "Broken",
            capability(vec![Method::new("Get").returns(TypeDescriptor::map(
                TypeDescriptor::slice(TypeDescriptor::int()),
                TypeDescriptor::int(),
            ))]),
        ));
        let loader = MapLoader(HashMap::from([("store".to_string(), pkg)]));

        let err = MockBuilder::new(options(OutputTarget::Stdout))
            .build_with(&loader)
            .unwrap_err();
        assert!(err.is_internal());
        assert!(err.to_string().starts_with("internal error:"));
    }

    fn case_twins() -> MapLoader {
        let pkg = SourcePackage::new("example.com/store")
            .declaration(Declaration::new(
                "client",
                capability(vec![Method::new("Close").returns(TypeDescriptor::error())]),
            ))
            .declaration(Declaration::new(
                "Client",
                capability(vec![Method::new("Close").returns(TypeDescriptor::error())]),
            ));
        MapLoader(HashMap::from([("store".to_string(), pkg)]))
    }

    #[test]
    fn test_case_twins_are_rejected() {
        let dir = TempDir::new().unwrap();
        let targets = [
            OutputTarget::Stdout,
            OutputTarget::File(dir.path().join("mocks.go")),
            OutputTarget::Directory(dir.path().to_path_buf()),
        ];

        for target in targets {
            let err = MockBuilder::new(options(target))
                .build_with(&case_twins())
                .unwrap_err();
            assert!(matches!(
                err,
                WeldError::Extract(ExtractError::NameCollision { ref mock, .. }) if mock == "MockClient"
            ));
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_colliding_file_names_are_rejected() {
        let pkg = SourcePackage::new("example.com/store")
            .declaration(Declaration::new(
                "HTTPClient",
                capability(vec![Method::new("Close").returns(TypeDescriptor::error())]),
            ))
            .declaration(Declaration::new(
                "HttpClient",
                capability(vec![Method::new("Close").returns(TypeDescriptor::error())]),
            ));
        let loader = MapLoader(HashMap::from([("store".to_string(), pkg)]));
        let dir = TempDir::new().unwrap();

        let err = MockBuilder::new(options(OutputTarget::Directory(dir.path().to_path_buf())).force(true))
            .build_with(&loader)
            .unwrap_err();
        assert!(matches!(err, WeldError::Emit(EmitError::DuplicateTarget(_))));
        assert!(!dir.path().join("httpclient_mock.go").exists());
    }
}
