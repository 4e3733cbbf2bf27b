//! Turning flags or manifest entries into generation runs

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mock_weld::build::{GenerateOptions, MockBuilder, OutputTarget, DEFAULT_FORMATTER};
use mock_weld::{JsonPackageLoader, NamingOverrides, NamingStrategy, OptionsError};

use crate::args::Args;
use crate::manifest::MockEntry;

/// Options for one run plus the directory relative locations resolve against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub options: GenerateOptions,
    pub root: Option<PathBuf>,
}

/// Output target from the dirname/filename/stdout settings
fn output_target(
    dirname: Option<&Path>,
    filename: Option<&Path>,
    stdout: bool,
    base: &Path,
) -> Result<OutputTarget, OptionsError> {
    match (dirname, filename) {
        (Some(_), Some(_)) => Err(OptionsError::MutuallyExclusive("dirname", "filename")),
        _ if stdout => Ok(OutputTarget::Stdout),
        (Some(dir), None) => Ok(OutputTarget::Directory(base.join(dir))),
        (None, Some(file)) => Ok(OutputTarget::File(base.join(file))),
        (None, None) => Ok(OutputTarget::Directory(base.to_path_buf())),
    }
}

fn naming(prefix: Option<&str>, constructor_prefix: Option<&str>, overrides: &NamingOverrides) -> NamingStrategy {
    NamingStrategy::new(prefix.unwrap_or_default())
        .constructor_prefix(constructor_prefix.unwrap_or_default())
        .with_overrides(overrides)
}

/// A run from command-line flags, relative to the working directory `cwd`
pub fn from_args(args: &Args, cwd: &Path, command_line: &str) -> Result<Run, OptionsError> {
    let mut options = GenerateOptions::new(args.locations.clone())
        .interfaces(args.interfaces.clone())
        .exclude(args.exclude.clone())
        .naming(naming(
            args.prefix.as_deref(),
            args.constructor_prefix.as_deref(),
            &NamingOverrides::default(),
        ))
        .output(output_target(
            args.dirname.as_deref(),
            args.filename.as_deref(),
            args.stdout,
            cwd,
        )?)
        .force(args.force)
        .for_test(args.for_test)
        .disable_formatting(args.disable_formatting)
        .formatter(args.goimports.as_deref().unwrap_or(DEFAULT_FORMATTER))
        .command_line(command_line);

    options.package_name = args.package.clone();
    options.output_import_path = args.import_path.clone();

    Ok(Run {
        options,
        root: None,
    })
}

/// A run from a merged manifest entry. Paths are relative to the manifest's
/// directory `base`.
pub fn from_entry(
    entry: &MockEntry,
    overrides: &NamingOverrides,
    base: &Path,
    stdout: bool,
    command_line: &str,
) -> Result<Run, OptionsError> {
    let mut options = GenerateOptions::new(entry.locations())
        .interfaces(entry.interfaces.clone())
        .exclude(entry.exclude.clone())
        .naming(naming(
            entry.prefix.as_deref(),
            entry.constructor_prefix.as_deref(),
            overrides,
        ))
        .output(output_target(
            entry.dirname.as_deref(),
            entry.filename.as_deref(),
            stdout,
            base,
        )?)
        .force(entry.force)
        .for_test(entry.for_test)
        .disable_formatting(entry.disable_formatting)
        .formatter(entry.goimports.as_deref().unwrap_or(DEFAULT_FORMATTER))
        .command_line(command_line);

    options.package_name = entry.package.clone();
    options.output_import_path = entry.import_path.clone();
    options.instantiations = entry.instantiations.clone();

    Ok(Run {
        options,
        root: Some(base.to_path_buf()),
    })
}

/// Execute one run, printing stdout output
pub fn execute(run: Run) -> Result<()> {
    let mut loader = JsonPackageLoader::new();
    if let Some(root) = &run.root {
        loader = loader.root(root);
    }

    let locations = run.options.locations.join(", ");
    let output = MockBuilder::new(run.options)
        .build_with(&loader)
        .map_err(|err| {
            if err.is_internal() {
                anyhow::Error::new(err).context("mock-weld hit a generator defect, please report it")
            } else {
                anyhow::Error::new(err)
            }
        })
        .with_context(|| format!("generating mocks for {}", locations))?;

    if let Some(source) = output.rendered {
        io::stdout()
            .lock()
            .write_all(source.as_bytes())
            .context("writing to stdout")?;
    }
    for path in &output.written {
        tracing::debug!("Generated {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_target() {
        let base = Path::new("/work");
        assert_eq!(
            output_target(None, None, false, base).unwrap(),
            OutputTarget::Directory(PathBuf::from("/work"))
        );
        assert_eq!(
            output_target(Some(Path::new("mocks")), None, false, base).unwrap(),
            OutputTarget::Directory(PathBuf::from("/work/mocks"))
        );
        assert_eq!(
            output_target(None, Some(Path::new("mocks.go")), false, base).unwrap(),
            OutputTarget::File(PathBuf::from("/work/mocks.go"))
        );
        assert_eq!(
            output_target(None, Some(Path::new("mocks.go")), true, base).unwrap(),
            OutputTarget::Stdout
        );
        assert_eq!(
            output_target(Some(Path::new("a")), Some(Path::new("b")), false, base).unwrap_err(),
            OptionsError::MutuallyExclusive("dirname", "filename")
        );
    }

    #[test]
    fn test_from_args() {
        let args = Args {
            locations: vec!["client.json".to_string()],
            import_path: Some("example.com/app/mocks".to_string()),
            prefix: Some("Test".to_string()),
            constructor_prefix: Some("Fake".to_string()),
            filename: Some(PathBuf::from("mocks.go")),
            ..Args::default()
        };
        let run = from_args(&args, Path::new("/work"), "mock-weld client.json").unwrap();

        let options = &run.options;
        assert_eq!(options.output, OutputTarget::File(PathBuf::from("/work/mocks.go")));
        assert_eq!(options.naming.zero_constructor("MockTestClient"), "NewFakeMockTestClient");
        assert_eq!(options.formatter, "goimports");
        assert_eq!(options.command_line.as_deref(), Some("mock-weld client.json"));
        assert_eq!(options.validate().unwrap().name, "mocks");
        assert_eq!(run.root, None);
    }

    #[test]
    fn test_from_entry() {
        let entry = MockEntry {
            path: Some("client.json".to_string()),
            package: Some("mocks".to_string()),
            dirname: Some(PathBuf::from("mocks")),
            goimports: Some("gofmt".to_string()),
            ..MockEntry::default()
        };
        let overrides = NamingOverrides {
            proxy_field: Some("{method}Hook".to_string()),
            ..NamingOverrides::default()
        };
        let run = from_entry(&entry, &overrides, Path::new("/repo"), false, "mock-weld").unwrap();

        assert_eq!(run.root, Some(PathBuf::from("/repo")));
        assert_eq!(
            run.options.output,
            OutputTarget::Directory(PathBuf::from("/repo/mocks"))
        );
        assert_eq!(run.options.formatter, "gofmt");
        assert_eq!(run.options.naming.proxy_field("Do"), "DoHook");
    }

    #[test]
    fn test_execute_writes_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("client.json"),
            r#"{
                "path": "example.com/client",
                "declarations": [{
                    "name": "Client",
                    "ty": { "capability_set": [
                        { "name": "Close", "signature": { "results": [{ "named": { "name": "error" } }] } }
                    ] }
                }]
            }"#,
        )
        .unwrap();

        let entry = MockEntry {
            path: Some("client.json".to_string()),
            import_path: Some("example.com/app/mocks".to_string()),
            dirname: Some(PathBuf::from("mocks")),
            disable_formatting: true,
            ..MockEntry::default()
        };
        let run = from_entry(&entry, &NamingOverrides::default(), dir.path(), false, "mock-weld").unwrap();
        execute(run).unwrap();

        let source = fs::read_to_string(dir.path().join("mocks").join("client_mock.go")).unwrap();
        assert!(source.contains("func (m *MockClient) Close() error {"));
    }
}
