//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Generate mock implementations of Go interfaces
#[derive(Debug, Default, Parser)]
#[command(name = "mock-weld", version, about = "Generate mock implementations of Go interfaces")]
pub struct Args {
    /// Package descriptors to scan. Without any, the manifest is used.
    pub locations: Vec<String>,

    /// Name of the generated package
    #[arg(short = 'p', long = "package")]
    pub package: Option<String>,

    /// Only mock these interfaces (repeatable)
    #[arg(short = 'i', long = "interfaces")]
    pub interfaces: Vec<String>,

    /// Skip these interfaces (repeatable)
    #[arg(short = 'e', long = "exclude")]
    pub exclude: Vec<String>,

    /// Write one file per interface into this directory
    #[arg(short = 'd', long = "dirname")]
    pub dirname: Option<PathBuf>,

    /// Write all mocks into this file
    #[arg(short = 'o', long = "filename")]
    pub filename: Option<PathBuf>,

    /// Module path of the generated package
    #[arg(long = "import-path")]
    pub import_path: Option<String>,

    /// Prefix for generated type names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Prefix inserted after `New` in constructor names
    #[arg(long = "constructor-prefix")]
    pub constructor_prefix: Option<String>,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// Skip running the formatter
    #[arg(long = "disable-formatting")]
    pub disable_formatting: bool,

    /// Formatter binary
    #[arg(long = "goimports")]
    pub goimports: Option<String>,

    /// Generate into the external test package
    #[arg(long = "for-test")]
    pub for_test: bool,

    /// Print the generated source instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Manifest to read when no locations are given
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "mock-weld",
            "client.json",
            "store.json",
            "-p",
            "mocks",
            "-i",
            "Client",
            "-i",
            "Store",
            "-d",
            "out",
            "--prefix",
            "Test",
            "-f",
            "--for-test",
        ])
        .unwrap();

        assert_eq!(args.locations, vec!["client.json", "store.json"]);
        assert_eq!(args.package.as_deref(), Some("mocks"));
        assert_eq!(args.interfaces, vec!["Client", "Store"]);
        assert_eq!(args.dirname, Some(PathBuf::from("out")));
        assert_eq!(args.prefix.as_deref(), Some("Test"));
        assert!(args.force);
        assert!(args.for_test);
        assert!(!args.stdout);
    }

    #[test]
    fn test_manifest_mode() {
        let args = Args::try_parse_from(["mock-weld", "--manifest", "mocks/mock-weld.toml"]).unwrap();
        assert!(args.locations.is_empty());
        assert_eq!(args.manifest, Some(PathBuf::from("mocks/mock-weld.toml")));
    }
}
