//! mock-weld: generate mock implementations of Go interfaces

mod args;
mod generate;
mod manifest;

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use args::Args;
use manifest::{Manifest, MANIFEST_FILE};

fn main() -> Result<()> {
    // Initialize tracing with env-filter support
    // Use MOCK_WELD_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("MOCK_WELD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let command_line = command_line();
    let cwd = env::current_dir().context("reading working directory")?;

    if !args.locations.is_empty() {
        let run = generate::from_args(&args, &cwd, &command_line)?;
        return generate::execute(run);
    }

    let manifest_path = args
        .manifest
        .clone()
        .unwrap_or_else(|| cwd.join(MANIFEST_FILE));
    let manifest = Manifest::load(&manifest_path)?;
    let base = manifest_path.parent().unwrap_or(Path::new("."));

    let entries = manifest.entries();
    if entries.is_empty() {
        tracing::warn!("No [[mocks]] entries in {}", manifest_path.display());
    }
    for entry in &entries {
        let run = generate::from_entry(entry, &manifest.naming, base, args.stdout, &command_line)?;
        generate::execute(run)?;
    }

    Ok(())
}

/// The invocation as echoed into generated file headers
fn command_line() -> String {
    let mut parts = vec!["mock-weld".to_string()];
    parts.extend(env::args().skip(1));
    parts.join(" ")
}
