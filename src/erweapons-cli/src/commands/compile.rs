//! Compile command handler
//!
//! Loads the six source tables from a directory, runs the pipeline, and
//! writes the encoded artifact.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use erweapons::{Artifact, SourcePaths};
use std::fs;
use std::path::{Path, PathBuf};

/// Handle the compile command
///
/// # Arguments
/// * `data_dir` - Source directory (uses configured default if not provided)
/// * `output` - Artifact path (uses configured default if not provided)
/// * `pretty` - Pretty-print the JSON (also enabled by config)
pub fn handle(data_dir: Option<PathBuf>, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir(data_dir);
    let output = config.output(output);

    let artifact = run(&data_dir, &output, pretty || config.pretty)?;

    println!(
        "Compiled {} weapon variants ({} names) from {} to {}",
        artifact.variants().len(),
        artifact.names().len(),
        data_dir.display(),
        output.display()
    );
    Ok(())
}

/// Compile `data_dir` and write the artifact to `output`
pub fn run(data_dir: &Path, output: &Path, pretty: bool) -> Result<Artifact> {
    let artifact = compile_dir(data_dir)?;
    write_artifact(&artifact, output, pretty)?;
    Ok(artifact)
}

/// Compile the sources in `data_dir`, failing early if any file is missing
pub fn compile_dir(data_dir: &Path) -> Result<Artifact> {
    let paths = SourcePaths::from_dir(data_dir);

    let missing = paths.missing();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|kind| kind.file_name()).collect();
        bail!(
            "Missing source files in {}: {}",
            data_dir.display(),
            names.join(", ")
        );
    }

    erweapons::compile(&paths)
        .with_context(|| format!("Failed to compile weapon data from {}", data_dir.display()))
}

pub fn write_artifact(artifact: &Artifact, output: &Path, pretty: bool) -> Result<()> {
    let json = artifact
        .to_json_string(pretty)
        .context("Failed to encode weapon data")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(output, json)
        .with_context(|| format!("Failed to write artifact to {}", output.display()))?;

    tracing::info!(path = %output.display(), "Wrote weapon data");
    Ok(())
}
