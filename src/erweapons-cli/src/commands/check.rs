//! Check command handler
//!
//! Runs the whole pipeline, including encoding, without writing the artifact.

use super::compile::compile_dir;
use crate::config::Config;
use anyhow::{Context, Result};
use erweapons::Kind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Counts from a successful dry run
#[derive(Debug)]
pub struct CheckReport {
    pub names: usize,
    pub variants: usize,
    pub records: usize,
    pub encoded_bytes: usize,
    pub by_affinity: BTreeMap<&'static str, usize>,
}

pub fn handle(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir(data_dir);

    let report = run(&data_dir)?;

    println!("Sources in {} are consistent", data_dir.display());
    println!("  Names:    {}", report.names);
    println!("  Variants: {}", report.variants);
    println!("  Records:  {}", report.records);
    println!("  Encoded:  {} bytes", report.encoded_bytes);
    println!();
    println!("Variants by affinity:");
    for (affinity, count) in &report.by_affinity {
        println!("  {:<12} {}", affinity, count);
    }

    Ok(())
}

pub fn run(data_dir: &Path) -> Result<CheckReport> {
    let artifact = compile_dir(data_dir)?;
    let encoded = artifact
        .to_json_string(false)
        .context("Failed to encode weapon data")?;

    let mut by_affinity: BTreeMap<&'static str, usize> = BTreeMap::new();
    for variant in artifact.variants() {
        *by_affinity.entry(variant.affinity().name()).or_default() += 1;
    }

    Ok(CheckReport {
        names: artifact.names().len(),
        variants: artifact.variants().len(),
        records: artifact.variants().iter().map(|v| v.levels().len()).sum(),
        encoded_bytes: encoded.len(),
        by_affinity,
    })
}
