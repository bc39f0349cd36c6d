//! Inspect command handlers
//!
//! Decodes a compiled artifact and prints either a summary or the per-level
//! stats of one weapon.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use erweapons::weapon::Slots;
use erweapons::{Affinity, Artifact, Kind, WeaponVariant};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Counts over a decoded artifact
#[derive(Debug, Serialize)]
pub struct Summary {
    pub names: usize,
    pub variants: usize,
    pub records: usize,
    pub by_weapon_type: BTreeMap<&'static str, usize>,
    pub by_affinity: BTreeMap<&'static str, usize>,
}

/// Handle the inspect command
///
/// # Arguments
/// * `input` - Artifact path (uses the configured output if not provided)
/// * `weapon` - Show this weapon instead of the summary
/// * `affinity` - Only this affinity of `weapon`
/// * `json` - Print JSON instead of text
pub fn handle(
    input: Option<PathBuf>,
    weapon: Option<String>,
    affinity: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let input = config.output(input);
    let artifact = load_artifact(&input)?;

    match weapon {
        Some(name) => {
            let variants = find_variants(&artifact, &name, affinity.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&variants)?);
            } else {
                for variant in variants {
                    print_variant(variant);
                    println!();
                }
            }
        }
        None => {
            let summary = summarize(&artifact);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&input, &summary);
            }
        }
    }

    Ok(())
}

pub fn load_artifact(path: &Path) -> Result<Artifact> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact {}", path.display()))?;
    Artifact::from_json_str(&text)
        .with_context(|| format!("Failed to decode artifact {}", path.display()))
}

pub fn summarize(artifact: &Artifact) -> Summary {
    let mut by_weapon_type: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut by_affinity: BTreeMap<&'static str, usize> = BTreeMap::new();

    for variant in artifact.variants() {
        *by_weapon_type
            .entry(variant.metadata().weapon_type.name())
            .or_default() += 1;
        *by_affinity.entry(variant.affinity().name()).or_default() += 1;
    }

    Summary {
        names: artifact.names().len(),
        variants: artifact.variants().len(),
        records: artifact.variants().iter().map(|v| v.levels().len()).sum(),
        by_weapon_type,
        by_affinity,
    }
}

/// Parse an affinity name, ignoring case
pub fn parse_affinity(name: &str) -> Result<Affinity> {
    Affinity::ALL
        .iter()
        .copied()
        .find(|affinity| affinity.name().eq_ignore_ascii_case(name))
        .with_context(|| {
            let known: Vec<&str> = Affinity::ALL.iter().map(|a| a.name()).collect();
            format!("Unknown affinity {name:?} (expected one of: {})", known.join(", "))
        })
}

/// Variants of the named weapon, optionally narrowed to one affinity
pub fn find_variants<'a>(
    artifact: &'a Artifact,
    name: &str,
    affinity: Option<&str>,
) -> Result<Vec<&'a WeaponVariant>> {
    let Some(name) = artifact
        .names()
        .iter()
        .find(|known| *known == name)
        .or_else(|| {
            artifact
                .names()
                .iter()
                .find(|known| known.eq_ignore_ascii_case(name))
        })
    else {
        let search = name.to_lowercase();
        let similar: Vec<&str> = artifact
            .names()
            .iter()
            .filter(|known| known.to_lowercase().contains(&search))
            .take(10)
            .collect();
        if similar.is_empty() {
            bail!("No weapon named {name:?}");
        }
        bail!("No weapon named {name:?}. Similar: {}", similar.join(", "));
    };

    let variants: Vec<&WeaponVariant> = match affinity {
        Some(affinity) => {
            let affinity = parse_affinity(affinity)?;
            artifact.variant(name, affinity).into_iter().collect()
        }
        None => artifact.variants_named(name).collect(),
    };

    if variants.is_empty() {
        bail!("{name} has no such affinity");
    }
    Ok(variants)
}

fn print_summary(path: &Path, summary: &Summary) {
    println!("Artifact: {}", path.display());
    println!("  Names:    {}", summary.names);
    println!("  Variants: {}", summary.variants);
    println!("  Records:  {}", summary.records);
    println!();

    println!("By weapon type:");
    for (weapon_type, count) in &summary.by_weapon_type {
        println!("  {:<22} {}", weapon_type, count);
    }
    println!();

    println!("By affinity:");
    for (affinity, count) in &summary.by_affinity {
        println!("  {:<22} {}", affinity, count);
    }
}

fn print_variant(variant: &WeaponVariant) {
    let base = variant.base();
    let metadata = variant.metadata();

    println!(
        "{} ({}) - {}, max +{}{}",
        metadata.weapon_name,
        metadata.affinity,
        metadata.weapon_type,
        metadata.max_upgrade_level,
        if base.paired { ", paired" } else { "" }
    );
    println!("Requirements: {}", format_slots(&base.requirements));

    let scaling: Vec<String> = base
        .damage_scaling_attributes
        .iter()
        .map(|(damage_type, attributes)| {
            let names: Vec<&str> = attributes.iter().map(|a| a.name()).collect();
            match base.damage_scaling_curves.get(damage_type) {
                Some(curve) => format!("{} [{}] curve {}", damage_type, names.join(", "), curve.0),
                None => format!("{} [{}]", damage_type, names.join(", ")),
            }
        })
        .collect();
    println!(
        "Scales:       {}",
        if scaling.is_empty() { "-".to_string() } else { scaling.join("; ") }
    );
    println!();

    println!("{:<5} {:<40} {:<32} Status", "Lvl", "Attack", "Scaling");
    for weapon in variant.levels() {
        println!(
            "+{:<4} {:<40} {:<32} {}",
            weapon.metadata.upgrade_level,
            format_slots(&weapon.attack),
            format_slots(&weapon.attribute_scaling),
            format_slots(&weapon.statuses)
        );
    }
}

/// Present slots as `name value` pairs, or `-` when every slot is absent
fn format_slots<K: Kind, T: Display, const N: usize>(slots: &Slots<K, T, N>) -> String {
    if slots.is_empty() {
        return "-".to_string();
    }
    slots
        .iter()
        .map(|(kind, value)| format!("{} {}", kind.name(), value))
        .collect::<Vec<_>>()
        .join(" ")
}
