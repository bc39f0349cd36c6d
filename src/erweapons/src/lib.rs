//! # erweapons
//!
//! Elden Ring weapon data compiler.
//!
//! This library turns the Weapon Calculator spreadsheets (exported as CSV) into
//! one compact JSON artifact for the client calculator:
//! - Load the six source tables keyed by weapon name
//! - Correct known upstream data problems (names, affinities, status bugs)
//! - Join every source into one record per weapon per upgrade level
//! - Group records by weapon and affinity and encode them positionally
//!
//! ## Example
//!
//! ```no_run
//! use erweapons::SourcePaths;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let artifact = erweapons::compile(&SourcePaths::from_dir("data"))?;
//! println!("{} weapons", artifact.variants().len());
//!
//! std::fs::write("weaponData.json", artifact.to_json_string(false)?)?;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod codec;
pub mod error;
pub mod normalize;
pub mod reference;
pub mod source;
pub mod weapon;

#[cfg(test)]
mod fixtures;

#[doc(inline)]
pub use assemble::{assemble, group_variants};
#[doc(inline)]
pub use codec::{
    decode_artifact, decode_variant, encode_variant, Artifact, NameTable, FORMAT_VERSION,
};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use normalize::{normalize, NormalizedSources};
#[doc(inline)]
pub use reference::{
    Affinity, Attribute, DamageType, Kind, RawAffinity, StatusType, WeaponType,
};
#[doc(inline)]
pub use source::{RawSources, SourceKind, SourcePaths, SourceTexts, WeaponKey};
#[doc(inline)]
pub use weapon::{Weapon, WeaponMetadata, WeaponVariant};

/// Run the whole pipeline over the source files and return the compiled artifact.
pub fn compile(paths: &SourcePaths) -> Result<Artifact> {
    compile_sources(RawSources::load(paths)?)
}

/// Run normalization, assembly, and grouping over already-loaded sources.
pub fn compile_sources(raw: RawSources) -> Result<Artifact> {
    let sources = normalize(raw);
    let weapons = assemble(&sources)?;
    let names = NameTable::from_weapons(&weapons);
    let variants = group_variants(weapons)?;

    tracing::info!(
        names = names.len(),
        variants = variants.len(),
        "Compiled weapon data"
    );

    Ok(Artifact::new(names, variants))
}
