//! Join the normalized sources into per-level weapon records

use crate::error::{Error, Result};
use crate::normalize::NormalizedSources;
use crate::reference::Affinity;
use crate::source::{SourceKind, WeaponKey};
use crate::weapon::{PerStatus, Weapon, WeaponMetadata, WeaponVariant};
use indexmap::IndexMap;

/// Assemble one record per upgrade level for every weapon in the attack source.
///
/// Records come out in attack source row order, level 0 first. A weapon key
/// missing from any other weapon-keyed source (status excepted) is an error.
pub fn assemble(sources: &NormalizedSources) -> Result<Vec<Weapon>> {
    let mut weapons = Vec::new();

    for key in sources.attack.keys() {
        weapons.extend(assemble_weapon(sources, key)?);
    }

    tracing::info!(
        weapons = sources.attack.len(),
        records = weapons.len(),
        "Assembled weapon records"
    );
    Ok(weapons)
}

/// Every upgrade level of one weapon key
pub fn assemble_weapon(sources: &NormalizedSources, key: &WeaponKey) -> Result<Vec<Weapon>> {
    let attack_by_level = lookup(&sources.attack, SourceKind::Attack, key)?;
    let scaling_by_level = lookup(&sources.scaling, SourceKind::Scaling, key)?;
    let extra = lookup(&sources.extra_data, SourceKind::ExtraData, key)?;
    let calc_correct = lookup(&sources.calc_correct, SourceKind::CalcCorrect, key)?;
    let damage_scaling_attributes = lookup(
        &sources.attack_element_correct,
        SourceKind::AttackElementCorrect,
        &calc_correct.attack_element_correct_id,
    )?;
    let status_by_level = sources.status.get(key);

    (0..=extra.max_upgrade_level)
        .map(|upgrade_level| {
            let level = usize::from(upgrade_level);

            let attack = attack_by_level
                .get(level)
                .ok_or_else(|| missing_level(SourceKind::Attack, key, upgrade_level))?;
            let attribute_scaling = scaling_by_level
                .get(level)
                .ok_or_else(|| missing_level(SourceKind::Scaling, key, upgrade_level))?;
            let statuses = status_by_level
                .and_then(|levels| levels.get(level))
                .cloned()
                .unwrap_or_else(PerStatus::new);

            let mut weapon = Weapon {
                metadata: WeaponMetadata {
                    weapon_name: extra.weapon_name.clone(),
                    affinity: extra.affinity,
                    weapon_type: extra.weapon_type,
                    max_upgrade_level: extra.max_upgrade_level,
                    upgrade_level,
                },
                requirements: extra.requirements.clone(),
                attack: attack.clone(),
                attribute_scaling: attribute_scaling.clone(),
                damage_scaling_attributes: damage_scaling_attributes.clone(),
                damage_scaling_curves: calc_correct.damage_scaling_curves.clone(),
                statuses,
                paired: extra.paired,
            };
            weapon.prune_damage_scaling();
            Ok(weapon)
        })
        .collect()
}

/// Group records by (weapon name, affinity), keeping first-seen group order
/// and record order within each group.
///
/// Two source keys that resolve to the same name and affinity would merge
/// into one variant with repeated levels; that is an
/// [`Error::IncompleteVariant`].
pub fn group_variants(weapons: Vec<Weapon>) -> Result<Vec<WeaponVariant>> {
    let mut groups: IndexMap<(String, Affinity), Vec<Weapon>> = IndexMap::new();

    for weapon in weapons {
        let key = (weapon.metadata.weapon_name.clone(), weapon.metadata.affinity);
        groups.entry(key).or_default().push(weapon);
    }

    groups
        .into_values()
        .filter_map(WeaponVariant::new)
        .map(|variant| variant.check_levels().map(|()| variant))
        .collect()
}

fn lookup<'a, T>(
    rows: &'a IndexMap<WeaponKey, T>,
    table: SourceKind,
    key: &WeaponKey,
) -> Result<&'a T> {
    rows.get(key).ok_or_else(|| Error::MissingEntry {
        table,
        key: key.to_string(),
    })
}

fn missing_level(table: SourceKind, key: &WeaponKey, level: u8) -> Error {
    Error::MissingLevel {
        table,
        key: key.to_string(),
        level,
    }
}
