//! Corrections applied to the raw sources before assembly
//!
//! Every correction is a fixed, hand-curated table keyed by exact weapon
//! identity. Nothing here is inferred from patterns in the data.

use crate::reference::{Affinity, Attribute, RawAffinity, StatusType};
use crate::source::{CalcCorrect, ExtraData, KeyedRows, RawSources, WeaponKey};
use crate::weapon::{PerAttribute, PerDamage, PerStatus};
use std::collections::HashSet;

/// Names damaged upstream by a search-and-replace that removed "Sacred"
pub const NAME_CORRECTIONS: &[(&str, &str)] = &[
    ("Relic Sword", "Sacred Relic Sword"),
    ("Mohgwyn's Spear", "Mohgwyn's Sacred Spear"),
];

/// Weapons that cannot take an Ash of War, so their infused rows are not real weapons
pub const NON_INFUSABLE_WEAPONS: &[&str] = &["Great Club"];

/// A status buildup rule that overrides the source data for one weapon key
pub struct StatusOverride {
    /// Weapon key as written in status.csv
    pub weapon: &'static str,
    pub apply: fn(&mut PerStatus<f64>, u8),
}

/// Known status bugs in the live game, kept as-is so the output matches it
pub const STATUS_OVERRIDES: &[StatusOverride] = &[
    StatusOverride {
        weapon: "Cold Antspur Rapier",
        apply: cold_antspur_scarlet_rot,
    },
    StatusOverride {
        weapon: "Occult Fingerprint Stone Shield",
        apply: remove_madness,
    },
];

/// Scarlet rot grows by 5 per level up to +5, then disappears from +6
fn cold_antspur_scarlet_rot(statuses: &mut PerStatus<f64>, upgrade_level: u8) {
    if upgrade_level < 6 {
        statuses.insert(StatusType::ScarletRot, 50.0 + 5.0 * f64::from(upgrade_level));
    } else {
        statuses.remove(StatusType::ScarletRot);
    }
}

/// The Occult affinity loses the shield's madness buildup
fn remove_madness(statuses: &mut PerStatus<f64>, _upgrade_level: u8) {
    statuses.remove(StatusType::Madness);
}

/// Sources after correction, with every affinity resolved
#[derive(Debug, Clone)]
pub struct NormalizedSources {
    pub attack: KeyedRows<Vec<PerDamage<f64>>>,
    pub scaling: KeyedRows<Vec<PerAttribute<f64>>>,
    pub extra_data: KeyedRows<ExtraData<Affinity>>,
    pub calc_correct: KeyedRows<CalcCorrect>,
    pub attack_element_correct: KeyedRows<PerDamage<Vec<Attribute>>>,
    pub status: KeyedRows<Vec<PerStatus<f64>>>,
}

/// Apply every correction in order: names, impossible variants, affinities, status bugs
pub fn normalize(mut raw: RawSources) -> NormalizedSources {
    correct_names(&mut raw.extra_data);
    remove_impossible_variants(&mut raw);
    let extra_data = resolve_affinities(raw.extra_data);
    apply_status_overrides(&mut raw.status);

    NormalizedSources {
        attack: raw.attack,
        scaling: raw.scaling,
        extra_data,
        calc_correct: raw.calc_correct,
        attack_element_correct: raw.attack_element_correct,
        status: raw.status,
    }
}

/// True name of a weapon whose source name was damaged upstream
pub fn true_weapon_name(name: &str) -> &str {
    NAME_CORRECTIONS
        .iter()
        .find(|(damaged, _)| *damaged == name)
        .map_or(name, |&(_, corrected)| corrected)
}

pub fn correct_names(extra_data: &mut KeyedRows<ExtraData>) {
    for extra in extra_data.values_mut() {
        let corrected = true_weapon_name(&extra.weapon_name);
        if corrected != extra.weapon_name {
            tracing::debug!("Restoring weapon name {:?} -> {:?}", extra.weapon_name, corrected);
            extra.weapon_name = corrected.to_string();
        }
    }
}

/// Drop infused rows of non-infusable weapons from every weapon-keyed source
pub fn remove_impossible_variants(raw: &mut RawSources) {
    let keys: Vec<WeaponKey> = raw
        .extra_data
        .iter()
        .filter(|(_, extra)| {
            !extra.affinity.is_unset()
                && NON_INFUSABLE_WEAPONS.contains(&extra.weapon_name.as_str())
        })
        .map(|(key, _)| key.clone())
        .collect();

    for key in &keys {
        raw.attack.shift_remove(key);
        raw.scaling.shift_remove(key);
        raw.extra_data.shift_remove(key);
        raw.calc_correct.shift_remove(key);
        raw.status.shift_remove(key);
    }

    if !keys.is_empty() {
        tracing::info!(removed = keys.len(), "Removed infused variants of non-infusable weapons");
    }
}

/// Resolve the `None` placeholder affinity.
///
/// A weapon name that appears anywhere with a real affinity is infusable, so
/// its `None` row is the `Standard` variant. Otherwise the weapon is unique
/// and its only row is `Special`. The full set of infusable names must be
/// known before any row is resolved.
pub fn resolve_affinities(extra_data: KeyedRows<ExtraData>) -> KeyedRows<ExtraData<Affinity>> {
    let infusable: HashSet<String> = extra_data
        .values()
        .filter(|extra| !extra.affinity.is_unset())
        .map(|extra| extra.weapon_name.clone())
        .collect();

    let mut standard = 0usize;
    let mut special = 0usize;

    let resolved: KeyedRows<ExtraData<Affinity>> = extra_data
        .into_iter()
        .map(|(key, extra)| {
            let affinity = match extra.affinity {
                RawAffinity::Infused(affinity) => affinity,
                RawAffinity::Unset if infusable.contains(&extra.weapon_name) => {
                    standard += 1;
                    Affinity::Standard
                }
                RawAffinity::Unset => {
                    special += 1;
                    Affinity::Special
                }
            };
            (key, extra.with_affinity(affinity))
        })
        .collect();

    tracing::info!(standard, special, "Resolved placeholder affinities");
    resolved
}

/// Apply [`STATUS_OVERRIDES`] to every level of the matching status rows
pub fn apply_status_overrides(status: &mut KeyedRows<Vec<PerStatus<f64>>>) {
    for rule in STATUS_OVERRIDES {
        let key = WeaponKey::new(rule.weapon);
        let Some(levels) = status.get_mut(&key) else {
            continue;
        };

        for (upgrade_level, statuses) in levels.iter_mut().enumerate() {
            let upgrade_level = u8::try_from(upgrade_level).unwrap_or(u8::MAX);
            (rule.apply)(statuses, upgrade_level);
        }
        tracing::debug!(weapon = rule.weapon, "Applied status override");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::WeaponType;
    use crate::source::parse_table;

    fn extra(name: &str, affinity: RawAffinity) -> ExtraData {
        ExtraData {
            weapon_name: name.to_string(),
            affinity,
            max_upgrade_level: 25,
            weapon_type: WeaponType::StraightSword,
            requirements: PerAttribute::new(),
            paired: false,
        }
    }

    fn rows<T>(entries: Vec<(&str, T)>) -> KeyedRows<T> {
        entries
            .into_iter()
            .map(|(key, value)| (WeaponKey::new(key), value))
            .collect()
    }

    fn empty_sources(extra_data: KeyedRows<ExtraData>) -> RawSources {
        let keys: Vec<WeaponKey> = extra_data.keys().cloned().collect();
        RawSources {
            attack: keys.iter().map(|k| (k.clone(), Vec::new())).collect(),
            scaling: keys.iter().map(|k| (k.clone(), Vec::new())).collect(),
            calc_correct: keys
                .iter()
                .map(|k| {
                    let calc = CalcCorrect {
                        attack_element_correct_id: WeaponKey::new("0"),
                        damage_scaling_curves: PerDamage::new(),
                    };
                    (k.clone(), calc)
                })
                .collect(),
            attack_element_correct: KeyedRows::new(),
            status: keys.iter().map(|k| (k.clone(), Vec::new())).collect(),
            extra_data,
        }
    }

    #[test]
    fn test_true_weapon_name() {
        assert_eq!(true_weapon_name("Relic Sword"), "Sacred Relic Sword");
        assert_eq!(true_weapon_name("Mohgwyn's Spear"), "Mohgwyn's Sacred Spear");
        assert_eq!(true_weapon_name("Longsword"), "Longsword");
        // Exact match only
        assert_eq!(true_weapon_name("Heavy Relic Sword"), "Heavy Relic Sword");
    }

    #[test]
    fn test_correct_names() {
        let mut extra_data = rows(vec![
            ("Relic Sword", extra("Relic Sword", RawAffinity::Unset)),
            ("Longsword", extra("Longsword", RawAffinity::Unset)),
        ]);
        correct_names(&mut extra_data);

        assert_eq!(extra_data["RELIC SWORD"].weapon_name, "Sacred Relic Sword");
        assert_eq!(extra_data["LONGSWORD"].weapon_name, "Longsword");
    }

    #[test]
    fn test_remove_impossible_variants() {
        let extra_data = rows(vec![
            ("Great Club", extra("Great Club", RawAffinity::Unset)),
            ("Heavy Great Club", extra("Great Club", RawAffinity::Infused(Affinity::Heavy))),
            ("Fire Great Club", extra("Great Club", RawAffinity::Infused(Affinity::Fire))),
            ("Heavy Club", extra("Club", RawAffinity::Infused(Affinity::Heavy))),
        ]);
        let mut raw = empty_sources(extra_data);
        remove_impossible_variants(&mut raw);

        for source_keys in [
            raw.attack.keys().collect::<Vec<_>>(),
            raw.scaling.keys().collect(),
            raw.extra_data.keys().collect(),
            raw.calc_correct.keys().collect(),
            raw.status.keys().collect(),
        ] {
            let names: Vec<&str> = source_keys.iter().map(|k| k.as_str()).collect();
            assert_eq!(names, vec!["GREAT CLUB", "HEAVY CLUB"]);
        }
    }

    #[test]
    fn test_resolve_affinities_two_pass() {
        // The uninfused row comes before its infused sibling
        let extra_data = rows(vec![
            ("Longsword", extra("Longsword", RawAffinity::Unset)),
            ("Moonveil", extra("Moonveil", RawAffinity::Unset)),
            ("Keen Longsword", extra("Longsword", RawAffinity::Infused(Affinity::Keen))),
        ]);
        let resolved = resolve_affinities(extra_data);

        assert_eq!(resolved["LONGSWORD"].affinity, Affinity::Standard);
        assert_eq!(resolved["MOONVEIL"].affinity, Affinity::Special);
        assert_eq!(resolved["KEEN LONGSWORD"].affinity, Affinity::Keen);

        let keys: Vec<&str> = resolved.keys().map(WeaponKey::as_str).collect();
        assert_eq!(keys, vec!["LONGSWORD", "MOONVEIL", "KEEN LONGSWORD"]);
    }

    #[test]
    fn test_resolve_affinities_uses_corrected_names() {
        let mut extra_data = rows(vec![
            ("Relic Sword", extra("Relic Sword", RawAffinity::Unset)),
            ("Heavy Sacred Relic Sword", extra("Sacred Relic Sword", RawAffinity::Infused(Affinity::Heavy))),
        ]);
        correct_names(&mut extra_data);
        let resolved = resolve_affinities(extra_data);

        assert_eq!(resolved["RELIC SWORD"].affinity, Affinity::Standard);
    }

    #[test]
    fn test_cold_antspur_scarlet_rot_override() {
        let text = "h,a,b,rot,mad,sleep,frost,poison,bleed\n\
            Cold Antspur Rapier,x,x,0,0,0,\
            60,0,0,61,0,0,62,0,0,63,0,0,64,0,0,65,0,0,66,0,0,67,0,0\n";
        let mut status = parse_table(text, crate::source::status_row).unwrap();
        apply_status_overrides(&mut status);

        let levels = &status["COLD ANTSPUR RAPIER"];
        assert_eq!(levels[0].get(StatusType::ScarletRot), Some(&50.0));
        assert_eq!(levels[5].get(StatusType::ScarletRot), Some(&75.0));
        assert_eq!(levels[6].get(StatusType::ScarletRot), None);
        assert_eq!(levels[7].get(StatusType::ScarletRot), None);
        // Frost is left alone
        assert_eq!(levels[6].get(StatusType::Frost), Some(&66.0));
    }

    #[test]
    fn test_occult_fingerprint_madness_override() {
        let text = "h,a,b,rot,mad,sleep,frost,poison,bleed\n\
            Occult Fingerprint Stone Shield,x,x,0,120,0,0,0,0,0,0,0\n\
            Fingerprint Stone Shield,x,x,0,120,0,0,0,0,0,0,0\n";
        let mut status = parse_table(text, crate::source::status_row).unwrap();
        apply_status_overrides(&mut status);

        assert!(status["OCCULT FINGERPRINT STONE SHIELD"]
            .iter()
            .all(|statuses| statuses.is_empty()));
        assert!(status["FINGERPRINT STONE SHIELD"]
            .iter()
            .all(|statuses| statuses.get(StatusType::Madness) == Some(&120.0)));
    }

    #[test]
    fn test_normalize_resolves_every_placeholder() {
        let extra_data = rows(vec![
            ("Club", extra("Club", RawAffinity::Unset)),
            ("Great Club", extra("Great Club", RawAffinity::Unset)),
            ("Cold Great Club", extra("Great Club", RawAffinity::Infused(Affinity::Cold))),
            ("Fire Club", extra("Club", RawAffinity::Infused(Affinity::Fire))),
        ]);
        let normalized = normalize(empty_sources(extra_data));

        assert_eq!(normalized.extra_data["CLUB"].affinity, Affinity::Standard);
        // With its infused rows gone, Great Club cannot be infused at all
        assert_eq!(normalized.extra_data["GREAT CLUB"].affinity, Affinity::Special);
        assert!(!normalized.extra_data.contains_key("COLD GREAT CLUB"));
        assert!(!normalized.attack.contains_key("COLD GREAT CLUB"));
    }
}
