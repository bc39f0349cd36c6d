//! Row layouts of the six Weapon Calculator sources
//!
//! Layouts are positional; header names are never consulted. Column indices
//! below count from the first column after the key.

use super::loader::{column, level_groups, number, whole_number};
use super::WeaponKey;
use crate::error::{Error, Result};
use crate::reference::{
    Attribute, DamageType, Kind, RawAffinity, StatusType, WeaponType, MAX_UPGRADE_LEVELS,
};
use crate::weapon::{CurveId, PerAttribute, PerDamage, PerStatus};

/// Columns per upgrade level in attack.csv: five damage types plus stamina damage (ignored)
pub const ATTACK_COLUMNS: usize = 6;

/// Columns per upgrade level in scaling.csv: one per attribute
pub const SCALING_COLUMNS: usize = 5;

/// Columns per upgrade level in status.csv: frost, poison, bleed
pub const STATUS_LEVEL_COLUMNS: usize = 3;

/// Level-independent columns at the start of a status.csv row
const STATUS_FIXED_COLUMNS: usize = 5;

/// Statuses whose buildup repeats per upgrade level, in column order
const LEVELED_STATUSES: [StatusType; STATUS_LEVEL_COLUMNS] =
    [StatusType::Frost, StatusType::Poison, StatusType::Bleed];

/// Statuses whose buildup is fixed for every upgrade level, with their column
const FIXED_STATUSES: [(StatusType, usize); 3] = [
    (StatusType::ScarletRot, 2),
    (StatusType::Madness, 3),
    (StatusType::Sleep, 4),
];

/// Per-weapon metadata from extraData.csv.
///
/// Generic over the affinity so that the raw rows and the resolved rows are
/// different types.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraData<A = RawAffinity> {
    pub weapon_name: String,
    pub affinity: A,
    pub max_upgrade_level: u8,
    pub weapon_type: WeaponType,
    pub requirements: PerAttribute<u32>,
    pub paired: bool,
}

impl<A> ExtraData<A> {
    /// Same row with a different affinity representation
    pub fn with_affinity<B>(self, affinity: B) -> ExtraData<B> {
        ExtraData {
            weapon_name: self.weapon_name,
            affinity,
            max_upgrade_level: self.max_upgrade_level,
            weapon_type: self.weapon_type,
            requirements: self.requirements,
            paired: self.paired,
        }
    }
}

/// Scaling curve ids from calcCorrectGraph.csv, plus the key into attackElementCorrect.csv
#[derive(Debug, Clone, PartialEq)]
pub struct CalcCorrect {
    pub attack_element_correct_id: WeaponKey,
    pub damage_scaling_curves: PerDamage<CurveId>,
}

/// attack.csv, one group per level: physical, magic, fire, lightning, holy, stamina
pub fn attack_row(columns: &[&str], _key: &WeaponKey) -> Result<PerDamage<f64>> {
    Ok(DamageType::ALL
        .iter()
        .filter_map(|&damage_type| {
            number(column(columns, damage_type.index())).map(|v| (damage_type, v))
        })
        .collect())
}

/// scaling.csv, one group per level: str, dex, int, fai, arc
pub fn scaling_row(columns: &[&str], _key: &WeaponKey) -> Result<PerAttribute<f64>> {
    Ok(Attribute::ALL
        .iter()
        .filter_map(|&attribute| number(column(columns, attribute.index())).map(|v| (attribute, v)))
        .collect())
}

/// extraData.csv: name, affinity, -, max upgrade, 5 requirements, -, -, weapon type, paired
pub fn extra_data_row(columns: &[&str], key: &WeaponKey) -> Result<ExtraData> {
    let affinity_name = column(columns, 1);
    let affinity = RawAffinity::from_name(affinity_name)
        .ok_or_else(|| unknown(key, "affinity", affinity_name))?;

    let max_upgrade_name = column(columns, 3);
    let max_upgrade_level = max_upgrade_name
        .parse::<u8>()
        .ok()
        .filter(|level| MAX_UPGRADE_LEVELS.contains(level))
        .ok_or_else(|| unknown(key, "max upgrade level", max_upgrade_name))?;

    let requirements = Attribute::ALL
        .iter()
        .filter_map(|&attribute| {
            whole_number(column(columns, 4 + attribute.index())).map(|v| (attribute, v))
        })
        .collect();

    let weapon_type_name = column(columns, 11);
    let weapon_type = WeaponType::from_name(weapon_type_name)
        .ok_or_else(|| unknown(key, "weapon type", weapon_type_name))?;

    let paired = match column(columns, 12) {
        "Yes" => true,
        "No" | "" => false,
        other => return Err(unknown(key, "paired flag", other)),
    };

    Ok(ExtraData {
        weapon_name: column(columns, 0).to_string(),
        affinity,
        max_upgrade_level,
        weapon_type,
        requirements,
        paired,
    })
}

/// calcCorrectGraph.csv: five curve ids (physical..holy), attackElementCorrect id
pub fn calc_correct_row(columns: &[&str], _key: &WeaponKey) -> Result<CalcCorrect> {
    let damage_scaling_curves = DamageType::ALL
        .iter()
        .filter_map(|&damage_type| {
            column(columns, damage_type.index())
                .parse::<u16>()
                .ok()
                .map(|id| (damage_type, CurveId(id)))
        })
        .collect();

    Ok(CalcCorrect {
        attack_element_correct_id: WeaponKey::new(column(columns, DamageType::ALL.len())),
        damage_scaling_curves,
    })
}

/// attackElementCorrect.csv: 25 flags, damage type major, attribute minor.
///
/// A damage type with no flagged attribute is left absent.
pub fn element_correct_row(columns: &[&str], _key: &WeaponKey) -> Result<PerDamage<Vec<Attribute>>> {
    let mut map = PerDamage::new();

    for &damage_type in DamageType::ALL {
        let attributes: Vec<Attribute> = Attribute::ALL
            .iter()
            .copied()
            .filter(|attribute| {
                let index = damage_type.index() * Attribute::ALL.len() + attribute.index();
                column(columns, index) == "1"
            })
            .collect();

        if !attributes.is_empty() {
            map.insert(damage_type, attributes);
        }
    }

    Ok(map)
}

/// status.csv: -, -, scarlet rot, madness, sleep, then frost/poison/bleed per level
pub fn status_row(columns: &[&str], _key: &WeaponKey) -> Result<Vec<PerStatus<f64>>> {
    let leveled = columns.get(STATUS_FIXED_COLUMNS..).unwrap_or_default();

    Ok(level_groups(leveled, STATUS_LEVEL_COLUMNS)
        .map(|group| {
            let mut statuses = PerStatus::new();
            for &(status, index) in FIXED_STATUSES.iter() {
                statuses.set(status, number(column(columns, index)));
            }
            for (i, &status) in LEVELED_STATUSES.iter().enumerate() {
                statuses.set(status, number(column(group, i)));
            }
            statuses
        })
        .collect())
}

fn unknown(key: &WeaponKey, field: &'static str, value: &str) -> Error {
    Error::UnknownValue {
        key: key.to_string(),
        field,
        value: value.to_string(),
    }
}
