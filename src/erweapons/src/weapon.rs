//! Assembled weapon records
//!
//! Every per-attribute, per-damage-type, and per-status value is optional:
//! an absent slot means the weapon has no such stat, which is not the same
//! thing as a stat of zero.

use crate::error::Error;
use crate::reference::{Affinity, Attribute, DamageType, Kind, StatusType, WeaponType};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::marker::PhantomData;

/// Fixed-size table of optional values indexed by a [`Kind`]
#[derive(Debug, Clone, PartialEq)]
pub struct Slots<K, T, const N: usize> {
    values: [Option<T>; N],
    kind: PhantomData<K>,
}

/// Optional value per attribute (requirements, scaling)
pub type PerAttribute<T> = Slots<Attribute, T, 5>;

/// Optional value per damage type (attack, scaling attributes, curves)
pub type PerDamage<T> = Slots<DamageType, T, 5>;

/// Optional value per status effect (buildup)
pub type PerStatus<T> = Slots<StatusType, T, 6>;

impl<K: Kind, T, const N: usize> Slots<K, T, N> {
    /// A table with every slot absent
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|_| None),
            kind: PhantomData,
        }
    }

    pub fn get(&self, kind: K) -> Option<&T> {
        self.values[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: K) -> Option<&mut T> {
        self.values[kind.index()].as_mut()
    }

    pub fn set(&mut self, kind: K, value: Option<T>) {
        self.values[kind.index()] = value;
    }

    pub fn insert(&mut self, kind: K, value: T) {
        self.set(kind, Some(value));
    }

    pub fn remove(&mut self, kind: K) -> Option<T> {
        self.values[kind.index()].take()
    }

    pub fn contains(&self, kind: K) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Present slots in kind order
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        K::ALL
            .iter()
            .zip(self.values.iter())
            .filter_map(|(&kind, value)| value.as_ref().map(|v| (kind, v)))
    }

    /// Every slot in kind order, absent ones included
    pub fn slots(&self) -> &[Option<T>; N] {
        &self.values
    }
}

impl<K: Kind, T, const N: usize> Default for Slots<K, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kind, T, const N: usize> FromIterator<(K, T)> for Slots<K, T, N> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut slots = Self::new();
        for (kind, value) in iter {
            slots.insert(kind, value);
        }
        slots
    }
}

// Serialized as a map of present slots, like `{ "str": 10, "dex": 12 }`
impl<K: Kind + Serialize, T: Serialize, const N: usize> Serialize for Slots<K, T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (kind, value) in self.iter() {
            map.serialize_entry(kind.name(), value)?;
        }
        map.end()
    }
}

/// Identifier of a CalcCorrectGraph curve used to turn attribute scaling into bonus attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CurveId(pub u16);

/// Identity and upgrade information for one weapon record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponMetadata {
    pub weapon_name: String,
    pub affinity: Affinity,
    pub weapon_type: WeaponType,
    pub max_upgrade_level: u8,
    pub upgrade_level: u8,
}

/// One weapon at one upgrade level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub metadata: WeaponMetadata,
    pub requirements: PerAttribute<u32>,
    pub attack: PerDamage<f64>,
    pub attribute_scaling: PerAttribute<f64>,
    pub damage_scaling_attributes: PerDamage<Vec<Attribute>>,
    pub damage_scaling_curves: PerDamage<CurveId>,
    pub statuses: PerStatus<f64>,
    pub paired: bool,
}

impl Weapon {
    /// Drop scaling information that does not affect this weapon's attack power.
    ///
    /// Attributes stay only when the weapon scales with or requires them. A
    /// damage type with no remaining attributes, or one the weapon does not
    /// deal, loses both its attribute list and its curve.
    pub fn prune_damage_scaling(&mut self) {
        for &damage_type in DamageType::ALL {
            let Some(attributes) = self.damage_scaling_attributes.get_mut(damage_type) else {
                continue;
            };

            let scaling = &self.attribute_scaling;
            let requirements = &self.requirements;
            attributes.retain(|&attribute| {
                scaling.get(attribute).is_some_and(|&v| v != 0.0)
                    || requirements.get(attribute).is_some_and(|&v| v != 0)
            });

            let deals_damage = self.attack.get(damage_type).is_some_and(|&v| v != 0.0);
            if attributes.is_empty() || !deals_damage {
                self.damage_scaling_attributes.remove(damage_type);
                self.damage_scaling_curves.remove(damage_type);
            }
        }
    }
}

/// Every upgrade level of one (weapon name, affinity) pair, level 0 first
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeaponVariant {
    levels: Vec<Weapon>,
}

impl WeaponVariant {
    /// Wrap per-level records; `None` if there are none
    pub fn new(levels: Vec<Weapon>) -> Option<Self> {
        if levels.is_empty() {
            None
        } else {
            Some(Self { levels })
        }
    }

    /// Metadata of the base (+0) record
    pub fn metadata(&self) -> &WeaponMetadata {
        &self.levels[0].metadata
    }

    pub fn base(&self) -> &Weapon {
        &self.levels[0]
    }

    pub fn name(&self) -> &str {
        &self.metadata().weapon_name
    }

    pub fn affinity(&self) -> Affinity {
        self.metadata().affinity
    }

    pub fn levels(&self) -> &[Weapon] {
        &self.levels
    }

    pub fn level(&self, upgrade_level: u8) -> Option<&Weapon> {
        self.levels.get(usize::from(upgrade_level))
    }

    pub fn into_levels(self) -> Vec<Weapon> {
        self.levels
    }

    /// Check that the records are exactly upgrade levels 0 through max, in order
    pub fn check_levels(&self) -> crate::error::Result<()> {
        let metadata = self.metadata();
        let complete = self.levels.len() == usize::from(metadata.max_upgrade_level) + 1
            && self.levels.iter().enumerate().all(|(i, weapon)| {
                usize::from(weapon.metadata.upgrade_level) == i
                    && weapon.metadata.max_upgrade_level == metadata.max_upgrade_level
            });

        if complete {
            Ok(())
        } else {
            Err(Error::IncompleteVariant {
                name: metadata.weapon_name.clone(),
                affinity: metadata.affinity,
                levels: self.levels.len(),
                max_upgrade_level: metadata.max_upgrade_level,
            })
        }
    }
}
