//! Compact positional encoding of weapon variants
//!
//! The artifact is a JSON pair `[names, variants]`. Each variant is an array
//! of fields in a fixed order, with the weapon name replaced by its index in
//! `names`. Trailing fields equal to their default are omitted, and the
//! decoder puts them back.
//!
//! | index | field | default |
//! |---|---|---|
//! | 0 | name index | required |
//! | 1 | affinity code | required |
//! | 2 | weapon type code | required |
//! | 3 | max upgrade level | required |
//! | 4 | requirements `[str..arc]` | `[]` |
//! | 5 | attack per level `[physical..holy]` | `[]` |
//! | 6 | attribute scaling per level `[str..arc]` | `[]` |
//! | 7 | scaling attribute bitmasks per level `[physical..holy]` | `[]` |
//! | 8 | scaling curve ids per level `[physical..holy]` | `[]` |
//! | 9 | status buildup per level `[frost..sleep]` | `[]` |
//! | 10 | paired | `false` |
//!
//! Inside a slot array an absent value is `0` (`null` for curve ids, where 0
//! is a real curve) and trailing absent values are dropped. A per-level
//! field is `[]` when every level is empty and otherwise has one entry per
//! upgrade level.

use crate::error::{Error, Result};
use crate::reference::{Affinity, Attribute, Kind, WeaponType};
use crate::weapon::{
    CurveId, PerAttribute, PerDamage, PerStatus, Slots, Weapon, WeaponMetadata, WeaponVariant,
};
use indexmap::IndexSet;
use serde_json::Value;

/// Version of the field layout below. Bump on any change to field order or defaults.
pub const FORMAT_VERSION: u32 = 1;

const NAME: usize = 0;
const AFFINITY: usize = 1;
const WEAPON_TYPE: usize = 2;
const MAX_UPGRADE_LEVEL: usize = 3;
const REQUIREMENTS: usize = 4;
const ATTACK: usize = 5;
const ATTRIBUTE_SCALING: usize = 6;
const DAMAGE_SCALING_ATTRIBUTES: usize = 7;
const DAMAGE_SCALING_CURVES: usize = 8;
const STATUSES: usize = 9;
const PAIRED: usize = 10;

/// Fields that are always written
const REQUIRED_FIELDS: usize = REQUIREMENTS;
const FIELD_COUNT: usize = PAIRED + 1;

/// Largest magnitude at which every integer is exactly representable as f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Distinct weapon names in first-encountered order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: IndexSet<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index names in the order the records mention them
    pub fn from_weapons(weapons: &[Weapon]) -> Self {
        Self {
            names: weapons
                .iter()
                .map(|weapon| weapon.metadata.weapon_name.clone())
                .collect(),
        }
    }

    /// Rebuild a decoded table; a repeated name is an error
    pub fn from_names(names: Vec<String>) -> Result<Self> {
        let mut table = Self::new();
        for name in names {
            if !table.names.insert(name.clone()) {
                return Err(Error::Decode(format!("duplicate name {name:?} in name table")));
            }
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    fn to_json(&self) -> Value {
        Value::Array(self.names.iter().cloned().map(Value::String).collect())
    }
}

/// The compiled weapon data: a name table plus every variant
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    names: NameTable,
    variants: Vec<WeaponVariant>,
}

impl Artifact {
    pub fn new(names: NameTable, variants: Vec<WeaponVariant>) -> Self {
        Self { names, variants }
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn variants(&self) -> &[WeaponVariant] {
        &self.variants
    }

    /// Every variant of one weapon, in artifact order
    pub fn variants_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a WeaponVariant> {
        self.variants.iter().filter(move |variant| variant.name() == name)
    }

    /// Find one variant by weapon name and affinity
    pub fn variant(&self, name: &str, affinity: Affinity) -> Option<&WeaponVariant> {
        self.variants
            .iter()
            .find(|variant| variant.name() == name && variant.affinity() == affinity)
    }

    /// Encode as the `[names, variants]` pair
    pub fn to_json(&self) -> Result<Value> {
        let variants = self
            .variants
            .iter()
            .map(|variant| encode_variant(variant, &self.names))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            format_version = FORMAT_VERSION,
            variants = variants.len(),
            "Encoded weapon variants"
        );
        Ok(Value::Array(vec![self.names.to_json(), Value::Array(variants)]))
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let value = self.to_json()?;
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        decode_artifact(&serde_json::from_str(text)?)
    }
}

/// Decode a `[names, variants]` pair
pub fn decode_artifact(value: &Value) -> Result<Artifact> {
    let pair = value
        .as_array()
        .filter(|pair| pair.len() == 2)
        .ok_or_else(|| decode_error("artifact is not a [names, variants] pair"))?;

    let names = pair[0]
        .as_array()
        .ok_or_else(|| decode_error("name table is not an array"))?
        .iter()
        .map(|name| {
            name.as_str()
                .map(str::to_string)
                .ok_or_else(|| decode_error(format!("name table entry {name} is not a string")))
        })
        .collect::<Result<Vec<_>>>()?;
    let names = NameTable::from_names(names)?;

    let variants = pair[1]
        .as_array()
        .ok_or_else(|| decode_error("variant list is not an array"))?
        .iter()
        .map(|variant| decode_variant(variant, &names))
        .collect::<Result<Vec<_>>>()?;

    Ok(Artifact::new(names, variants))
}

/// Encode one variant as a positional field array
pub fn encode_variant(variant: &WeaponVariant, names: &NameTable) -> Result<Value> {
    let base = variant.base();
    let metadata = &base.metadata;
    let name_index = names
        .index_of(&metadata.weapon_name)
        .ok_or_else(|| Error::UnknownName(metadata.weapon_name.clone()))?;
    variant.check_levels()?;
    let levels = variant.levels();

    let mut fields = vec![
        Value::from(name_index),
        Value::from(metadata.affinity.index()),
        Value::from(metadata.weapon_type.index()),
        Value::from(metadata.max_upgrade_level),
        encode_slots(&base.requirements, &zero(), |&v| Value::from(v)),
        per_level(levels, |w| encode_slots(&w.attack, &zero(), |&v| encode_number(v))),
        per_level(levels, |w| {
            encode_slots(&w.attribute_scaling, &zero(), |&v| encode_number(v))
        }),
        per_level(levels, |w| {
            encode_slots(&w.damage_scaling_attributes, &zero(), |attributes| {
                Value::from(attribute_mask(attributes))
            })
        }),
        per_level(levels, |w| {
            encode_slots(&w.damage_scaling_curves, &Value::Null, |curve| Value::from(curve.0))
        }),
        per_level(levels, |w| encode_slots(&w.statuses, &zero(), |&v| encode_number(v))),
        Value::Bool(base.paired),
    ];

    while fields.len() > REQUIRED_FIELDS && fields.last().is_some_and(is_default_field) {
        fields.pop();
    }

    Ok(Value::Array(fields))
}

/// Decode one positional field array, padding omitted fields with their defaults
pub fn decode_variant(value: &Value, names: &NameTable) -> Result<WeaponVariant> {
    let fields = value
        .as_array()
        .ok_or_else(|| decode_error("variant is not an array"))?;
    if !(REQUIRED_FIELDS..=FIELD_COUNT).contains(&fields.len()) {
        return Err(decode_error(format!(
            "variant has {} fields, expected {REQUIRED_FIELDS} to {FIELD_COUNT}",
            fields.len()
        )));
    }

    let name_index = decode_index(&fields[NAME], "name index")?;
    let weapon_name = names
        .name(name_index)
        .ok_or_else(|| decode_error(format!("name index {name_index} is out of range")))?
        .to_string();
    let affinity_code = decode_index(&fields[AFFINITY], "affinity code")?;
    let affinity = Affinity::from_index(affinity_code)
        .ok_or_else(|| decode_error(format!("unknown affinity code {affinity_code}")))?;
    let weapon_type_code = decode_index(&fields[WEAPON_TYPE], "weapon type code")?;
    let weapon_type = WeaponType::from_index(weapon_type_code)
        .ok_or_else(|| decode_error(format!("unknown weapon type code {weapon_type_code}")))?;
    let max_upgrade_level = u8::try_from(decode_index(&fields[MAX_UPGRADE_LEVEL], "max upgrade level")?)
        .map_err(|_| decode_error("max upgrade level is out of range"))?;

    let level_count = usize::from(max_upgrade_level) + 1;
    let field = |index: usize| fields.get(index);

    let requirements: PerAttribute<u32> = decode_slots(field(REQUIREMENTS), "requirements", decode_whole)?;
    let attack: Vec<PerDamage<f64>> = per_level_decoded(field(ATTACK), level_count, "attack", |v| {
        decode_slots(Some(v), "attack", decode_number)
    })?;
    let attribute_scaling: Vec<PerAttribute<f64>> =
        per_level_decoded(field(ATTRIBUTE_SCALING), level_count, "attribute scaling", |v| {
            decode_slots(Some(v), "attribute scaling", decode_number)
        })?;
    let damage_scaling_attributes: Vec<PerDamage<Vec<Attribute>>> = per_level_decoded(
        field(DAMAGE_SCALING_ATTRIBUTES),
        level_count,
        "damage scaling attributes",
        |v| decode_slots(Some(v), "damage scaling attributes", decode_attribute_mask),
    )?;
    let damage_scaling_curves: Vec<PerDamage<CurveId>> = per_level_decoded(
        field(DAMAGE_SCALING_CURVES),
        level_count,
        "damage scaling curves",
        |v| decode_slots(Some(v), "damage scaling curves", decode_curve),
    )?;
    let statuses: Vec<PerStatus<f64>> = per_level_decoded(field(STATUSES), level_count, "statuses", |v| {
        decode_slots(Some(v), "statuses", decode_number)
    })?;
    let paired = match field(PAIRED) {
        None => false,
        Some(Value::Bool(paired)) => *paired,
        Some(other) => return Err(decode_error(format!("paired flag {other} is not a boolean"))),
    };

    let levels = (0..=max_upgrade_level)
        .map(|upgrade_level| {
            let level = usize::from(upgrade_level);
            Weapon {
                metadata: WeaponMetadata {
                    weapon_name: weapon_name.clone(),
                    affinity,
                    weapon_type,
                    max_upgrade_level,
                    upgrade_level,
                },
                requirements: requirements.clone(),
                attack: attack[level].clone(),
                attribute_scaling: attribute_scaling[level].clone(),
                damage_scaling_attributes: damage_scaling_attributes[level].clone(),
                damage_scaling_curves: damage_scaling_curves[level].clone(),
                statuses: statuses[level].clone(),
                paired,
            }
        })
        .collect();

    WeaponVariant::new(levels).ok_or_else(|| decode_error("variant has no upgrade levels"))
}

/// Encoded absent value in numeric slot arrays
fn zero() -> Value {
    Value::from(0)
}

fn is_default_field(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => !flag,
        Value::Array(values) => values.is_empty(),
        _ => false,
    }
}

/// Integral values are written as JSON integers
fn encode_number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn attribute_mask(attributes: &[Attribute]) -> u32 {
    attributes
        .iter()
        .fold(0, |mask, attribute| mask | (1 << attribute.index()))
}

fn encode_slots<K: Kind, T, const N: usize>(
    slots: &Slots<K, T, N>,
    absent: &Value,
    encode: impl Fn(&T) -> Value,
) -> Value {
    let mut values: Vec<Value> = slots
        .slots()
        .iter()
        .map(|slot| slot.as_ref().map_or_else(|| absent.clone(), &encode))
        .collect();
    while values.last() == Some(absent) {
        values.pop();
    }
    Value::Array(values)
}

fn per_level(levels: &[Weapon], encode: impl Fn(&Weapon) -> Value) -> Value {
    let values: Vec<Value> = levels.iter().map(encode).collect();
    if values.iter().all(is_default_field) {
        Value::Array(Vec::new())
    } else {
        Value::Array(values)
    }
}

fn per_level_decoded<T: Default + Clone>(
    value: Option<&Value>,
    level_count: usize,
    what: &str,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    let levels = match value {
        None => return Ok(vec![T::default(); level_count]),
        Some(value) => value
            .as_array()
            .ok_or_else(|| decode_error(format!("{what} is not an array")))?,
    };

    if levels.is_empty() {
        return Ok(vec![T::default(); level_count]);
    }
    if levels.len() != level_count {
        return Err(decode_error(format!(
            "{what} has {} levels, expected {level_count}",
            levels.len()
        )));
    }
    levels.iter().map(decode).collect()
}

fn decode_slots<K: Kind, T, const N: usize>(
    value: Option<&Value>,
    what: &str,
    decode: fn(&Value) -> Result<Option<T>>,
) -> Result<Slots<K, T, N>> {
    let mut slots = Slots::new();
    let Some(value) = value else {
        return Ok(slots);
    };

    let values = value
        .as_array()
        .filter(|values| values.len() <= N)
        .ok_or_else(|| decode_error(format!("{what} is not an array of at most {N} values")))?;
    for (&kind, value) in K::ALL.iter().zip(values) {
        slots.set(kind, decode(value)?);
    }
    Ok(slots)
}

fn decode_index(value: &Value, what: &str) -> Result<usize> {
    value
        .as_u64()
        .and_then(|index| usize::try_from(index).ok())
        .ok_or_else(|| decode_error(format!("{what} {value} is not a non-negative integer")))
}

fn decode_number(value: &Value) -> Result<Option<f64>> {
    let number = value
        .as_f64()
        .ok_or_else(|| decode_error(format!("{value} is not a number")))?;
    Ok((number != 0.0).then_some(number))
}

fn decode_whole(value: &Value) -> Result<Option<u32>> {
    let number = value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| decode_error(format!("{value} is not a requirement")))?;
    Ok((number != 0).then_some(number))
}

fn decode_attribute_mask(value: &Value) -> Result<Option<Vec<Attribute>>> {
    let mask = value
        .as_u64()
        .filter(|mask| mask >> Attribute::ALL.len() == 0)
        .ok_or_else(|| decode_error(format!("{value} is not an attribute bitmask")))?;

    let attributes: Vec<Attribute> = Attribute::ALL
        .iter()
        .copied()
        .filter(|attribute| mask & (1 << attribute.index()) != 0)
        .collect();
    Ok((!attributes.is_empty()).then_some(attributes))
}

fn decode_curve(value: &Value) -> Result<Option<CurveId>> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_u64()
        .and_then(|id| u16::try_from(id).ok())
        .map(|id| Some(CurveId(id)))
        .ok_or_else(|| decode_error(format!("{value} is not a curve id")))
}

fn decode_error(message: impl Into<String>) -> Error {
    Error::Decode(message.into())
}
