//! Builders that render small, consistent source tables for tests

use crate::reference::{Attribute, DamageType, Kind, StatusType, WeaponType};
use crate::source::{SourceKind, SourceTexts};
use crate::weapon::{PerAttribute, PerDamage, PerStatus};

/// One weapon row across all six sources.
///
/// By default the weapon deals 100 physical damage scaling with 0.5 str,
/// requires 10 str, and every stat is the same at every upgrade level.
#[derive(Debug, Clone)]
pub struct WeaponRow {
    name: String,
    affinity: String,
    source_key: Option<String>,
    max_upgrade_level: u8,
    levels: usize,
    weapon_type: WeaponType,
    paired: bool,
    attack: PerDamage<f64>,
    scaling: PerAttribute<f64>,
    requirements: PerAttribute<u32>,
    scales_with: PerDamage<Vec<Attribute>>,
    statuses: PerStatus<f64>,
    element_correct_id: Option<String>,
    with_scaling: bool,
    with_status: bool,
}

impl WeaponRow {
    pub fn new(name: &str, affinity: &str, max_upgrade_level: u8) -> Self {
        Self {
            name: name.to_string(),
            affinity: affinity.to_string(),
            source_key: None,
            max_upgrade_level,
            levels: usize::from(max_upgrade_level) + 1,
            weapon_type: WeaponType::StraightSword,
            paired: false,
            attack: [(DamageType::Physical, 100.0)].into_iter().collect(),
            scaling: [(Attribute::Str, 0.5)].into_iter().collect(),
            requirements: [(Attribute::Str, 10)].into_iter().collect(),
            scales_with: [(DamageType::Physical, vec![Attribute::Str])]
                .into_iter()
                .collect(),
            statuses: PerStatus::new(),
            element_correct_id: None,
            with_scaling: true,
            with_status: true,
        }
    }

    /// Source key: the affinity prefix plus the name, as in the spreadsheets
    pub fn key(&self) -> String {
        if let Some(key) = &self.source_key {
            key.clone()
        } else if self.affinity == "None" {
            self.name.clone()
        } else {
            format!("{} {}", self.affinity, self.name)
        }
    }

    /// Key the row under `key` instead of the derived one
    pub fn source_key(mut self, key: &str) -> Self {
        self.source_key = Some(key.to_string());
        self
    }

    pub fn attack(mut self, damage_type: DamageType, value: f64) -> Self {
        self.attack.insert(damage_type, value);
        self
    }

    pub fn scaling(mut self, attribute: Attribute, value: f64) -> Self {
        self.scaling.insert(attribute, value);
        self
    }

    pub fn requirement(mut self, attribute: Attribute, value: u32) -> Self {
        self.requirements.insert(attribute, value);
        self
    }

    pub fn scales_with(mut self, damage_type: DamageType, attributes: &[Attribute]) -> Self {
        self.scales_with.insert(damage_type, attributes.to_vec());
        self
    }

    pub fn status(mut self, status: StatusType, value: f64) -> Self {
        self.statuses.insert(status, value);
        self
    }

    pub fn weapon_type(mut self, weapon_type: WeaponType) -> Self {
        self.weapon_type = weapon_type;
        self
    }

    pub fn paired(mut self) -> Self {
        self.paired = true;
        self
    }

    /// Number of level groups written to attack.csv and scaling.csv
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Point calcCorrectGraph.csv at an attackElementCorrect row that is never written
    pub fn element_correct_id(mut self, id: &str) -> Self {
        self.element_correct_id = Some(id.to_string());
        self
    }

    pub fn without_scaling(mut self) -> Self {
        self.with_scaling = false;
        self
    }

    pub fn without_status(mut self) -> Self {
        self.with_status = false;
        self
    }
}

/// A set of weapon rows rendered into the six source tables
#[derive(Debug, Clone, Default)]
pub struct SourceFixture {
    rows: Vec<WeaponRow>,
}

/// Owned source text produced by [`SourceFixture::render`]
#[derive(Debug, Clone)]
pub struct RenderedSources {
    pub attack: String,
    pub scaling: String,
    pub extra_data: String,
    pub calc_correct: String,
    pub attack_element_correct: String,
    pub status: String,
}

impl RenderedSources {
    pub fn texts(&self) -> SourceTexts<'_> {
        SourceTexts {
            attack: &self.attack,
            scaling: &self.scaling,
            extra_data: &self.extra_data,
            calc_correct: &self.calc_correct,
            attack_element_correct: &self.attack_element_correct,
            status: &self.status,
        }
    }

    /// Write the tables under their canonical file names
    pub fn write_to(&self, dir: &std::path::Path) -> std::io::Result<()> {
        let texts = self.texts();
        let files = [
            (SourceKind::Attack, texts.attack),
            (SourceKind::Scaling, texts.scaling),
            (SourceKind::ExtraData, texts.extra_data),
            (SourceKind::CalcCorrect, texts.calc_correct),
            (SourceKind::AttackElementCorrect, texts.attack_element_correct),
            (SourceKind::Status, texts.status),
        ];
        for (kind, text) in files {
            std::fs::write(dir.join(kind.file_name()), text)?;
        }
        Ok(())
    }
}

impl SourceFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weapon(mut self, row: WeaponRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn render(&self) -> RenderedSources {
        let mut out = RenderedSources {
            attack: "Name,Phys,Mag,Fire,Ligt,Holy,Stam\n".to_string(),
            scaling: "Name,Str,Dex,Int,Fai,Arc\n".to_string(),
            extra_data: "Key,Name,Affinity,Id,Max,Str,Dex,Int,Fai,Arc,A,B,Type,Paired\n"
                .to_string(),
            calc_correct: "Name,Phys,Mag,Fire,Ligt,Holy,Element\n".to_string(),
            attack_element_correct: "Id,Flags\n".to_string(),
            status: "Name,A,B,Rot,Madness,Sleep,Frost,Poison,Bleed\n".to_string(),
        };

        for (i, row) in self.rows.iter().enumerate() {
            let key = row.key();

            let attack_group = format!("{},0", join_slots(row.attack.slots()));
            out.attack
                .push_str(&format!("{},{}\n", key, repeat(&attack_group, row.levels)));

            if row.with_scaling {
                let scaling_group = join_slots(row.scaling.slots());
                out.scaling
                    .push_str(&format!("{},{}\n", key, repeat(&scaling_group, row.levels)));
            }

            out.extra_data.push_str(&format!(
                "{},{},{},0,{},{},,,{},{}\n",
                key,
                row.name,
                row.affinity,
                row.max_upgrade_level,
                join_slots(row.requirements.slots()),
                row.weapon_type,
                if row.paired { "Yes" } else { "No" },
            ));

            let element_id = match &row.element_correct_id {
                Some(id) => id.clone(),
                None => {
                    let id = (10000 + i).to_string();
                    let flags: Vec<&str> = DamageType::ALL
                        .iter()
                        .flat_map(|&damage_type| {
                            let listed = row.scales_with.get(damage_type);
                            Attribute::ALL.iter().map(move |attribute| {
                                if listed.is_some_and(|list| list.contains(attribute)) {
                                    "1"
                                } else {
                                    "0"
                                }
                            })
                        })
                        .collect();
                    out.attack_element_correct
                        .push_str(&format!("{},{}\n", id, flags.join(",")));
                    id
                }
            };
            out.calc_correct
                .push_str(&format!("{},0,0,0,0,0,{}\n", key, element_id));

            if row.with_status {
                let fixed: Vec<String> = [StatusType::ScarletRot, StatusType::Madness, StatusType::Sleep]
                    .iter()
                    .map(|&status| format_value(row.statuses.get(status).copied()))
                    .collect();
                let leveled: Vec<String> = [StatusType::Frost, StatusType::Poison, StatusType::Bleed]
                    .iter()
                    .map(|&status| format_value(row.statuses.get(status).copied()))
                    .collect();
                out.status.push_str(&format!(
                    "{},x,x,{},{}\n",
                    key,
                    fixed.join(","),
                    repeat(&leveled.join(","), row.levels)
                ));
            }
        }

        out
    }
}

fn format_value<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "0".to_string(), |v| v.to_string())
}

fn join_slots<T: ToString + Copy>(slots: &[Option<T>]) -> String {
    slots
        .iter()
        .map(|slot| format_value(*slot))
        .collect::<Vec<_>>()
        .join(",")
}

fn repeat(group: &str, times: usize) -> String {
    vec![group; times].join(",")
}
