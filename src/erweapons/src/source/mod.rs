//! Weapon Calculator source tables
//!
//! Loads the six CSV exports of the Elden Ring Weapon Calculator spreadsheets
//! into maps keyed by [`WeaponKey`], preserving row order.

mod loader;
mod tables;

pub use loader::{
    column, level_groups, load_table, load_table_by_level, number, parse_table,
    parse_table_by_level, whole_number, KeyedRows, DELIMITER,
};
pub use tables::{
    attack_row, calc_correct_row, element_correct_row, extra_data_row, scaling_row, status_row,
    CalcCorrect, ExtraData, ATTACK_COLUMNS, SCALING_COLUMNS, STATUS_LEVEL_COLUMNS,
};

use crate::error::Result;
use crate::reference::Attribute;
use crate::weapon::{PerAttribute, PerDamage, PerStatus};
use std::borrow::Borrow;
use std::path::{Path, PathBuf};

/// Uppercased first column of a source row, used to join rows across sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeaponKey(String);

impl WeaponKey {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for WeaponKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WeaponKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six sources, named by their file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Attack,
    Scaling,
    ExtraData,
    CalcCorrect,
    AttackElementCorrect,
    Status,
}

impl SourceKind {
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Attack,
        SourceKind::Scaling,
        SourceKind::ExtraData,
        SourceKind::CalcCorrect,
        SourceKind::AttackElementCorrect,
        SourceKind::Status,
    ];

    /// Canonical file name inside a data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Attack => "attack.csv",
            Self::Scaling => "scaling.csv",
            Self::ExtraData => "extraData.csv",
            Self::CalcCorrect => "calcCorrectGraph.csv",
            Self::AttackElementCorrect => "attackElementCorrect.csv",
            Self::Status => "status.csv",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Locations of the six source files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub attack: PathBuf,
    pub scaling: PathBuf,
    pub extra_data: PathBuf,
    pub calc_correct: PathBuf,
    pub attack_element_correct: PathBuf,
    pub status: PathBuf,
}

impl SourcePaths {
    /// Canonical file names inside `dir`
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            attack: dir.join(SourceKind::Attack.file_name()),
            scaling: dir.join(SourceKind::Scaling.file_name()),
            extra_data: dir.join(SourceKind::ExtraData.file_name()),
            calc_correct: dir.join(SourceKind::CalcCorrect.file_name()),
            attack_element_correct: dir.join(SourceKind::AttackElementCorrect.file_name()),
            status: dir.join(SourceKind::Status.file_name()),
        }
    }

    pub fn get(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Attack => &self.attack,
            SourceKind::Scaling => &self.scaling,
            SourceKind::ExtraData => &self.extra_data,
            SourceKind::CalcCorrect => &self.calc_correct,
            SourceKind::AttackElementCorrect => &self.attack_element_correct,
            SourceKind::Status => &self.status,
        }
    }

    /// Sources whose file does not exist
    pub fn missing(&self) -> Vec<SourceKind> {
        SourceKind::ALL
            .into_iter()
            .filter(|&kind| !self.get(kind).exists())
            .collect()
    }
}

/// In-memory contents of the six sources
#[derive(Debug, Clone, Copy)]
pub struct SourceTexts<'a> {
    pub attack: &'a str,
    pub scaling: &'a str,
    pub extra_data: &'a str,
    pub calc_correct: &'a str,
    pub attack_element_correct: &'a str,
    pub status: &'a str,
}

/// Every source parsed, before any correction
#[derive(Debug, Clone)]
pub struct RawSources {
    pub attack: KeyedRows<Vec<PerDamage<f64>>>,
    pub scaling: KeyedRows<Vec<PerAttribute<f64>>>,
    pub extra_data: KeyedRows<ExtraData>,
    pub calc_correct: KeyedRows<CalcCorrect>,
    /// Keyed by attackElementCorrect id rather than weapon
    pub attack_element_correct: KeyedRows<PerDamage<Vec<Attribute>>>,
    pub status: KeyedRows<Vec<PerStatus<f64>>>,
}

impl RawSources {
    /// Read and parse all six source files
    pub fn load(paths: &SourcePaths) -> Result<Self> {
        let sources = Self {
            attack: load_table_by_level(
                SourceKind::Attack,
                &paths.attack,
                ATTACK_COLUMNS,
                attack_row,
            )?,
            scaling: load_table_by_level(
                SourceKind::Scaling,
                &paths.scaling,
                SCALING_COLUMNS,
                scaling_row,
            )?,
            extra_data: load_table(SourceKind::ExtraData, &paths.extra_data, extra_data_row)?,
            calc_correct: load_table(SourceKind::CalcCorrect, &paths.calc_correct, calc_correct_row)?,
            attack_element_correct: load_table(
                SourceKind::AttackElementCorrect,
                &paths.attack_element_correct,
                element_correct_row,
            )?,
            status: load_table(SourceKind::Status, &paths.status, status_row)?,
        };
        sources.log_counts();
        Ok(sources)
    }

    /// Parse all six sources from memory
    pub fn parse(texts: &SourceTexts<'_>) -> Result<Self> {
        let sources = Self {
            attack: parse_table_by_level(texts.attack, ATTACK_COLUMNS, attack_row)?,
            scaling: parse_table_by_level(texts.scaling, SCALING_COLUMNS, scaling_row)?,
            extra_data: parse_table(texts.extra_data, extra_data_row)?,
            calc_correct: parse_table(texts.calc_correct, calc_correct_row)?,
            attack_element_correct: parse_table(texts.attack_element_correct, element_correct_row)?,
            status: parse_table(texts.status, status_row)?,
        };
        sources.log_counts();
        Ok(sources)
    }

    fn log_counts(&self) {
        tracing::info!(
            attack = self.attack.len(),
            scaling = self.scaling.len(),
            extra_data = self.extra_data.len(),
            calc_correct = self.calc_correct.len(),
            attack_element_correct = self.attack_element_correct.len(),
            status = self.status.len(),
            "Loaded weapon sources"
        );
    }
}
