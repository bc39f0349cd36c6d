//! Delimited text table loading
//!
//! Every source shares one shape: a header row, then one row per key. The
//! first column is the key; the remaining columns are handed to a mapper,
//! either whole or sliced into fixed-width groups, one per upgrade level.

use super::{SourceKind, WeaponKey};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Field delimiter of every source
pub const DELIMITER: char = ',';

/// Rows keyed by weapon key, in file order
pub type KeyedRows<T> = IndexMap<WeaponKey, T>;

/// Parse a table where the first column is the key.
///
/// The header row and blank lines are skipped. A repeated key keeps its first
/// position and takes the later row's value.
pub fn parse_table<T, F>(text: &str, mut mapper: F) -> Result<KeyedRows<T>>
where
    F: FnMut(&[&str], &WeaponKey) -> Result<T>,
{
    let mut rows = IndexMap::new();

    for line in text.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(DELIMITER);
        let key = WeaponKey::new(fields.next().unwrap_or_default());
        let columns: Vec<&str> = fields.collect();
        let value = mapper(&columns, &key)?;
        rows.insert(key, value);
    }

    Ok(rows)
}

/// Parse a table where the columns after the key repeat once per upgrade level.
///
/// Trailing columns that do not fill a whole group are ignored.
pub fn parse_table_by_level<T, F>(text: &str, width: usize, mut mapper: F) -> Result<KeyedRows<Vec<T>>>
where
    F: FnMut(&[&str], &WeaponKey) -> Result<T>,
{
    parse_table(text, |columns, key| {
        level_groups(columns, width)
            .map(|group| mapper(group, key))
            .collect()
    })
}

/// Split columns into consecutive groups of `width`, one per upgrade level
pub fn level_groups<'a, 'b>(
    columns: &'a [&'b str],
    width: usize,
) -> std::slice::ChunksExact<'a, &'b str> {
    columns.chunks_exact(width.max(1))
}

/// Read a source file and parse it with [`parse_table`]
pub fn load_table<T, F>(kind: SourceKind, path: &Path, mapper: F) -> Result<KeyedRows<T>>
where
    F: FnMut(&[&str], &WeaponKey) -> Result<T>,
{
    let text = read_source(path)?;
    let rows = parse_table(&text, mapper)?;
    finish(kind, path, rows)
}

/// Read a source file and parse it with [`parse_table_by_level`]
pub fn load_table_by_level<T, F>(
    kind: SourceKind,
    path: &Path,
    width: usize,
    mapper: F,
) -> Result<KeyedRows<Vec<T>>>
where
    F: FnMut(&[&str], &WeaponKey) -> Result<T>,
{
    let text = read_source(path)?;
    let rows = parse_table_by_level(&text, width, mapper)?;
    finish(kind, path, rows)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn finish<T>(kind: SourceKind, path: &Path, rows: KeyedRows<T>) -> Result<KeyedRows<T>> {
    if rows.is_empty() {
        return Err(Error::EmptySource {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(source = %kind, rows = rows.len(), "Loaded {}", path.display());
    Ok(rows)
}

/// Column at `index`, or an empty string past the end of a short row
pub fn column<'a>(columns: &[&'a str], index: usize) -> &'a str {
    columns.get(index).copied().unwrap_or("").trim()
}

/// Parse a numeric field. Blank or malformed fields are absent, as are zeros:
/// a zero attack, scaling, or requirement means the weapon has no such stat.
pub fn number(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

/// Parse a whole-number field with the same absence rules as [`number`]
pub fn whole_number(field: &str) -> Option<u32> {
    field.trim().parse::<u32>().ok().filter(|v| *v != 0)
}
