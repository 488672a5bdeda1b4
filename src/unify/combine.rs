//! Combining per-category statistics tables into one wide table
//!
//! League statistics pages split player data across several tabs (summary,
//! attack, defence...). Each tab lands in its own table sharing a key such
//! as name, team and position; they are outer-joined on that key.

use super::duplicates::{drop_duplicate_keys, key_of};
use crate::data::table::Table;
use crate::{FootballError, Record, Result, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Name of the combined output file
pub const COMBINED_FILE_NAME: &str = "jugadores_liga_colombiana_completo.csv";

/// Statistics category, ordered by combination priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Summary,
    Attack,
    Defence,
    Passing,
    Goalkeeper,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Summary,
        Category::Attack,
        Category::Defence,
        Category::Passing,
        Category::Goalkeeper,
    ];

    /// File the category is saved under
    pub fn file_name(&self) -> &'static str {
        match self {
            Category::Summary => "jugadores_resumen.csv",
            Category::Attack => "jugadores_ataque.csv",
            Category::Defence => "jugadores_defensa.csv",
            Category::Passing => "jugadores_pases.csv",
            Category::Goalkeeper => "jugadores_porteros.csv",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Summary => write!(f, "summary"),
            Category::Attack => write!(f, "attack"),
            Category::Defence => write!(f, "defence"),
            Category::Passing => write!(f, "passing"),
            Category::Goalkeeper => write!(f, "goalkeeper"),
        }
    }
}

/// Fail with `SchemaMismatch` unless every key column is present
pub fn check_key_columns(table: &Table, keys: &[String], dataset: &str) -> Result<()> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|k| !table.has_column(k))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FootballError::SchemaMismatch {
            dataset: dataset.to_string(),
            missing,
        })
    }
}

/// Full outer join of `other` onto `base` by `keys`.
///
/// Both sides must already be unique on the key. Base rows keep their
/// order; rows only in `other` are appended.
fn outer_join(base: Table, other: &Table, keys: &[String]) -> Table {
    let new_columns: Vec<&String> = other
        .columns()
        .iter()
        .filter(|c| !keys.contains(c) && !base.has_column(c))
        .collect();

    let by_key: HashMap<Vec<String>, &Record> =
        other.rows().iter().map(|r| (key_of(r, keys), r)).collect();

    let mut columns: Vec<String> = base.columns().to_vec();
    columns.extend(new_columns.iter().map(|c| c.to_string()));
    let mut joined = Table::with_columns(columns);

    let mut matched = HashSet::new();
    for mut row in base.into_rows() {
        let key = key_of(&row, keys);
        let partner = by_key.get(&key);
        for column in &new_columns {
            let value = partner
                .and_then(|p| p.get(column))
                .cloned()
                .unwrap_or(Value::Absent);
            row.set(column.as_str(), value);
        }
        if partner.is_some() {
            matched.insert(key);
        }
        joined.push(row);
    }

    for row in other.rows() {
        if matched.contains(&key_of(row, keys)) {
            continue;
        }
        let mut record = Record::new();
        for column in keys {
            record.set(column.as_str(), row.get(column).cloned().unwrap_or_default());
        }
        for column in &new_columns {
            record.set(column.as_str(), row.get(column).cloned().unwrap_or_default());
        }
        joined.push(record);
    }

    joined
}

/// Merge the category tables into one table unique on the entity key.
///
/// The first non-empty category in priority order is the base; the key is
/// every `key_candidates` column present in it. Other categories contribute
/// only columns the result does not have yet. Categories lacking a key
/// column are skipped with a warning.
pub fn combine_categories(
    datasets: &BTreeMap<Category, Table>,
    key_candidates: &[String],
) -> Result<Table> {
    let Some((base_category, base)) = datasets.iter().find(|(_, t)| !t.is_empty()) else {
        return Err(FootballError::EmptyResult(
            "no category has data to combine".to_string(),
        ));
    };
    log::info!("Using '{}' as base", base_category);

    let keys: Vec<String> = key_candidates
        .iter()
        .filter(|k| base.has_column(k))
        .cloned()
        .collect();
    if keys.is_empty() {
        return Err(FootballError::SchemaMismatch {
            dataset: base_category.to_string(),
            missing: key_candidates.to_vec(),
        });
    }

    let mut combined = base.clone();
    drop_duplicate_keys(&mut combined, &keys);
    log::info!("Base has {} unique rows", combined.len());

    for (category, table) in datasets {
        if category == base_category || table.is_empty() {
            continue;
        }
        if let Err(e) = check_key_columns(table, &keys, &category.to_string()) {
            log::warn!("Skipping category: {}", e);
            continue;
        }

        let mut other = table.clone();
        drop_duplicate_keys(&mut other, &keys);
        combined = outer_join(combined, &other, &keys);
        drop_duplicate_keys(&mut combined, &keys);
        log::info!("After combining '{}': {} rows", category, combined.len());
    }

    Ok(combined)
}
