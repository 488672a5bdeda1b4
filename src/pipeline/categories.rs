//! Combining a directory of per-category statistics files

use crate::data::csv_io::{read_table, write_table};
use crate::data::table::Table;
use crate::normalize::attribution::{TEAM_COLUMN, UNKNOWN};
use crate::unify::{combine_categories, Category};
use crate::{CombineConfig, FootballError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Load every category file present in `dir`; absent files are skipped
pub fn load_category_dir<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<Category, Table>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(FootballError::MissingInput {
            label: "category directory".to_string(),
            path: dir.to_path_buf(),
        });
    }

    let mut datasets = BTreeMap::new();
    for category in Category::ALL {
        let path = dir.join(category.file_name());
        if !path.is_file() {
            log::warn!("No {} data at {}, skipping", category, path.display());
            continue;
        }
        let table = read_table(&path)?;
        log::info!("Loaded {} rows for '{}'", table.len(), category);
        datasets.insert(category, table);
    }
    Ok(datasets)
}

/// Combine already loaded category tables and write the wide table to `output`
pub fn combine_and_save<P: AsRef<Path>>(
    datasets: &BTreeMap<Category, Table>,
    config: &CombineConfig,
    output: P,
) -> Result<Table> {
    let combined = combine_categories(datasets, &config.key_candidates)?;
    write_table(&combined, output, &[])?;

    let unknown = combined
        .column_values(TEAM_COLUMN)
        .filter(|v| v.to_string().trim() == UNKNOWN)
        .count();
    if unknown > 0 {
        log::warn!(
            "{} of {} rows have no identified team",
            unknown,
            combined.len()
        );
    }
    Ok(combined)
}

/// Combine the category files of `dir` and write the wide table to `output`
pub fn combine_dir_and_save<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    config: &CombineConfig,
    output: Q,
) -> Result<Table> {
    let datasets = load_category_dir(dir)?;
    combine_and_save(&datasets, config, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, Record};

    fn player(team: &str, name: &str, stat: &str, value: &str) -> Record {
        Record::from_pairs([("Position", "1"), ("Team", team), ("Name", name), (stat, value)])
    }

    #[test]
    fn test_combine_in_memory_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut datasets = BTreeMap::new();
        datasets.insert(
            Category::Summary,
            Table::from_records(vec![player("Junior", "Carlos Bacca", "Rating", "7.1")]),
        );
        datasets.insert(
            Category::Passing,
            Table::from_records(vec![player("Junior", "Carlos Bacca", "Key passes", "3")]),
        );

        let output = dir.path().join("combined.csv");
        let combined = combine_and_save(&datasets, &Config::default().combine, &output).unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined.rows()[0].text("Key passes"), "3");
        assert!(output.exists());
    }

    #[test]
    fn test_missing_directory_is_missing_input() {
        let err = load_category_dir("/no/such/category/dir").unwrap_err();
        assert!(matches!(err, FootballError::MissingInput { .. }));
    }
}
