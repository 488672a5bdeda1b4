//! CSV persistence for tables
//!
//! Reading turns every cell into text (empty cells become absent). Writing
//! translates remaining site acronyms in the header into localized labels
//! and swaps the finished file into place in a single rename.

use super::table::Table;
use crate::{FootballError, Record, Result, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Load a CSV file with a header row
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FootballError::MissingInput {
            label: "CSV table".to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let headers = unique_headers(reader.headers()?.iter());

    let mut table = Table::with_columns(headers.clone());
    for result in reader.records() {
        let row = result?;
        let record = Record::from_pairs(headers.iter().enumerate().map(|(i, header)| {
            let value = match row.get(i) {
                Some(cell) if !cell.trim().is_empty() => Value::Text(cell.to_string()),
                _ => Value::Absent,
            };
            (header.clone(), value)
        }));
        table.push(record);
    }

    log::debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Repeated header names get a numeric suffix (`Goals`, `Goals.1`)
fn unique_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .map(|h| {
            let h = h.trim().to_string();
            let count = seen.entry(h.clone()).or_insert(0);
            let name = if *count == 0 {
                h.clone()
            } else {
                format!("{}.{}", h, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Write a table as UTF-8, comma-delimited CSV.
///
/// Header cells are looked up in `labels` (acronym to label) and fall back to
/// the column name. The file is written next to the target and then renamed.
pub fn write_table<P: AsRef<Path>>(
    table: &Table,
    path: P,
    labels: &[(&str, &str)],
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let staging = staging_path(path);
    let written = write_rows(table, &staging, labels).and_then(|_| {
        std::fs::rename(&staging, path)?;
        Ok(())
    });
    if let Err(e) = written {
        if staging.exists() {
            if let Err(cleanup) = std::fs::remove_file(&staging) {
                log::warn!("Could not remove {}: {}", staging.display(), cleanup);
            }
        }
        return Err(e);
    }

    log::info!("Saved {} rows to {}", table.len(), path.display());
    Ok(())
}

fn write_rows(table: &Table, staging: &Path, labels: &[(&str, &str)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_path(staging)?;
    let header: Vec<&str> = table
        .columns()
        .iter()
        .map(|c| {
            labels
                .iter()
                .find(|(acronym, _)| *acronym == c.as_str())
                .map(|(_, label)| *label)
                .unwrap_or(c.as_str())
        })
        .collect();
    writer.write_record(&header)?;
    for row in table.rows() {
        writer.write_record(table.row_cells(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_headers() {
        let headers = unique_headers(["Name", "Goals", "Goals", " Team "].into_iter());
        assert_eq!(headers, vec!["Name", "Goals", "Goals.1", "Team"]);
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let err = read_table("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, FootballError::MissingInput { .. }));
    }

    #[test]
    fn test_staging_path_is_a_sibling() {
        let staging = staging_path(Path::new("out/players.csv"));
        assert_eq!(staging, PathBuf::from("out/players.csv.partial"));
    }

    #[test]
    fn test_failed_write_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target path makes the final rename fail
        let target = dir.path().join("players.csv");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        let table = Table::from_records(vec![Record::from_pairs([("Name", "Dayro Moreno")])]);
        assert!(write_table(&table, &target, &[]).is_err());
        assert!(!dir.path().join("players.csv.partial").exists());
        assert!(target.join("keep").exists());
    }
}
