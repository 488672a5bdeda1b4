//! Raw input batches and their filename metadata
//!
//! Match-log files follow the `YYYY_<EntityName>.csv` convention; the season
//! year and entity name are read from the filename.

use super::csv_io::read_table;
use super::table::Table;
use crate::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Placeholder for filename parts that could not be extracted
pub const UNKNOWN_PART: &str = "Desconocido";

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})_").expect("Invalid regex"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}_(.*?)\.csv").expect("Invalid regex"));

/// Season year and entity name taken from a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub year: String,
    pub entity: String,
}

impl SourceInfo {
    /// Parse a bare filename such as `2024_Juan_Perez.csv`
    pub fn from_file_name(file_name: &str) -> Self {
        let year = YEAR_RE
            .captures(file_name)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| UNKNOWN_PART.to_string());
        let entity = ENTITY_RE
            .captures(file_name)
            .map(|c| c[1].replace('_', " "))
            .unwrap_or_else(|| UNKNOWN_PART.to_string());
        SourceInfo { year, entity }
    }

    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_file_name(&name)
    }
}

/// Raw records from one source plus the metadata shared by all of them
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub path: PathBuf,
    pub info: SourceInfo,
    pub table: Table,
}

impl SourceBatch {
    /// Read a match-log CSV, taking metadata from its filename
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = read_table(path)?;
        Ok(SourceBatch {
            path: path.to_path_buf(),
            info: SourceInfo::from_path(path),
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_convention() {
        let info = SourceInfo::from_file_name("2024_Juan_Fernando_Quintero.csv");
        assert_eq!(info.year, "2024");
        assert_eq!(info.entity, "Juan Fernando Quintero");
    }

    #[test]
    fn test_unmatched_filename_parts_are_unknown() {
        let info = SourceInfo::from_file_name("quintero.csv");
        assert_eq!(info.year, UNKNOWN_PART);
        assert_eq!(info.entity, UNKNOWN_PART);

        let info = SourceInfo::from_file_name("2023_Vargas.txt");
        assert_eq!(info.year, "2023");
        assert_eq!(info.entity, UNKNOWN_PART);
    }

    #[test]
    fn test_from_path_uses_file_name_only() {
        let info = SourceInfo::from_path(Path::new("Porteros seleccionados/2022_Kevin_Mier.csv"));
        assert_eq!(info.entity, "Kevin Mier");
    }
}
