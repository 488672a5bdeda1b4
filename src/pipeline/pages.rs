//! Turning saved statistics pages into tables

use crate::data::pages::{parse_match_log_file, parse_stats_file};
use crate::data::schema::EntityKind;
use crate::data::sources::{SourceBatch, SourceInfo};
use crate::data::table::Table;
use crate::normalize::{normalize_table, TeamLexicon};
use crate::Result;
use std::path::Path;

/// Statistics rows with team and player attributed
pub fn stats_page_table<P: AsRef<Path>>(path: P, lexicon: &TeamLexicon) -> Result<Table> {
    let rows = parse_stats_file(path)?;
    Ok(Table::from_records(
        rows.into_iter().map(|r| r.into_record(lexicon)).collect(),
    ))
}

/// Raw match-log rows from a saved page, with filename metadata.
///
/// The page is expected to follow the `YYYY_<EntityName>` naming of the CSV
/// exports, whatever its extension.
pub fn match_log_batch<P: AsRef<Path>>(path: P) -> Result<SourceBatch> {
    let path = path.as_ref();
    let records = parse_match_log_file(path)?;
    Ok(SourceBatch {
        path: path.to_path_buf(),
        info: SourceInfo::from_path(&path.with_extension("csv")),
        table: Table::from_records(records),
    })
}

/// Match-log page normalized onto the schema of `kind`
pub fn match_log_page_table<P: AsRef<Path>>(path: P, kind: EntityKind) -> Result<Table> {
    let batch = match_log_batch(path)?;
    Ok(normalize_table(batch.table, kind.schema(), &batch.info))
}
