//! Per-entity accumulation of normalized match-log files
//!
//! Each player or goalkeeper may have several season files. They are
//! normalized one by one and appended; a file that fails is logged and
//! skipped so the remaining files still make it into the output.

use crate::data::csv_io::write_table;
use crate::data::schema::{EntityKind, Schema};
use crate::data::sources::{SourceBatch, SourceInfo};
use crate::data::table::Table;
use crate::normalize::{filter_rows, normalize_table};
use crate::unify::ordering::{order_columns, sort_by_date};
use crate::{FootballError, Result, Value};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Column holding the sequential match number
const MATCH_NUMBER_COLUMN: &str = "partido";

/// Running normalized rows for one entity
#[derive(Debug)]
pub struct EntityAccumulator {
    kind: EntityKind,
    entity: String,
    tables: Vec<Table>,
    failed: Vec<PathBuf>,
}

impl EntityAccumulator {
    pub fn new(kind: EntityKind, entity: impl Into<String>) -> Self {
        EntityAccumulator {
            kind,
            entity: entity.into(),
            tables: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Number of sources appended so far
    pub fn processed(&self) -> usize {
        self.tables.len()
    }

    /// Sources that could not be read
    pub fn failed(&self) -> &[PathBuf] {
        &self.failed
    }

    /// Normalize an already loaded source and append it
    pub fn append_batch(&mut self, batch: SourceBatch) {
        let schema = self.kind.schema();
        let name = batch.path.display().to_string();
        let table = normalize_table(batch.table, schema, &batch.info);
        log::info!("Processed {}: {} rows", name, table.len());
        self.tables.push(table);
    }

    /// Read, normalize and append one CSV file.
    ///
    /// Returns false if the file could not be read; the failure is logged
    /// and the accumulator stays usable.
    pub fn append_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        match SourceBatch::from_file(path) {
            Ok(batch) => {
                self.append_batch(batch);
                true
            }
            Err(e) => {
                log::error!("Failed to process {}: {}", path.display(), e);
                self.failed.push(path.to_path_buf());
                false
            }
        }
    }

    /// Concatenate everything appended, stamp the entity name, drop empty
    /// rows, sort by date and renumber matches
    pub fn finish(self) -> Result<Table> {
        if self.tables.is_empty() {
            return Err(FootballError::EmptyResult(format!(
                "no file could be processed for {}",
                self.entity
            )));
        }

        let schema = self.kind.schema();
        let sources = self.tables.len();
        let mut table = Table::concat(self.tables);
        table.set_all(schema.entity_column, Value::from(self.entity.as_str()));

        let mut table = filter_rows(table, schema);
        if table.is_empty() {
            return Err(FootballError::EmptyResult(format!(
                "no valid rows remain for {}",
                self.entity
            )));
        }
        if let Some(date_column) = schema.date_column {
            sort_by_date(&mut table, date_column);
        }
        if table.has_column(MATCH_NUMBER_COLUMN) {
            for (i, row) in table.rows_mut().iter_mut().enumerate() {
                row.set(MATCH_NUMBER_COLUMN, (i + 1) as i64);
            }
        }

        log::info!("Unified {} files for {}", sources, self.entity);
        Ok(table)
    }
}

/// Group files by the entity named in their filename, keeping first-seen order
pub fn group_by_entity(paths: &[PathBuf]) -> IndexMap<String, Vec<PathBuf>> {
    let mut groups: IndexMap<String, Vec<PathBuf>> = IndexMap::new();
    for path in paths {
        let info = SourceInfo::from_path(path);
        groups.entry(info.entity).or_default().push(path.clone());
    }
    groups
}

/// Merge finished entity tables into the batch output layout
pub fn assemble_batch(tables: Vec<Table>, schema: &Schema) -> Result<Table> {
    if tables.is_empty() {
        return Err(FootballError::EmptyResult(
            "no entity could be unified".to_string(),
        ));
    }
    let table = Table::concat(tables);
    let mut table = filter_rows(table, schema);
    if table.is_empty() {
        return Err(FootballError::EmptyResult(
            "no valid rows remain after filtering".to_string(),
        ));
    }
    order_columns(&mut table, schema.priority_columns);
    Ok(table)
}

/// Process every entity's files and write one combined output table.
///
/// Entities whose files all fail are skipped; the run only fails when no
/// entity produced rows.
pub fn process_entities_and_save<P: AsRef<Path>>(
    kind: EntityKind,
    groups: &IndexMap<String, Vec<PathBuf>>,
    output: P,
) -> Result<Table> {
    let mut finished = Vec::new();
    for (entity, paths) in groups {
        log::info!("=== Processing files for {} ===", entity);
        let mut accumulator = EntityAccumulator::new(kind, entity.as_str());
        for path in paths {
            accumulator.append_file(path);
        }
        match accumulator.finish() {
            Ok(table) => finished.push(table),
            Err(e) => log::error!("{}", e),
        }
    }

    let schema = kind.schema();
    let table = assemble_batch(finished, schema)?;
    write_table(&table, output, schema.labels)?;
    Ok(table)
}
