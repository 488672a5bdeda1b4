//! Unifying per-tournament player summaries into one table

use crate::data::csv_io::{read_table, write_table};
use crate::data::schema::TOURNAMENT_SUMMARY;
use crate::data::table::Table;
use crate::unify::{order_columns, sort_rows, unify_duplicates, TournamentRanks, Unified};
use crate::{FootballError, Result, TournamentConfig, Value};
use std::path::{Path, PathBuf};

/// A tournament summary file and the label its rows are tagged with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentInput {
    pub label: String,
    pub path: PathBuf,
}

impl TournamentInput {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        TournamentInput {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Parses `LABEL=PATH`
impl std::str::FromStr for TournamentInput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((label, path)) if !label.trim().is_empty() && !path.trim().is_empty() => {
                Ok(TournamentInput::new(label.trim(), path.trim()))
            }
            _ => Err(format!("Expected LABEL=PATH, got: {}", s)),
        }
    }
}

/// Load, tag, unify, trim and sort the tournament files.
///
/// Every input is required: a missing file aborts before anything is read.
pub fn unify_tournaments(inputs: &[TournamentInput], config: &TournamentConfig) -> Result<Unified> {
    for input in inputs {
        if !input.path.is_file() {
            return Err(FootballError::MissingInput {
                label: format!("tournament {}", input.label),
                path: input.path.clone(),
            });
        }
    }

    let mut tables = Vec::with_capacity(inputs.len());
    for input in inputs {
        log::info!("Loading tournament {}...", input.label);
        let mut table = read_table(&input.path)?;
        log::info!("  Loaded {} rows", table.len());
        table.set_all(TOURNAMENT_SUMMARY.competition_column, Value::from(input.label.as_str()));
        tables.push(table);
    }

    let combined = Table::concat(tables);
    log::info!("Total combined rows: {}", combined.len());
    if combined.is_empty() {
        return Err(FootballError::EmptyResult(
            "tournament files contain no rows".to_string(),
        ));
    }

    let mut unified = unify_duplicates(&combined, &config.key_columns);

    for column in &config.drop_columns {
        if unified.table.drop_column(column) {
            log::info!("Dropped column '{}'", column);
        }
    }

    let ranks = TournamentRanks::from_config(config);
    sort_rows(
        &mut unified.table,
        &config.sort_column,
        TOURNAMENT_SUMMARY.competition_column,
        &ranks,
    );
    order_columns(&mut unified.table, TOURNAMENT_SUMMARY.priority_columns);

    Ok(unified)
}

/// Unify the tournament files and write the result to `output`
pub fn unify_tournaments_and_save<P: AsRef<Path>>(
    inputs: &[TournamentInput],
    config: &TournamentConfig,
    output: P,
) -> Result<Unified> {
    let unified = unify_tournaments(inputs, config)?;
    write_table(&unified.table, output, TOURNAMENT_SUMMARY.labels)?;
    Ok(unified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_argument() {
        let input: TournamentInput = "Apertura 2025A=data/a.csv".parse().unwrap();
        assert_eq!(input.label, "Apertura 2025A");
        assert_eq!(input.path, PathBuf::from("data/a.csv"));
        assert!("no-separator".parse::<TournamentInput>().is_err());
        assert!("=path.csv".parse::<TournamentInput>().is_err());
    }

    #[test]
    fn test_missing_tournament_file_aborts() {
        let config = crate::Config::default().tournaments;
        let inputs = vec![TournamentInput::new("Apertura 2024A", "/no/such/file.csv")];
        let err = unify_tournaments(&inputs, &config).unwrap_err();
        match err {
            FootballError::MissingInput { label, .. } => assert!(label.contains("Apertura 2024A")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
