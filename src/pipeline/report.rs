//! Printable summaries of finished tables

use crate::data::schema::EntityKind;
use crate::data::table::Table;
use crate::normalize::attribution::{TEAM_COLUMN, UNKNOWN};
use crate::normalize::numeric::coerce_int;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Saved penalties are reported against penalties faced
const PENALTIES_SAVED: &str = "Penales atajados";
const PENALTIES_FACED: &str = "Penales recibidos";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTotal {
    pub entity: String,
    pub total: i64,
    /// Percentage of `total` over a related count, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTotal {
    pub stat: String,
    pub total: i64,
    pub per_entity: Vec<EntityTotal>,
}

/// Overview of a unified player or goalkeeper match table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub kind: EntityKind,
    pub total_rows: usize,
    pub entities: Vec<Count>,
    pub teams: Vec<String>,
    pub competitions: Vec<Count>,
    pub stats: Vec<StatTotal>,
}

/// Distinct non-empty values of a column with their row counts, first-seen order
fn count_values(table: &Table, column: &str) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for value in table.column_values(column) {
        if value.is_absent() {
            continue;
        }
        *counts.entry(value.to_string().trim().to_string()).or_insert(0) += 1;
    }
    counts
}

fn column_sum(table: &Table, column: &str, entity_column: &str, entity: Option<&str>) -> i64 {
    table
        .rows()
        .iter()
        .filter(|r| entity.map_or(true, |e| r.text(entity_column) == e))
        .map(|r| coerce_int(&r.text(column)))
        .sum()
}

impl SummaryReport {
    pub fn from_table(table: &Table, kind: EntityKind) -> Self {
        let schema = kind.schema();
        let entities: Vec<Count> = count_values(table, schema.entity_column)
            .into_iter()
            .map(|(name, rows)| Count { name, rows })
            .collect();
        let teams = count_values(table, schema.team_column).into_keys().collect();
        let competitions = count_values(table, schema.competition_column)
            .into_iter()
            .map(|(name, rows)| Count { name, rows })
            .collect();

        let stats = schema
            .key_stats
            .iter()
            .filter(|stat| table.has_column(stat))
            .map(|stat| {
                let per_entity = entities
                    .iter()
                    .map(|e| {
                        let total = column_sum(table, stat, schema.entity_column, Some(e.name.as_str()));
                        let rate = if *stat == PENALTIES_SAVED && table.has_column(PENALTIES_FACED) {
                            let faced =
                                column_sum(table, PENALTIES_FACED, schema.entity_column, Some(e.name.as_str()));
                            (faced > 0).then(|| total as f64 / faced as f64 * 100.0)
                        } else {
                            None
                        };
                        EntityTotal {
                            entity: e.name.clone(),
                            total,
                            rate,
                        }
                    })
                    .collect();
                StatTotal {
                    stat: stat.to_string(),
                    total: column_sum(table, stat, schema.entity_column, None),
                    per_entity,
                }
            })
            .collect();

        SummaryReport {
            kind,
            total_rows: table.len(),
            entities,
            teams,
            competitions,
            stats,
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary ({})", self.kind)?;
        writeln!(f, "───────────────────────────────")?;
        writeln!(f, "  Total rows: {}", self.total_rows)?;

        writeln!(f, "\nEntities ({}):", self.entities.len())?;
        for entity in &self.entities {
            writeln!(f, "  - {}: {} matches", entity.name, entity.rows)?;
        }

        writeln!(f, "\nTeams ({}):", self.teams.len())?;
        for team in &self.teams {
            writeln!(f, "  - {}", team)?;
        }

        writeln!(f, "\nCompetitions ({}):", self.competitions.len())?;
        for competition in &self.competitions {
            writeln!(f, "  - {}: {} matches", competition.name, competition.rows)?;
        }

        for stat in &self.stats {
            writeln!(f, "\n{}: {}", stat.stat, stat.total)?;
            for entity in &stat.per_entity {
                match entity.rate {
                    Some(rate) => writeln!(f, "  - {}: {} ({:.1}%)", entity.entity, entity.total, rate)?,
                    None => writeln!(f, "  - {}: {}", entity.entity, entity.total)?,
                }
            }
        }
        Ok(())
    }
}

/// Overview of a combined category table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedSummary {
    pub total_rows: usize,
    pub distinct_teams: usize,
    pub unknown_team_rows: usize,
    pub sample_teams: Vec<String>,
}

impl CombinedSummary {
    pub fn from_table(table: &Table) -> Self {
        let teams = count_values(table, TEAM_COLUMN);
        let unknown_team_rows = teams.get(UNKNOWN).copied().unwrap_or(0);
        CombinedSummary {
            total_rows: table.len(),
            distinct_teams: teams.len(),
            unknown_team_rows,
            sample_teams: teams.keys().take(5).cloned().collect(),
        }
    }

    /// Share of rows without an identified team, in percent
    pub fn unknown_share(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.unknown_team_rows as f64 / self.total_rows as f64 * 100.0
        }
    }
}

impl fmt::Display for CombinedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Combined table")?;
        writeln!(f, "───────────────────────────────")?;
        writeln!(f, "  Rows:          {}", self.total_rows)?;
        writeln!(f, "  Unique teams:  {}", self.distinct_teams)?;
        if self.unknown_team_rows > 0 {
            writeln!(
                f,
                "  Without team:  {} ({:.2}%)",
                self.unknown_team_rows,
                self.unknown_share()
            )?;
        }
        writeln!(f, "  Sample teams:  {}", self.sample_teams.join(", "))
    }
}
