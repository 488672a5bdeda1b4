//! Raw row extraction from saved statistics pages
//!
//! Works on HTML already on disk; fetching and page navigation live elsewhere.
//! Two layouts are understood: league statistics tables, where team and player
//! names only appear as cell `title` attributes, and match logs, where every
//! cell carries a technical `data-stat` id.

use crate::normalize::attribution::{self, TeamLexicon};
use crate::{FootballError, Record, Result, Value};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

/// Column holding the row's rank/position number in statistics tables
pub const POSITION_COLUMN: &str = "Position";

/// Cell index of the first statistic in a statistics table row
const FIRST_STAT_CELL: usize = 3;

/// One statistics table row before team/player attribution
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatsRow {
    pub position: String,
    /// Caption-like `title` attributes found on the row's cells
    pub titles: Vec<String>,
    /// (header, cell text) pairs for the statistic columns
    pub stats: Vec<(String, String)>,
}

impl RawStatsRow {
    /// Resolve team and player name, producing a flat record
    pub fn into_record(self, lexicon: &TeamLexicon) -> Record {
        let resolved = attribution::resolve(&self.titles, lexicon);
        if resolved.confidence == attribution::Confidence::Low {
            log::debug!(
                "Weak attribution for row {}: team={} name={}",
                self.position,
                resolved.team,
                resolved.name
            );
        }

        let mut record = Record::new();
        record.set(POSITION_COLUMN, self.position);
        record.set(attribution::TEAM_COLUMN, resolved.team);
        record.set(attribution::NAME_COLUMN, resolved.name);
        for (header, value) in self.stats {
            let value = if value.is_empty() {
                Value::Absent
            } else {
                Value::Text(value)
            };
            record.set(header, value);
        }
        record
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FootballError::Parse(format!("Invalid selector {}: {:?}", css, e)))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Direct `td`/`th` children of a row
fn row_cells<'a>(row: &ElementRef<'a>, names: &[&str]) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| names.contains(&e.value().name()))
        .collect()
}

/// Parse the first table of a league statistics page
pub fn parse_stats_table(html: &str) -> Result<Vec<RawStatsRow>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let th_sel = selector("th")?;
    let row_sel = selector("tbody > tr")?;

    let Some(table) = document.select(&table_sel).next() else {
        log::warn!("No statistics table found");
        return Ok(vec![]);
    };

    let headers: Vec<String> = table
        .select(&th_sel)
        .map(|th| cell_text(&th))
        .filter(|h| !h.is_empty() && h != "#")
        .collect();
    let stat_headers: Vec<&String> = headers
        .iter()
        .filter(|h| *h != attribution::TEAM_COLUMN && *h != attribution::NAME_COLUMN)
        .collect();

    let mut rows = Vec::new();
    for row in table.select(&row_sel) {
        let cells = row_cells(&row, &["td"]);
        if cells.len() <= 1 {
            continue;
        }

        let titles = cells
            .iter()
            .filter_map(|c| c.value().attr("title"))
            .map(|t| t.trim().to_string())
            .filter(|t| t.chars().count() > 2)
            .collect();

        let stats = stat_headers
            .iter()
            .enumerate()
            .filter_map(|(i, header)| {
                cells
                    .get(FIRST_STAT_CELL + i)
                    .map(|cell| (header.to_string(), cell_text(cell)))
            })
            .collect();

        rows.push(RawStatsRow {
            position: cell_text(&cells[0]),
            titles,
            stats,
        });
    }

    log::info!("Extracted {} rows from statistics table", rows.len());
    Ok(rows)
}

/// Parse a match-log table into records keyed by `data-stat` id.
///
/// Rows without a date are spacer or repeated-header rows and are skipped.
pub fn parse_match_log(html: &str) -> Result<Vec<Record>> {
    let document = Html::parse_document(html);
    let row_sel = selector("table tbody > tr")?;

    let mut records = Vec::new();
    for row in document.select(&row_sel) {
        let mut record = Record::new();
        for cell in row_cells(&row, &["th", "td"]) {
            let Some(stat) = cell.value().attr("data-stat") else {
                continue;
            };
            if stat == "match_report" {
                continue;
            }
            let text = cell_text(&cell);
            let value = if text.is_empty() {
                Value::Absent
            } else {
                Value::Text(text)
            };
            record.set(stat, value);
        }

        if record.get("date").map_or(true, Value::is_absent) {
            continue;
        }
        records.push(record);
    }

    log::info!("Extracted {} match rows", records.len());
    Ok(records)
}

/// Parse a saved statistics page from disk
pub fn parse_stats_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawStatsRow>> {
    let html = std::fs::read_to_string(path.as_ref())?;
    parse_stats_table(&html)
}

/// Parse a saved match-log page from disk
pub fn parse_match_log_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let html = std::fs::read_to_string(path.as_ref())?;
    parse_match_log(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_PAGE: &str = r#"
        <table>
          <thead><tr><th>#</th><th>Team</th><th>Name</th><th>Goals</th><th>Assists</th></tr></thead>
          <tbody>
            <tr>
              <td>1</td>
              <td title="Atlético Nacional"><img></td>
              <td title="Alfredo Morelos">Alfredo Morelos</td>
              <td>9</td>
              <td>3</td>
            </tr>
            <tr><td>spacer</td></tr>
          </tbody>
        </table>"#;

    const MATCH_LOG: &str = r#"
        <table><tbody>
          <tr>
            <th data-stat="date">2024-02-03</th>
            <td data-stat="team">Millonarios</td>
            <td data-stat="opponent">Santa Fe</td>
            <td data-stat="goals">1</td>
            <td data-stat="match_report">Match Report</td>
          </tr>
          <tr class="thead"><th data-stat="date"></th><td data-stat="team"></td></tr>
        </tbody></table>"#;

    #[test]
    fn test_stats_table_rows() {
        let rows = parse_stats_table(STATS_PAGE).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.position, "1");
        assert_eq!(row.titles, vec!["Atlético Nacional", "Alfredo Morelos"]);
        assert_eq!(
            row.stats,
            vec![
                ("Goals".to_string(), "9".to_string()),
                ("Assists".to_string(), "3".to_string())
            ]
        );
    }

    #[test]
    fn test_stats_row_attribution() {
        let rows = parse_stats_table(STATS_PAGE).unwrap();
        let record = rows[0].clone().into_record(&TeamLexicon::default());
        assert_eq!(record.text("Team"), "Atlético Nacional");
        assert_eq!(record.text("Name"), "Alfredo Morelos");
        assert_eq!(record.text("Goals"), "9");
    }

    #[test]
    fn test_match_log_skips_spacer_rows() {
        let records = parse_match_log(MATCH_LOG).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("team"), "Millonarios");
        assert!(!records[0].contains("match_report"));
    }
}
