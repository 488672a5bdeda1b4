//! Row validation
//!
//! Scraped match logs contain spacer rows, repeated headers and summary
//! lines that carry an index but no match content.

use crate::data::schema::Schema;
use crate::data::table::Table;
use crate::Record;

/// Rows with at most this many non-empty cells carry only an identifier
const MIN_CONTENT_CELLS: usize = 3;

/// Placeholder values that count as an empty identity cell
fn is_placeholder(value: &str) -> bool {
    value.is_empty()
        || value == "N"
        || value == "."
        || value.chars().all(|c| c == ',')
        || value.eq_ignore_ascii_case("nan")
}

/// Keep a record unless both identity columns are empty or placeholders,
/// or it holds too few non-empty cells
pub fn is_valid_row(record: &Record, team_column: &str, opponent_column: Option<&str>) -> bool {
    let team_empty = is_placeholder(&record.text(team_column));
    let opponent_empty = opponent_column.map_or(true, |c| is_placeholder(&record.text(c)));
    if team_empty && opponent_empty {
        return false;
    }
    record.non_empty_count() > MIN_CONTENT_CELLS
}

/// Drop invalid rows from a table
pub fn filter_rows(mut table: Table, schema: &Schema) -> Table {
    let before = table.len();
    table.retain(|r| is_valid_row(r, schema.team_column, schema.opponent_column));
    let removed = before - table.len();
    if removed > 0 {
        log::info!("Removed {} rows without useful data", removed);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM: &str = "Equipo";
    const OPPONENT: Option<&str> = Some("Oponente");

    #[test]
    fn test_empty_identity_discards_row() {
        let record = Record::from_pairs([
            ("Equipo", ""),
            ("Oponente", ""),
            ("Goles", "1"),
            ("Minutos", "90"),
            ("Asistencias", "0"),
        ]);
        assert!(!is_valid_row(&record, TEAM, OPPONENT));
    }

    #[test]
    fn test_placeholders_count_as_empty_identity() {
        for placeholder in ["N", ".", ",,,,,,", ",", "nan", "NaN"] {
            let record = Record::from_pairs([
                ("Equipo", placeholder),
                ("Oponente", ""),
                ("Goles", "1"),
                ("Minutos", "90"),
                ("Asistencias", "0"),
                ("Tiros totales", "3"),
                ("Centros", "2"),
            ]);
            assert!(!is_valid_row(&record, TEAM, OPPONENT), "{}", placeholder);
        }
    }

    #[test]
    fn test_content_threshold() {
        let three = Record::from_pairs([
            ("Equipo", "Millonarios"),
            ("Oponente", "Santa Fe"),
            ("Goles", "1"),
            ("Minutos", ""),
        ]);
        assert!(!is_valid_row(&three, TEAM, OPPONENT));

        let four = Record::from_pairs([
            ("Equipo", "Millonarios"),
            ("Oponente", "Santa Fe"),
            ("Goles", "1"),
            ("Minutos", "90"),
        ]);
        assert!(is_valid_row(&four, TEAM, OPPONENT));
    }

    #[test]
    fn test_one_identity_column_is_enough() {
        let record = Record::from_pairs([
            ("Equipo", "N"),
            ("Oponente", "Junior"),
            ("Goles", "1"),
            ("Minutos", "90"),
        ]);
        assert!(is_valid_row(&record, TEAM, OPPONENT));
    }

    #[test]
    fn test_filter_rows_on_table() {
        let table = Table::from_records(vec![
            Record::from_pairs([
                ("Equipo", "Millonarios"),
                ("Oponente", "Santa Fe"),
                ("Goles", "1"),
                ("Minutos", "90"),
            ]),
            Record::from_pairs([("Equipo", ""), ("Oponente", ""), ("Goles", ""), ("Minutos", "")]),
        ]);
        let filtered = filter_rows(table, &crate::data::schema::PLAYER_MATCH);
        assert_eq!(filtered.len(), 1);
    }
}
