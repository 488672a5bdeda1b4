//! Field mapping onto a canonical schema

use crate::data::schema::Schema;
use crate::data::table::Table;
use crate::Value;

/// Rename every old column whose canonical name is not already present.
///
/// Unknown columns pass through untouched.
pub fn rename_columns(mut table: Table, renames: &[(&str, &str)]) -> Table {
    for (old, canonical) in renames {
        if table.has_column(old) && !table.has_column(canonical) {
            table.rename_column(old, canonical);
        }
    }
    table
}

/// Add every canonical column the table lacks, filled with empty text
pub fn add_missing_columns<'a, I>(mut table: Table, canonical: I) -> Table
where
    I: IntoIterator<Item = &'a str>,
{
    for column in canonical {
        if !table.has_column(column) {
            table.ensure_column(column, Value::Text(String::new()));
        }
    }
    table
}

/// Rename then complete a table against a schema
pub fn map_fields(table: Table, schema: &Schema) -> Table {
    let table = rename_columns(table, &schema.renames());
    add_missing_columns(table, schema.column_names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::PLAYER_MATCH;
    use crate::Record;

    fn raw_table() -> Table {
        Table::from_records(vec![Record::from_pairs([
            ("Date", "2024-02-03"),
            ("Squad", "Millonarios"),
            ("Gls", "2"),
            ("Match Report", "link"),
        ])])
    }

    #[test]
    fn test_renames_and_adds_missing() {
        let mapped = map_fields(raw_table(), &PLAYER_MATCH);
        let row = &mapped.rows()[0];
        assert_eq!(row.text("Fecha"), "2024-02-03");
        assert_eq!(row.text("Equipo"), "Millonarios");
        assert_eq!(row.text("Goles"), "2");
        assert_eq!(row.text("Asistencias"), "");
        assert!(row.contains("Asistencias"));
        // Extra columns survive
        assert_eq!(row.text("Match Report"), "link");
        assert!(!mapped.has_column("Gls"));
    }

    #[test]
    fn test_existing_canonical_column_is_not_overwritten() {
        let table = Table::from_records(vec![Record::from_pairs([
            ("Goles", "1"),
            ("Gls", "5"),
        ])]);
        let mapped = rename_columns(table, &PLAYER_MATCH.renames());
        assert_eq!(mapped.rows()[0].text("Goles"), "1");
        assert_eq!(mapped.rows()[0].text("Gls"), "5");
    }

    #[test]
    fn test_stat_ids_map_to_labels() {
        let table = Table::from_records(vec![Record::from_pairs([
            ("date", "2024-02-03"),
            ("goals", "1"),
        ])]);
        let mapped = rename_columns(table, &PLAYER_MATCH.renames());
        assert_eq!(mapped.columns(), &["Fecha", "Goles"]);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let once = map_fields(raw_table(), &PLAYER_MATCH);
        let twice = map_fields(once.clone(), &PLAYER_MATCH);
        assert_eq!(once, twice);
    }
}
