//! Per-file normalization of raw tables into a canonical schema

pub mod attribution;
pub mod codes;
pub mod dates;
pub mod fields;
pub mod numeric;
pub mod rows;

pub use attribution::{resolve, Attribution, Confidence, TeamLexicon};
pub use dates::normalize_date;
pub use fields::map_fields;
pub use numeric::{coerce_int, coerce_pct};
pub use rows::{filter_rows, is_valid_row};

use crate::data::schema::Schema;
use crate::data::sources::SourceInfo;
use crate::data::table::Table;
use crate::Value;

/// Rewrite every non-empty cell of `column` through `f`
fn map_text_column<F>(table: &mut Table, column: &str, f: F)
where
    F: Fn(&str) -> String,
{
    for row in table.rows_mut() {
        let Some(value) = row.get(column) else {
            continue;
        };
        if value.is_absent() {
            continue;
        }
        let mapped = f(&value.to_string());
        row.set(column, mapped);
    }
}

/// Bring one raw match-log table onto `schema`.
///
/// Columns are renamed, empty rows dropped, dates normalized with the
/// filename year as fallback, entity and season columns added, missing
/// schema columns created, numbers coerced and categorical codes cleaned.
pub fn normalize_table(table: Table, schema: &Schema, info: &SourceInfo) -> Table {
    let table = fields::rename_columns(table, &schema.renames());
    let mut table = rows::filter_rows(table, schema);

    if let Some(date_column) = schema.date_column {
        if table.has_column(date_column) {
            map_text_column(&mut table, date_column, |d| normalize_date(d, &info.year));
        } else {
            table.set_all(date_column, Value::from(format!("{}-01-01", info.year)));
        }
    }

    if !table.has_column(schema.entity_column) {
        table.set_all(schema.entity_column, Value::from(info.entity.as_str()));
    }
    if let Some(season_column) = schema.season_column {
        if !table.has_column(season_column) {
            table.set_all(season_column, Value::from(info.year.as_str()));
        }
    }

    let table = fields::add_missing_columns(table, schema.column_names());
    let mut table = numeric::coerce_columns(table, schema);

    if let Some(result_column) = schema.result_column {
        map_text_column(&mut table, result_column, codes::normalize_result);
    }
    if let Some(starter_column) = schema.starter_column {
        map_text_column(&mut table, starter_column, codes::normalize_starter);
    }
    if let (Some(position_column), Some(position)) = (schema.position_column, schema.forced_position) {
        let mismatched = table
            .column_values(position_column)
            .filter(|v| !v.is_absent() && v.to_string().trim() != position)
            .count();
        if mismatched > 0 {
            log::warn!(
                "{} rows had a position other than {}; forcing {}",
                mismatched,
                position,
                position
            );
        }
        table.set_all(position_column, Value::from(position));
    }

    table
}
