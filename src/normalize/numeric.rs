//! Numeric coercion for count and percentage columns
//!
//! Invalid or missing values collapse to zero; nothing here fails.

use crate::data::schema::{ColumnKind, Schema};
use crate::data::table::Table;
use crate::Value;

/// Parse a count, truncating fractions; zero on failure
pub fn coerce_int(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i64,
        _ => 0,
    }
}

/// Parse a percentage as a fraction.
///
/// A trailing `%` is stripped. Magnitudes above 1 are taken as whole
/// percentages and divided by 100, so `55%`, `55` and `0.55` agree.
pub fn coerce_pct(raw: &str) -> f64 {
    let text = raw.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim();
    let value = match text.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    };
    if value.abs() > 1.0 {
        value / 100.0
    } else {
        value
    }
}

fn int_value(value: &Value) -> i64 {
    match value {
        Value::Int(i) => *i,
        Value::Real(r) if r.is_finite() => r.trunc() as i64,
        Value::Text(s) => coerce_int(s),
        _ => 0,
    }
}

fn pct_value(value: &Value) -> f64 {
    match value {
        Value::Int(i) => coerce_pct(&i.to_string()),
        Value::Real(r) => coerce_pct(&r.to_string()),
        Value::Text(s) => coerce_pct(s),
        Value::Absent => 0.0,
    }
}

/// Convert every count and percentage column of `schema` present in the table
pub fn coerce_columns(mut table: Table, schema: &Schema) -> Table {
    let counts: Vec<&str> = schema.columns_of_kind(ColumnKind::Count).collect();
    let percentages: Vec<&str> = schema.columns_of_kind(ColumnKind::Percentage).collect();

    for column in counts.iter().chain(percentages.iter()) {
        table.ensure_column(column, Value::Absent);
    }
    for row in table.rows_mut() {
        for column in &counts {
            let value = int_value(row.get(column).unwrap_or(&Value::Absent));
            row.set(*column, value);
        }
        for column in &percentages {
            let value = pct_value(row.get(column).unwrap_or(&Value::Absent));
            row.set(*column, value);
        }
    }
    table
}
