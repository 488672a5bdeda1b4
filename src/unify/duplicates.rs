//! Duplicate unification: first non-absent value wins

use crate::data::table::Table;
use crate::{Record, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// A later non-absent value that lost to an earlier one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub key: Vec<String>,
    pub column: String,
    pub kept: String,
    pub discarded: String,
}

/// Result of unification plus the values it had to discard
#[derive(Debug, Clone, Default)]
pub struct Unified {
    pub table: Table,
    pub conflicts: Vec<Conflict>,
}

/// Trimmed key tuple of a record; missing key cells read as empty
pub fn key_of(record: &Record, keys: &[String]) -> Vec<String> {
    keys.iter().map(|k| record.text(k)).collect()
}

/// Merge rows sharing the same key tuple into one.
///
/// For every non-key column the first non-absent value in row order is
/// kept. Groups appear in order of their first row; key columns lead the
/// output column order.
pub fn unify_duplicates(table: &Table, keys: &[String]) -> Unified {
    let mut groups: IndexMap<Vec<String>, Vec<&Record>> = IndexMap::new();
    for row in table.rows() {
        groups.entry(key_of(row, keys)).or_default().push(row);
    }

    let other_columns: Vec<&String> = table
        .columns()
        .iter()
        .filter(|c| !keys.contains(c))
        .collect();

    let mut result = Table::with_columns(keys.iter().chain(other_columns.iter().copied()).cloned());
    let mut conflicts = Vec::new();

    for (key, members) in groups {
        let mut record = Record::new();
        for (column, value) in keys.iter().zip(&key) {
            record.set(column.as_str(), value.as_str());
        }

        for column in &other_columns {
            let mut present = members
                .iter()
                .filter_map(|m| m.get(column))
                .filter(|v| !v.is_absent());

            let kept = present.next().cloned().unwrap_or(Value::Absent);
            for later in present {
                if later.to_string().trim() != kept.to_string().trim() {
                    conflicts.push(Conflict {
                        key: key.clone(),
                        column: column.to_string(),
                        kept: kept.to_string(),
                        discarded: later.to_string(),
                    });
                }
            }
            record.set(column.as_str(), kept);
        }
        result.push(record);
    }

    for conflict in &conflicts {
        log::debug!(
            "Conflict for {:?} in '{}': kept '{}', discarded '{}'",
            conflict.key,
            conflict.column,
            conflict.kept,
            conflict.discarded
        );
    }
    log::info!(
        "Unified {} rows into {} ({} conflicting values discarded)",
        table.len(),
        result.len(),
        conflicts.len()
    );

    Unified {
        table: result,
        conflicts,
    }
}

/// Keep the first row of every key tuple, dropping later ones whole
pub fn drop_duplicate_keys(table: &mut Table, keys: &[String]) {
    let mut seen = std::collections::HashSet::new();
    table.retain(|row| seen.insert(key_of(row, keys)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<String> {
        vec!["Team".to_string(), "Name".to_string(), "Torneo".to_string()]
    }

    fn row(goals: &str, assists: &str) -> Record {
        Record::from_pairs([
            ("Team", "ABC FC"),
            ("Name", "John Smith"),
            ("Torneo", "2024A"),
            ("Goals", goals),
            ("Assists", assists),
        ])
    }

    #[test]
    fn test_first_non_null_wins_regardless_of_order() {
        for rows in [vec![row("", "1"), row("2", "")], vec![row("2", ""), row("", "1")]] {
            let unified = unify_duplicates(&Table::from_records(rows), &keys());
            assert_eq!(unified.table.len(), 1);
            assert_eq!(unified.table.rows()[0].text("Goals"), "2");
            assert_eq!(unified.table.rows()[0].text("Assists"), "1");
            assert!(unified.conflicts.is_empty());
        }
    }

    #[test]
    fn test_earliest_value_wins_conflict() {
        let table = Table::from_records(vec![row("3", ""), row("5", "")]);
        let unified = unify_duplicates(&table, &keys());
        let record = &unified.table.rows()[0];
        assert_eq!(record.text("Goals"), "3");
        assert_eq!(record.get("Assists"), Some(&Value::Absent));
        assert_eq!(
            unified.conflicts,
            vec![Conflict {
                key: vec!["ABC FC".into(), "John Smith".into(), "2024A".into()],
                column: "Goals".into(),
                kept: "3".into(),
                discarded: "5".into(),
            }]
        );
    }

    #[test]
    fn test_distinct_keys_stay_separate() {
        let mut other = row("1", "1");
        other.set("Torneo", "2024B");
        let table = Table::from_records(vec![row("1", ""), other, row("", "4")]);
        let unified = unify_duplicates(&table, &keys());
        assert_eq!(unified.table.len(), 2);
        assert_eq!(unified.table.rows()[0].text("Torneo"), "2024A");
        assert_eq!(unified.table.rows()[0].text("Assists"), "4");
        assert_eq!(unified.table.columns()[..3], keys()[..]);
    }

    #[test]
    fn test_missing_key_groups_under_empty() {
        let table = Table::from_records(vec![
            Record::from_pairs([("Name", "A"), ("Goals", "1")]),
            Record::from_pairs([("Name", "A"), ("Goals", "2")]),
        ]);
        let unified = unify_duplicates(&table, &keys());
        assert_eq!(unified.table.len(), 1);
        assert_eq!(unified.table.rows()[0].text("Team"), "");
    }

    #[test]
    fn test_drop_duplicate_keys_keeps_first() {
        let mut table = Table::from_records(vec![row("1", ""), row("9", "9")]);
        drop_duplicate_keys(&mut table, &keys());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].text("Goals"), "1");
    }
}
