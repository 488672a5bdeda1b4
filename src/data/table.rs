//! In-memory tables of loosely schematized records

use crate::{Record, Value};

/// An ordered set of columns plus the rows that use them.
///
/// Rows may lack some of the table's columns; a missing cell reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table whose columns are the union of the rows' columns,
    /// in order of first appearance
    pub fn from_records(rows: Vec<Record>) -> Self {
        let mut table = Table::new();
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Stack several tables; columns are unioned in order of first appearance
    pub fn concat(tables: Vec<Table>) -> Self {
        let mut result = Table::new();
        for table in tables {
            for column in table.columns {
                result.register_column(&column);
            }
            result.rows.extend(table.rows);
        }
        result
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Record> {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append a row, registering any columns it introduces
    pub fn push(&mut self, row: Record) {
        for column in row.columns() {
            if !self.has_column(column) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    fn register_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// Make sure `column` exists, filling rows that lack it with `default`
    pub fn ensure_column(&mut self, column: &str, default: Value) {
        self.register_column(column);
        for row in &mut self.rows {
            if !row.contains(column) {
                row.set(column, default.clone());
            }
        }
    }

    /// Overwrite `column` in every row
    pub fn set_all(&mut self, column: &str, value: Value) {
        self.register_column(column);
        for row in &mut self.rows {
            row.set(column, value.clone());
        }
    }

    pub fn drop_column(&mut self, column: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c != column);
        for row in &mut self.rows {
            row.remove(column);
        }
        self.columns.len() != before
    }

    /// Rename a table column unless the target name already exists
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if self.has_column(to) || !self.has_column(from) {
            return false;
        }
        for column in &mut self.columns {
            if column == from {
                *column = to.to_string();
            }
        }
        for row in &mut self.rows {
            row.rename(from, to);
        }
        true
    }

    /// Replace the column order; listed names not in the table are ignored
    /// and unlisted table columns are dropped
    pub fn set_column_order(&mut self, order: Vec<String>) {
        self.columns = order
            .into_iter()
            .filter(|c| self.columns.contains(c))
            .collect();
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Values of one column, absent where a row lacks it
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        static ABSENT: Value = Value::Absent;
        self.rows.iter().map(move |r| r.get(column).unwrap_or(&ABSENT))
    }

    /// Cell text in table column order, empty for missing cells
    pub fn row_cells(&self, row: &Record) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_first_appearance() {
        let table = Table::from_records(vec![
            Record::from_pairs([("Name", "A"), ("Goals", "1")]),
            Record::from_pairs([("Name", "B"), ("Assists", "2")]),
        ]);
        assert_eq!(table.columns(), &["Name", "Goals", "Assists"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ensure_column_fills_missing_only() {
        let mut table = Table::from_records(vec![
            Record::from_pairs([("Name", "A"), ("Goals", "1")]),
            Record::from_pairs([("Name", "B")]),
        ]);
        table.ensure_column("Goals", Value::from(""));
        assert_eq!(table.rows()[0].text("Goals"), "1");
        assert!(table.rows()[1].get("Goals").is_some());
    }

    #[test]
    fn test_concat_unions_columns() {
        let a = Table::from_records(vec![Record::from_pairs([("x", "1")])]);
        let b = Table::from_records(vec![Record::from_pairs([("y", "2")])]);
        let joined = Table::concat(vec![a, b]);
        assert_eq!(joined.columns(), &["x", "y"]);
        assert_eq!(joined.row_cells(&joined.rows()[1]), vec!["", "2"]);
    }
}
