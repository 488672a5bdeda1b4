//! Row and column ordering for output tables

use crate::data::table::Table;
use crate::TournamentConfig;
use std::collections::HashMap;

/// Explicit sort rank per tournament label; lower ranks sort first
#[derive(Debug, Clone, Default)]
pub struct TournamentRanks {
    ranks: HashMap<String, usize>,
}

impl TournamentRanks {
    /// Rank labels by their position in `labels` (most recent first)
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TournamentRanks {
            ranks: labels
                .into_iter()
                .enumerate()
                .map(|(i, l)| (l.into(), i))
                .collect(),
        }
    }

    pub fn from_config(config: &TournamentConfig) -> Self {
        Self::new(config.ranks.iter().cloned())
    }

    /// Rank of a label; unknown labels sort after every known one
    pub fn rank(&self, label: &str) -> usize {
        self.ranks.get(label.trim()).copied().unwrap_or(usize::MAX)
    }
}

/// Sort rows by `primary`, then by the rank of `ranked_column`.
///
/// The sort is stable, so rows equal on both keys keep their order.
pub fn sort_rows(table: &mut Table, primary: &str, ranked_column: &str, ranks: &TournamentRanks) {
    table.rows_mut().sort_by(|a, b| {
        a.text(primary)
            .cmp(&b.text(primary))
            .then_with(|| ranks.rank(&a.text(ranked_column)).cmp(&ranks.rank(&b.text(ranked_column))))
    });
}

/// Stable sort by a `YYYY-MM-DD` date column
pub fn sort_by_date(table: &mut Table, column: &str) {
    table.rows_mut().sort_by(|a, b| a.text(column).cmp(&b.text(column)));
}

/// Put `priority` columns first (those present), then the rest in their
/// current order
pub fn order_columns(table: &mut Table, priority: &[&str]) {
    let mut order: Vec<String> = priority
        .iter()
        .filter(|c| table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    for column in table.columns() {
        if !order.contains(column) {
            order.push(column.clone());
        }
    }
    table.set_column_order(order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn ranks() -> TournamentRanks {
        TournamentRanks::new(["Apertura 2025A", "Clausura 2024B", "Apertura 2024A"])
    }

    #[test]
    fn test_tournament_rank_beats_alphabetical() {
        let mut table = Table::from_records(
            ["Apertura 2024A", "Clausura 2024B", "Apertura 2025A"]
                .iter()
                .map(|t| Record::from_pairs([("Name", "Juan Pérez"), ("Torneo", *t)]))
                .collect(),
        );
        sort_rows(&mut table, "Name", "Torneo", &ranks());
        let order: Vec<String> = table.rows().iter().map(|r| r.text("Torneo")).collect();
        assert_eq!(order, vec!["Apertura 2025A", "Clausura 2024B", "Apertura 2024A"]);
    }

    #[test]
    fn test_name_first_then_rank_with_unknown_last() {
        let mut table = Table::from_records(vec![
            Record::from_pairs([("Name", "B"), ("Torneo", "Apertura 2025A")]),
            Record::from_pairs([("Name", "A"), ("Torneo", "Copa 2023")]),
            Record::from_pairs([("Name", "A"), ("Torneo", "Apertura 2024A")]),
        ]);
        sort_rows(&mut table, "Name", "Torneo", &ranks());
        let order: Vec<(String, String)> = table
            .rows()
            .iter()
            .map(|r| (r.text("Name"), r.text("Torneo")))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A".to_string(), "Apertura 2024A".to_string()),
                ("A".to_string(), "Copa 2023".to_string()),
                ("B".to_string(), "Apertura 2025A".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_columns() {
        let mut table = Table::from_records(vec![Record::from_pairs([
            ("Minutos", "90"),
            ("Fecha", "2024-01-01"),
            ("Jugador", "X"),
            ("Centros", "1"),
        ])]);
        order_columns(&mut table, &["Jugador", "Temporada", "Fecha"]);
        assert_eq!(table.columns(), &["Jugador", "Fecha", "Minutos", "Centros"]);
    }

    #[test]
    fn test_sort_by_date_is_stable() {
        let mut table = Table::from_records(vec![
            Record::from_pairs([("Fecha", "2024-03-01"), ("id", "1")]),
            Record::from_pairs([("Fecha", "2024-01-15"), ("id", "2")]),
            Record::from_pairs([("Fecha", "2024-03-01"), ("id", "3")]),
        ]);
        sort_by_date(&mut table, "Fecha");
        let ids: Vec<String> = table.rows().iter().map(|r| r.text("id")).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }
}
