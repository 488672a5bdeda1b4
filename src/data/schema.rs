//! Canonical schemas for the three dataset families
//!
//! Column names are the localized labels written to output headers. Each
//! match-log schema also knows how the source site spells its columns, both
//! as header acronyms (`Gls`) and as technical `data-stat` ids (`goals`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Identifier,
    Text,
    /// Short categorical code such as a result or position
    Code,
    Date,
    /// Boolean-like flag (starter Y/N)
    Flag,
    /// Fraction in [0, 1]
    Percentage,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

/// A fixed, ordered column list plus the roles of its key columns
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    /// Site acronym to localized label
    pub labels: &'static [(&'static str, &'static str)],
    /// Technical `data-stat` id to site acronym
    pub stat_ids: &'static [(&'static str, &'static str)],
    pub entity_column: &'static str,
    pub team_column: &'static str,
    pub opponent_column: Option<&'static str>,
    pub competition_column: &'static str,
    pub date_column: Option<&'static str>,
    pub season_column: Option<&'static str>,
    pub result_column: Option<&'static str>,
    pub starter_column: Option<&'static str>,
    pub position_column: Option<&'static str>,
    /// Value forced into the position column (goalkeepers)
    pub forced_position: Option<&'static str>,
    /// Columns written first, in this order
    pub priority_columns: &'static [&'static str],
    /// Statistics totalled per entity in the summary report
    pub key_stats: &'static [&'static str],
}

impl Schema {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.kind)
    }

    pub fn columns_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter(move |c| c.kind == kind)
            .map(|c| c.name)
    }

    /// Full old-name to canonical-name table: acronyms first, then
    /// `data-stat` ids resolved through their acronym
    pub fn renames(&self) -> Vec<(&'static str, &'static str)> {
        let mut renames: Vec<_> = self.labels.to_vec();
        for (id, acronym) in self.stat_ids {
            let label = self
                .labels
                .iter()
                .find(|(a, _)| a == acronym)
                .map(|(_, l)| *l)
                .unwrap_or(*acronym);
            if !renames.iter().any(|(old, _)| old == id) {
                renames.push((*id, label));
            }
        }
        renames
    }
}

use ColumnKind::*;

pub static PLAYER_MATCH: Schema = Schema {
    name: "player",
    columns: &[
        col("partido", Identifier),
        col("Fecha", Date),
        col("Día de la semana", Text),
        col("Competición", Text),
        col("Ronda o Fase", Text),
        col("Sede", Code),
        col("Resultado", Code),
        col("Equipo", Identifier),
        col("Oponente", Identifier),
        col("Titular", Flag),
        col("Posición", Code),
        col("Minutos", Count),
        col("Goles", Count),
        col("Asistencias", Count),
        col("Penales marcados", Count),
        col("Penales intentados", Count),
        col("Tiros totales", Count),
        col("Tiros a puerta", Count),
        col("Tarjetas amarillas", Count),
        col("Tarjetas rojas", Count),
        col("Faltas cometidas", Count),
        col("Faltas recibidas", Count),
        col("Fuera de juego", Count),
        col("Centros", Count),
        col("Entradas ganadas", Count),
        col("Intercepciones", Count),
        col("Goles en propia", Count),
        col("Penales ganados", Count),
        col("Penales concedidos", Count),
    ],
    labels: &[
        ("Date", "Fecha"),
        ("Day", "Día de la semana"),
        ("Comp", "Competición"),
        ("Round", "Ronda o Fase"),
        ("Venue", "Sede"),
        ("Result", "Resultado"),
        ("Squad", "Equipo"),
        ("Opponent", "Oponente"),
        ("Start", "Titular"),
        ("Pos", "Posición"),
        ("Min", "Minutos"),
        ("Gls", "Goles"),
        ("Ast", "Asistencias"),
        ("PK", "Penales marcados"),
        ("PKatt", "Penales intentados"),
        ("Sh", "Tiros totales"),
        ("SoT", "Tiros a puerta"),
        ("CrdY", "Tarjetas amarillas"),
        ("CrdR", "Tarjetas rojas"),
        ("Fls", "Faltas cometidas"),
        ("Fld", "Faltas recibidas"),
        ("Off", "Fuera de juego"),
        ("Crs", "Centros"),
        ("TklW", "Entradas ganadas"),
        ("Int", "Intercepciones"),
        ("OG", "Goles en propia"),
        ("PKwon", "Penales ganados"),
        ("PKcon", "Penales concedidos"),
    ],
    stat_ids: &[
        ("date", "Date"),
        ("dayofweek", "Day"),
        ("comp", "Comp"),
        ("round", "Round"),
        ("venue", "Venue"),
        ("result", "Result"),
        ("team", "Squad"),
        ("opponent", "Opponent"),
        ("game_started", "Start"),
        ("position", "Pos"),
        ("minutes", "Min"),
        ("goals", "Gls"),
        ("assists", "Ast"),
        ("pens_made", "PK"),
        ("pens_att", "PKatt"),
        ("shots", "Sh"),
        ("shots_on_target", "SoT"),
        ("cards_yellow", "CrdY"),
        ("cards_red", "CrdR"),
        ("fouls", "Fls"),
        ("fouled", "Fld"),
        ("offsides", "Off"),
        ("crosses", "Crs"),
        ("tackles_won", "TklW"),
        ("interceptions", "Int"),
        ("own_goals", "OG"),
        ("pens_won", "PKwon"),
        ("pens_conceded", "PKcon"),
    ],
    entity_column: "Jugador",
    team_column: "Equipo",
    opponent_column: Some("Oponente"),
    competition_column: "Competición",
    date_column: Some("Fecha"),
    season_column: Some("Temporada"),
    result_column: Some("Resultado"),
    starter_column: Some("Titular"),
    position_column: Some("Posición"),
    forced_position: None,
    priority_columns: &[
        "Jugador",
        "Temporada",
        "Fecha",
        "Competición",
        "Equipo",
        "Oponente",
        "Resultado",
        "Goles",
        "Asistencias",
    ],
    key_stats: &["Goles", "Asistencias"],
};

pub static GOALKEEPER_MATCH: Schema = Schema {
    name: "goalkeeper",
    columns: &[
        col("partido", Identifier),
        col("Fecha", Date),
        col("Día de la semana", Text),
        col("Competición", Text),
        col("Ronda o Fase", Text),
        col("Sede", Code),
        col("Resultado", Code),
        col("Equipo", Identifier),
        col("Oponente", Identifier),
        col("Titular", Flag),
        col("Posición", Code),
        col("Minutos", Count),
        col("Tiros a puerta recibidos", Count),
        col("Goles encajados", Count),
        col("Paradas", Count),
        col("Porcentaje de paradas", Percentage),
        col("Porterías a cero", Count),
        col("Penales recibidos", Count),
        col("Penales permitidos", Count),
        col("Penales atajados", Count),
        col("Penales fallados", Count),
    ],
    labels: &[
        ("Date", "Fecha"),
        ("Day", "Día de la semana"),
        ("Comp", "Competición"),
        ("Round", "Ronda o Fase"),
        ("Venue", "Sede"),
        ("Result", "Resultado"),
        ("Squad", "Equipo"),
        ("Opponent", "Oponente"),
        ("Start", "Titular"),
        ("Pos", "Posición"),
        ("Min", "Minutos"),
        ("SoTA", "Tiros a puerta recibidos"),
        ("GA", "Goles encajados"),
        ("Saves", "Paradas"),
        ("Save%", "Porcentaje de paradas"),
        ("CS", "Porterías a cero"),
        ("PKatt", "Penales recibidos"),
        ("PKA", "Penales permitidos"),
        ("PKsv", "Penales atajados"),
        ("PKm", "Penales fallados"),
    ],
    stat_ids: &[
        ("date", "Date"),
        ("dayofweek", "Day"),
        ("comp", "Comp"),
        ("round", "Round"),
        ("venue", "Venue"),
        ("result", "Result"),
        ("team", "Squad"),
        ("opponent", "Opponent"),
        ("game_started", "Start"),
        ("position", "Pos"),
        ("minutes", "Min"),
        ("gk_shots_on_target_against", "SoTA"),
        ("gk_goals_against", "GA"),
        ("gk_saves", "Saves"),
        ("gk_save_pct", "Save%"),
        ("gk_clean_sheets", "CS"),
        ("gk_pens_att", "PKatt"),
        ("gk_pens_allowed", "PKA"),
        ("gk_pens_saved", "PKsv"),
        ("gk_pens_missed", "PKm"),
    ],
    entity_column: "Portero",
    team_column: "Equipo",
    opponent_column: Some("Oponente"),
    competition_column: "Competición",
    date_column: Some("Fecha"),
    season_column: Some("Temporada"),
    result_column: Some("Resultado"),
    starter_column: Some("Titular"),
    position_column: Some("Posición"),
    forced_position: Some("GK"),
    priority_columns: &[
        "Portero",
        "Temporada",
        "Fecha",
        "Competición",
        "Equipo",
        "Oponente",
        "Resultado",
        "Tiros a puerta recibidos",
        "Goles encajados",
        "Paradas",
        "Porcentaje de paradas",
        "Porterías a cero",
        "Penales recibidos",
        "Penales permitidos",
        "Penales atajados",
        "Penales fallados",
    ],
    key_stats: &["Goles encajados", "Porterías a cero", "Penales atajados"],
};

/// Per-tournament player summaries (one row per player and edition)
pub static TOURNAMENT_SUMMARY: Schema = Schema {
    name: "tournament",
    columns: &[
        col("Team", Identifier),
        col("Name", Identifier),
        col("Torneo", Identifier),
        col("Position", Code),
    ],
    labels: &[],
    stat_ids: &[],
    entity_column: "Name",
    team_column: "Team",
    opponent_column: None,
    competition_column: "Torneo",
    date_column: None,
    season_column: None,
    result_column: None,
    starter_column: None,
    position_column: None,
    forced_position: None,
    priority_columns: &["Name", "Team", "Torneo"],
    key_stats: &[],
};

/// Which kind of entity a match-log file describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Goalkeeper,
}

impl EntityKind {
    pub fn schema(&self) -> &'static Schema {
        match self {
            EntityKind::Player => &PLAYER_MATCH,
            EntityKind::Goalkeeper => &GOALKEEPER_MATCH,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Player => write!(f, "player"),
            EntityKind::Goalkeeper => write!(f, "goalkeeper"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" | "jugador" => Ok(EntityKind::Player),
            "goalkeeper" | "gk" | "portero" => Ok(EntityKind::Goalkeeper),
            _ => Err(format!("Unknown kind: {}. Use player or goalkeeper.", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_targets_a_schema_column() {
        for schema in [&PLAYER_MATCH, &GOALKEEPER_MATCH] {
            for (_, label) in schema.labels {
                assert!(
                    schema.kind_of(label).is_some(),
                    "{} label {} not in schema",
                    schema.name,
                    label
                );
            }
        }
    }

    #[test]
    fn test_renames_resolve_stat_ids_to_labels() {
        let renames = GOALKEEPER_MATCH.renames();
        assert!(renames.contains(&("Save%", "Porcentaje de paradas")));
        assert!(renames.contains(&("gk_save_pct", "Porcentaje de paradas")));
        assert!(renames.contains(&("team", "Equipo")));
    }

    #[test]
    fn test_percentage_columns() {
        let pct: Vec<_> = GOALKEEPER_MATCH.columns_of_kind(ColumnKind::Percentage).collect();
        assert_eq!(pct, vec!["Porcentaje de paradas"]);
        assert_eq!(PLAYER_MATCH.columns_of_kind(ColumnKind::Percentage).count(), 0);
    }

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("Portero".parse::<EntityKind>(), Ok(EntityKind::Goalkeeper));
        assert_eq!("player".parse::<EntityKind>(), Ok(EntityKind::Player));
        assert!("coach".parse::<EntityKind>().is_err());
    }
}
