//! Football statistics normalization and unification
//!
//! Turns heterogeneous player and goalkeeper tables scraped from public
//! sports-data sites into schema-consistent, deduplicated CSV datasets.

pub mod data;
pub mod normalize;
pub mod pipeline;
pub mod unify;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Semantically empty (missing column, empty cell)
    #[default]
    Absent,
    Int(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// True for missing values, blank text and NaN
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Real(r) => r.is_nan(),
            Value::Int(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Real(r) if r.is_nan() => Ok(()),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

/// One row of a table: ordered column name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from (column, value) pairs, keeping their order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Record {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Trimmed text rendering of a column; empty when missing
    pub fn text(&self, column: &str) -> String {
        self.fields
            .get(column)
            .map(|v| v.to_string().trim().to_string())
            .unwrap_or_default()
    }

    /// Insert or overwrite a column; new columns go to the end
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.fields.shift_remove(column)
    }

    /// Rename a column in place, keeping its position.
    ///
    /// Returns false (and does nothing) if `from` is missing or `to` exists.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if self.fields.contains_key(to) {
            return false;
        }
        match self.fields.shift_remove_full(from) {
            Some((index, _, value)) => {
                self.fields.shift_insert(index, to.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of columns holding a non-absent value
    pub fn non_empty_count(&self) -> usize {
        self.fields.values().filter(|v| !v.is_absent()).count()
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FootballError {
    #[error("Missing input for {label}: {}", path.display())]
    MissingInput { label: String, path: PathBuf },

    #[error("Dataset '{dataset}' lacks key columns: {}", missing.join(", "))]
    SchemaMismatch {
        dataset: String,
        missing: Vec<String>,
    },

    #[error("No data left: {0}")]
    EmptyResult(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FootballError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub tournaments: TournamentConfig,
    pub combine: CombineConfig,
    pub lexicon: LexiconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Tournament labels, most recent first
    pub ranks: Vec<String>,
    pub key_columns: Vec<String>,
    pub drop_columns: Vec<String>,
    pub sort_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineConfig {
    /// Candidate key columns; those present in the base dataset form the key
    pub key_candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Substrings that identify a club name
    pub team_indicators: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                output_dir: "data".to_string(),
            },
            tournaments: TournamentConfig {
                ranks: ["Apertura 2025A", "Clausura 2024B", "Apertura 2024A"]
                    .map(String::from)
                    .to_vec(),
                key_columns: ["Team", "Name", "Torneo"].map(String::from).to_vec(),
                drop_columns: ["Position", "All_Positions", "Average Sofascore Rating"]
                    .map(String::from)
                    .to_vec(),
                sort_column: "Name".to_string(),
            },
            combine: CombineConfig {
                key_candidates: ["Name", "Team", "Position"].map(String::from).to_vec(),
            },
            lexicon: LexiconConfig {
                team_indicators: normalize::attribution::DEFAULT_TEAM_INDICATORS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FootballError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FootballError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FootballError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
