//! Team vs player attribution for statistics rows
//!
//! League tables embed the club and the player only as free-text captions
//! with no reliable column binding. `resolve` decides which caption is which
//! using a lexicon of club-name fragments and token counts.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TEAM_COLUMN: &str = "Team";
pub const NAME_COLUMN: &str = "Name";

/// Sentinel for a role no candidate could fill
pub const UNKNOWN: &str = "Unknown";

/// Club-name fragments of the Colombian first division
pub const DEFAULT_TEAM_INDICATORS: [&str; 30] = [
    "FC",
    "Independiente",
    "Atlético",
    "Deportivo",
    "Junior",
    "Caldas",
    "Santa Fe",
    "Magdalena",
    "Medellín",
    "Cali",
    "Nacional",
    "Bucaramanga",
    "Chicó",
    "Tolima",
    "Millonarios",
    "Fortaleza",
    "Águilas",
    "Envigado",
    "Alianza",
    "Pasto",
    "Equidad",
    "Pereira",
    "Rionegro",
    "Llaneros",
    "Unión",
    "América",
    "Barranquilla",
    "Valledupar",
    "Doradas",
    "CEIF",
];

/// Known team-name substrings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLexicon {
    indicators: Vec<String>,
}

impl Default for TeamLexicon {
    fn default() -> Self {
        Self::new(DEFAULT_TEAM_INDICATORS.iter().map(|s| s.to_string()).collect())
    }
}

impl TeamLexicon {
    pub fn new(indicators: Vec<String>) -> Self {
        TeamLexicon { indicators }
    }

    /// True if the text contains any known club fragment
    pub fn matches(&self, text: &str) -> bool {
        self.indicators.iter().any(|i| text.contains(i.as_str()))
    }
}

/// How much the resolution relied on weak evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,   // Lexicon identified the team, player found by shape
    Medium, // Token-count fallback was needed
    Low,    // Single candidate, none, or a corrected assignment
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Outcome of attribution; unresolved roles hold [`UNKNOWN`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub team: String,
    pub name: String,
    pub confidence: Confidence,
}

fn token_count(s: &str) -> usize {
    s.split_whitespace().count()
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Decide which candidate is the team and which the player name
pub fn resolve(candidates: &[String], lexicon: &TeamLexicon) -> Attribution {
    let mut team: Option<usize> = None;
    let mut name: Option<usize> = None;
    let mut confidence = Confidence::High;

    if candidates.len() >= 2 {
        for (i, candidate) in candidates.iter().enumerate() {
            if lexicon.matches(candidate) {
                team = Some(i);
            } else if has_whitespace(candidate) && name.is_none() {
                name = Some(i);
            }
        }

        if team.is_none() || name.is_none() {
            confidence = Confidence::Medium;
            // Stable sort keeps candidate order among equal token counts
            let mut remaining: Vec<usize> = (0..candidates.len())
                .filter(|i| Some(*i) != team && Some(*i) != name)
                .collect();
            remaining.sort_by_key(|&i| token_count(&candidates[i]));

            if team.is_none() && !remaining.is_empty() {
                team = Some(remaining.remove(0));
            }
            if name.is_none() {
                name = remaining.pop();
            }
        }
    } else if let Some(only) = candidates.first() {
        confidence = Confidence::Low;
        if has_whitespace(only) {
            name = Some(0);
        } else {
            team = Some(0);
        }
    } else {
        confidence = Confidence::Low;
    }

    let mut team = team
        .map(|i| candidates[i].clone())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let mut name = name
        .map(|i| candidates[i].clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    if team == name && has_whitespace(&team) {
        name = std::mem::replace(&mut team, UNKNOWN.to_string());
        confidence = Confidence::Low;
    }

    if team != UNKNOWN && name != UNKNOWN && lexicon.matches(&name) && token_count(&team) > 1 {
        std::mem::swap(&mut team, &mut name);
        confidence = Confidence::Low;
    }

    Attribution {
        team,
        name,
        confidence,
    }
}
