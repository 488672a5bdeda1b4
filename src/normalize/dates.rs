//! Date normalization to `YYYY-MM-DD`
//!
//! Sources mix full dates in several layouts, bare day/month pairs and
//! English month names. Anything that cannot be recovered is returned as-is.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Full-date layouts, tried in order
const DATE_FORMATS: [&str; 5] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d"];

const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

static CANONICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-/]").expect("Invalid regex"));
static MONTH_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)\.?\s+(\d{1,2}),?\s*(\d{4})?$").expect("Invalid regex")
});

/// Normalize a raw date string, completing partial dates with `fallback_year`.
///
/// Never fails: unrecognized input comes back unchanged and empty input
/// yields an empty string.
pub fn normalize_date(raw: &str, fallback_year: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }
    if CANONICAL_RE.is_match(text) {
        return text.to_string();
    }

    let parts: Vec<&str> = SEPARATOR_RE.split(text).collect();

    if parts.iter().any(|p| p.len() == 4 && is_digits(p)) {
        if let Some(date) = parse_full(text) {
            return date;
        }
    }

    if parts.len() == 2 {
        if let Some(date) = parse_day_month(parts[0], parts[1], fallback_year) {
            return date;
        }
    }

    if let Some(date) = parse_month_name(text, fallback_year) {
        return date;
    }

    log::debug!("Unrecognized date '{}', keeping original", text);
    text.to_string()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_full(text: &str) -> Option<String> {
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .map(|d| d.format(CANONICAL_FORMAT).to_string())
    })
}

fn build_date(year: &str, month: u32, day: u32) -> Option<String> {
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format(CANONICAL_FORMAT).to_string())
}

/// Two numeric parts: month/day when it fits, otherwise day/month
fn parse_day_month(first: &str, second: &str, year: &str) -> Option<String> {
    if !is_digits(first) || !is_digits(second) {
        return None;
    }
    let a: u32 = first.parse().ok()?;
    let b: u32 = second.parse().ok()?;
    if a <= 12 && b <= 31 {
        build_date(year, a, b)
    } else {
        build_date(year, b, a)
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .find(|(abbr, _)| *abbr == prefix)
        .map(|(_, number)| *number)
}

/// `Apr 14, 2024` or `April 14`
fn parse_month_name(text: &str, fallback_year: &str) -> Option<String> {
    let caps = MONTH_NAME_RE.captures(text)?;
    let month = month_number(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let year = caps.get(3).map_or(fallback_year, |m| m.as_str());
    build_date(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_dates_are_unchanged() {
        for date in ["2024-02-03", "1999-12-31", "2023-01-01"] {
            assert_eq!(normalize_date(date, "1980"), date);
        }
    }

    #[test]
    fn test_format_equivalence() {
        assert_eq!(normalize_date("25/12/2023", "2023"), "2023-12-25");
        assert_eq!(normalize_date("2023-12-25", "2023"), "2023-12-25");
        assert_eq!(normalize_date("25-12-2023", "2020"), "2023-12-25");
        assert_eq!(normalize_date("2023/12/25", "2020"), "2023-12-25");
    }

    #[test]
    fn test_ambiguous_full_date_prefers_day_first() {
        assert_eq!(normalize_date("04/05/2024", "2024"), "2024-05-04");
        // Only month-first can parse
        assert_eq!(normalize_date("12/25/2023", "2023"), "2023-12-25");
    }

    #[test]
    fn test_partial_dates_use_fallback_year() {
        assert_eq!(normalize_date("04/12", "2023"), "2023-04-12");
        assert_eq!(normalize_date("25/12", "2023"), "2023-12-25");
        assert_eq!(normalize_date("3-7", "2022"), "2022-03-07");
    }

    #[test]
    fn test_partial_date_without_usable_year_is_kept() {
        assert_eq!(normalize_date("04/12", "Desconocido"), "04/12");
        // Month-first reading gives an impossible date
        assert_eq!(normalize_date("02/31", "2023"), "02/31");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(normalize_date("Apr 14, 2024", "2020"), "2024-04-14");
        assert_eq!(normalize_date("September 3", "2021"), "2021-09-03");
        assert_eq!(normalize_date("dec. 1 2022", "2020"), "2022-12-01");
    }

    #[test]
    fn test_unrecognized_and_empty() {
        assert_eq!(normalize_date("Matchday 4", "2024"), "Matchday 4");
        assert_eq!(normalize_date("Foo 14, 2024", "2024"), "Foo 14, 2024");
        assert_eq!(normalize_date("1/2/23", "2024"), "1/2/23");
        assert_eq!(normalize_date("", "2024"), "");
        assert_eq!(normalize_date("   ", "2024"), "");
    }
}
