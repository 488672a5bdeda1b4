//! Categorical code cleanup: match results and starter flags

use regex::Regex;
use std::sync::LazyLock;

static RESULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([WLDTwldt])\s*(\d.*)$").expect("Invalid regex"));

/// `w 2-1`, `W2-1` and `W 2-1` all become `W 2-1`
pub fn normalize_result(raw: &str) -> String {
    let text = raw.trim();
    match RESULT_RE.captures(text) {
        Some(caps) => format!("{} {}", caps[1].to_uppercase(), caps[2].trim()),
        None => text.to_string(),
    }
}

/// Starter flag: `Y`, `Y*` (starter as captain) or `N`.
///
/// Empty input stays empty so files without the flag are not marked as
/// benched.
pub fn normalize_starter(raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        String::new()
    } else if text.to_uppercase().contains('Y') {
        if text.contains('*') { "Y*" } else { "Y" }.to_string()
    } else {
        "N".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_result() {
        assert_eq!(normalize_result("w 2-1"), "W 2-1");
        assert_eq!(normalize_result("L0-3"), "L 0-3");
        assert_eq!(normalize_result(" D 1–1 "), "D 1–1");
        assert_eq!(normalize_result("Postponed"), "Postponed");
        assert_eq!(normalize_result(""), "");
    }

    #[test]
    fn test_normalize_starter() {
        assert_eq!(normalize_starter("Y"), "Y");
        assert_eq!(normalize_starter("y*"), "Y*");
        assert_eq!(normalize_starter("N"), "N");
        assert_eq!(normalize_starter("No"), "N");
        assert_eq!(normalize_starter(""), "");
    }
}
