//! Input normalization and typo recovery.
//!
//! Pattern and assistant names are accepted in several spellings
//! ("red_team", "Red Team", "red-team"). Resolution is three-tier:
//! exact match → synonym lookup → error with suggestions.

use std::collections::HashMap;
use std::sync::LazyLock;

// ── Synonym maps ─────────────────────────────────────────────

/// Loose names for writing-assistant kinds.
pub static ASSIST_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("purpose", "mission"),
        ("mission_statement", "mission"),
        ("smart", "goals"),
        ("smart_goals", "goals"),
        ("obstacles", "challenges"),
        ("blockers", "challenges"),
        ("skills", "strengths"),
        ("deepen", "expand"),
        ("questions", "expand"),
        ("feedback", "improve"),
        ("edit", "improve"),
        ("review", "analyze_expand"),
        ("analyze", "analyze_expand"),
        ("links", "connect"),
        ("map", "connect"),
    ]
    .into_iter()
    .collect()
});

/// Normalize a user-typed key to `snake_case`.
///
/// Accepts title case, kebab case, and the `→` markers used when
/// patterns are listed under their category.
#[must_use]
pub fn normalize_key(input: &str) -> String {
    input
        .trim()
        .trim_start_matches('→')
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolve an input against a set of canonical names and a synonym map.
///
/// Returns the canonical name, or `Err` with up to three suggestions.
pub fn resolve_name<'a>(
    input: &str,
    valid: &[&'a str],
    synonyms: &HashMap<&str, &'a str>,
) -> Result<&'a str, Vec<String>> {
    let key = normalize_key(input);

    // Tier 1: exact match
    if let Some(&name) = valid.iter().find(|&&v| v == key) {
        return Ok(name);
    }

    // Tier 2: synonym lookup
    if let Some(&canonical) = synonyms.get(key.as_str()) {
        return Ok(canonical);
    }

    // Tier 3: suggestions
    let owned: Vec<String> = valid.iter().map(ToString::to_string).collect();
    Err(find_similar(&key, &owned, 3))
}

/// Turn a user-supplied document name into a safe `.md` file name.
///
/// Trims, replaces spaces with `-`, and appends `.md` when absent.
/// Returns `None` for empty names or names containing path separators.
#[must_use]
pub fn document_file_name(input: &str) -> Option<String> {
    let name = input.trim().replace(' ', "-");
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.starts_with('.') {
        return None;
    }
    if name.ends_with(".md") {
        Some(name)
    } else {
        Some(format!("{name}.md"))
    }
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Find existing names similar to the searched one.
///
/// Substring matches count as distance 1. Returns up to `max`
/// suggestions with edit distance ≤ 3, sorted by distance then
/// alphabetically.
#[must_use]
pub fn find_similar(searched: &str, existing: &[String], max: usize) -> Vec<String> {
    let searched = searched.to_lowercase();
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|name| {
            let lower = name.to_lowercase();
            let dist = if !searched.is_empty() && lower.contains(&searched) {
                1
            } else {
                levenshtein_distance(&searched, &lower)
            };
            (dist, name.as_str())
        })
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Red Team"), "red_team");
        assert_eq!(normalize_key("  → Find Blind Spots"), "find_blind_spots");
        assert_eq!(normalize_key("analyze-expand"), "analyze_expand");
        assert_eq!(normalize_key("summarize"), "summarize");
    }

    #[test]
    fn test_resolve_name_tiers() {
        let valid = ["mission", "goals", "improve"];
        assert_eq!(resolve_name("Goals", &valid, &ASSIST_SYNONYMS), Ok("goals"));
        assert_eq!(resolve_name("smart", &valid, &ASSIST_SYNONYMS), Ok("goals"));

        let err = resolve_name("misson", &valid, &ASSIST_SYNONYMS).unwrap_err();
        assert_eq!(err, vec!["mission".to_string()]);
    }

    #[test]
    fn test_document_file_name() {
        assert_eq!(document_file_name(" my telos "), Some("my-telos.md".to_string()));
        assert_eq!(document_file_name("journal.md"), Some("journal.md".to_string()));
        assert_eq!(document_file_name("   "), None);
        assert_eq!(document_file_name("../escape"), None);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_similar() {
        let names = vec![
            "red_team".to_string(),
            "therapist".to_string(),
            "contrarian".to_string(),
        ];
        assert_eq!(find_similar("red_tem", &names, 3), vec!["red_team".to_string()]);
        assert_eq!(find_similar("therap", &names, 3), vec!["therapist".to_string()]);
        assert!(find_similar("zzzzzzzz", &names, 3).is_empty());
    }
}
