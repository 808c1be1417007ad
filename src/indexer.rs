//! Prefix keywords for incremental project search.
//!
//! A project is findable by any leading fragment of "code - client - name",
//! "client - name" or the bare name. The fragments are computed once when the
//! identifying fields change and stored with the project, so a search is a
//! plain set-membership test.

use std::collections::HashSet;

use crate::model::ProjectCode;

/// Every non-empty prefix of `text` after lowercasing, shortest first.
pub fn prefixes(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut current = String::with_capacity(lowered.len());
    lowered
        .chars()
        .map(|c| {
            current.push(c);
            current.clone()
        })
        .collect()
}

/// The deduplicated keyword set for a project. The empty string is always
/// included so that an empty query matches every project.
pub fn generate_keywords(code: ProjectCode, client: &str, name: &str) -> Vec<String> {
    let full = prefixes(&format!("{code} - {client} - {name}"));
    let client_first = prefixes(&format!("{client} - {name}"));
    let name_only = prefixes(name);

    let mut seen = HashSet::new();
    std::iter::once(String::new())
        .chain(full)
        .chain(client_first)
        .chain(name_only)
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}

/// Normalize a search box value the same way keywords were built.
pub fn normalize_query(query: &str) -> String {
    query.trim_start().to_lowercase()
}

/// True when `query` is one of the stored `keywords`.
pub fn matches_query(keywords: &[String], query: &str) -> bool {
    let needle = normalize_query(query);
    keywords.iter().any(|keyword| *keyword == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: u32) -> ProjectCode {
        ProjectCode::new(value).unwrap()
    }

    #[test]
    fn prefixes_walk_left_to_right() {
        assert_eq!(prefixes("abc"), vec!["a", "ab", "abc"]);
        assert!(prefixes("").is_empty());
    }

    #[test]
    fn prefixes_are_lowercased_per_character() {
        assert_eq!(prefixes("ÄbC"), vec!["ä", "äb", "äbc"]);
    }

    #[test]
    fn acme_audit_contains_expected_fragments() {
        let keywords = generate_keywords(code(123456), "Acme", "Audit");
        for expected in ["", "a", "ac", "aud", "audit", "1", "123456 - acme - audit", "acme - audit"] {
            assert!(keywords.contains(&expected.to_string()), "missing {expected:?}");
        }
        assert!(!keywords.contains(&"Audit".to_string()));
    }

    #[test]
    fn keywords_have_no_duplicates() {
        // "a", "aa", ... appear in the client-first and name-only walks alike.
        let keywords = generate_keywords(code(111111), "aaa", "aaa");
        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn every_first_character_of_name_is_included() {
        for (client, name) in [("Acme", "Zeta"), ("x", "y"), ("Big Co", "  padded")] {
            let keywords = generate_keywords(code(200000), client, name);
            assert!(keywords.contains(&String::new()));
            let first = name.chars().next().unwrap().to_lowercase().to_string();
            assert!(keywords.contains(&first), "{name:?}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(
            generate_keywords(code(654321), "Globex", "Migration"),
            generate_keywords(code(654321), "Globex", "Migration")
        );
    }

    #[test]
    fn query_matching_is_case_insensitive() {
        let keywords = generate_keywords(code(123456), "Acme", "Audit");
        assert!(matches_query(&keywords, "ACME - au"));
        assert!(matches_query(&keywords, "  1234"));
        assert!(matches_query(&keywords, ""));
        assert!(!matches_query(&keywords, "udit"));
    }
}
