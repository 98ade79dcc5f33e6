use indexmap::IndexMap;
use log::debug;

use crate::Document;

/// Entries whose value matched a query, in document order.
pub type SearchResult = IndexMap<String, String>;

/// Returns every entry whose value contains `query`, ignoring case.
///
/// Keys are never matched. An empty query matches every entry.
pub fn search_in_values(document: &Document, query: &str) -> SearchResult {
    let query = query.to_lowercase();
    let results: SearchResult = document
        .iter()
        .filter(|(_, value)| value.to_lowercase().contains(&query))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect();
    debug!(
        "Search for {:?} matched {} of {} entries",
        query,
        results.len(),
        document.len()
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        [("a", "Hello"), ("b", "world"), ("c", "hello there")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let results = search_in_values(&sample(), "hello");
        assert_eq!(results.len(), 2);
        assert_eq!(results.get("a").map(String::as_str), Some("Hello"));
        assert_eq!(results.get("c").map(String::as_str), Some("hello there"));
    }

    #[test]
    fn test_uppercase_query() {
        let results = search_in_values(&sample(), "WORLD");
        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_keys_are_not_matched() {
        let doc: Document = [("hello", "bye")].into_iter().collect();
        assert!(search_in_values(&doc, "hello").is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let doc = sample();
        let results = search_in_values(&doc, "");
        assert_eq!(results.len(), doc.len());
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(search_in_values(&sample(), "absent").is_empty());
        assert!(search_in_values(&Document::new(), "x").is_empty());
    }

    #[test]
    fn test_result_is_sound_and_complete() {
        let doc: Document = [
            ("k1", "Rust"),
            ("k2", "rusty nail"),
            ("k3", "TRUST"),
            ("k4", "go"),
            ("k5", ""),
        ]
        .into_iter()
        .collect();
        let query = "rUs";
        let results = search_in_values(&doc, query);
        for (key, value) in doc.iter() {
            let expected = value.to_lowercase().contains(&query.to_lowercase());
            assert_eq!(results.contains_key(key), expected, "key {key}");
        }
    }
}
