use indexmap::IndexMap;
use log::debug;

use crate::Document;

/// Values shared by two or more keys, each mapped to the keys holding it.
///
/// Groups appear in order of the value's first occurrence; keys within a
/// group follow document order.
pub type DuplicateGroups = IndexMap<String, Vec<String>>;

/// Groups keys by exact (case-sensitive) value and keeps only the groups
/// with at least two keys.
pub fn find_duplicate_values(document: &Document) -> DuplicateGroups {
    let mut value_to_keys: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (key, value) in document.iter() {
        value_to_keys
            .entry(value)
            .or_default()
            .push(key.to_owned());
    }

    let duplicates: DuplicateGroups = value_to_keys
        .into_iter()
        .filter(|(_, keys)| keys.len() > 1)
        .map(|(value, keys)| (value.to_owned(), keys))
        .collect();
    debug!(
        "Found {} duplicated values among {} entries",
        duplicates.len(),
        document.len()
    );
    duplicates
}
