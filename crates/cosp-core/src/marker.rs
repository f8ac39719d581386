use crate::error::{CospError, Result};
use crate::index::{IndexEntry, IndexStore};

/// API marker and starting ordinal for one listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMarker {
    /// Raw object key handed to the listing API; `None` for the first page.
    pub api_marker: Option<String>,
    /// Ordinal assigned to the first key of the upcoming page.
    pub start_ordinal: u32,
}

/// Translates a user-supplied `--marker` token into the pair the listing
/// call needs. A token is either an ordinal printed by a previous `list`
/// run or a raw object key.
pub struct MarkerResolver<'a> {
    store: &'a IndexStore,
}

impl<'a> MarkerResolver<'a> {
    pub fn new(store: &'a IndexStore) -> Self {
        Self { store }
    }

    /// An ordinal token `n` continues the listing at ordinal `n`, so the
    /// marker handed to the API is the key recorded one before it (listing
    /// markers are exclusive). Resolution through the persisted table is
    /// mandatory; failure is fatal because the ordinal names no key without
    /// it. Anything that does not parse as a positive integer is taken
    /// literally as an object key.
    pub fn resolve(&self, token: &str) -> Result<ResolvedMarker> {
        if token.is_empty() {
            return Ok(ResolvedMarker {
                api_marker: None,
                start_ordinal: 1,
            });
        }
        let key = match token.parse::<u32>() {
            // Starting at ordinal 1 is the same as a fresh listing.
            Ok(1) => {
                return Ok(ResolvedMarker {
                    api_marker: None,
                    start_ordinal: 1,
                });
            }
            Ok(n) if n > 1 => {
                self.store.key_for_ordinal(n - 1).map_err(|e| match e {
                    // Report the ordinal the user typed, not the
                    // continuation point we looked up.
                    CospError::OrdinalNotFound(_) => CospError::OrdinalNotFound(n),
                    other => other,
                })?
            }
            _ => token.to_string(),
        };
        let start_ordinal = self.store.next_ordinal_for_key(&key);
        Ok(ResolvedMarker {
            api_marker: Some(key),
            start_ordinal,
        })
    }
}

/// Assign consecutive ordinals to one page of keys, in remote order.
/// Duplicates are kept; the remote ordering is authoritative.
pub fn index_page(start_ordinal: u32, keys: &[String]) -> Vec<IndexEntry> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| IndexEntry {
            ordinal: start_ordinal + i as u32,
            key: key.clone(),
        })
        .collect()
}

/// Marker value to suggest for the next page when the listing was truncated.
pub fn next_marker_hint(start_ordinal: u32, page_len: usize, truncated: bool) -> Option<u32> {
    truncated.then(|| start_ordinal + page_len as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> IndexStore {
        IndexStore::new(tmp.path().join("coslist"))
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_token_starts_at_one() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .persist(&index_page(1, &keys(&["a.png", "b.png"])))
            .unwrap();

        let resolved = MarkerResolver::new(&store).resolve("").unwrap();
        assert_eq!(resolved.api_marker, None);
        assert_eq!(resolved.start_ordinal, 1);
    }

    #[test]
    fn non_positive_tokens_are_literal_keys() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let resolver = MarkerResolver::new(&store);

        for token in ["0", "-5", "3rd.png"] {
            let resolved = resolver.resolve(token).unwrap();
            assert_eq!(resolved.api_marker.as_deref(), Some(token));
            assert_eq!(resolved.start_ordinal, 1);
        }
    }

    #[test]
    fn ordinal_token_resolves_through_table() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .persist(&index_page(1, &keys(&["a.png", "b.png"])))
            .unwrap();

        // Continuing at ordinal 3 lists everything after the key at 2.
        let resolved = MarkerResolver::new(&store).resolve("3").unwrap();
        assert_eq!(resolved.api_marker.as_deref(), Some("b.png"));
        assert_eq!(resolved.start_ordinal, 3);

        // Re-viewing from ordinal 2 anchors on the key at 1.
        let resolved = MarkerResolver::new(&store).resolve("2").unwrap();
        assert_eq!(resolved.api_marker.as_deref(), Some("a.png"));
        assert_eq!(resolved.start_ordinal, 2);
    }

    #[test]
    fn ordinal_one_is_a_fresh_listing() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        // Works even with no table at all.
        let resolved = MarkerResolver::new(&store).resolve("1").unwrap();
        assert_eq!(resolved.api_marker, None);
        assert_eq!(resolved.start_ordinal, 1);
    }

    #[test]
    fn unknown_key_on_empty_store_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let resolved = MarkerResolver::new(&store)
            .resolve("nonexistent.png")
            .unwrap();
        assert_eq!(resolved.api_marker.as_deref(), Some("nonexistent.png"));
        assert_eq!(resolved.start_ordinal, 1);
    }

    #[test]
    fn unknown_ordinal_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.persist(&index_page(1, &keys(&["a.png"]))).unwrap();

        assert!(matches!(
            MarkerResolver::new(&store).resolve("999"),
            Err(CospError::OrdinalNotFound(999))
        ));
    }

    #[test]
    fn ordinal_without_any_table_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        assert!(matches!(
            MarkerResolver::new(&store).resolve("2"),
            Err(CospError::IndexUnavailable(_))
        ));
    }

    #[test]
    fn page_indexing_keeps_remote_order() {
        let entries = index_page(3, &keys(&["c.png", "a.png"]));
        assert_eq!(entries[0].ordinal, 3);
        assert_eq!(entries[0].key, "c.png");
        assert_eq!(entries[1].ordinal, 4);
        assert_eq!(entries[1].key, "a.png");
    }

    #[test]
    fn hint_only_when_truncated() {
        assert_eq!(next_marker_hint(1, 2, true), Some(3));
        assert_eq!(next_marker_hint(3, 1, false), None);
    }

    // The pagination-continuity scenario: the ordinal a key gets on page i
    // equals the hint reported after page i-1.
    #[test]
    fn continuation_across_invocations() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let resolver = MarkerResolver::new(&store);

        // First invocation: `list --max-keys 2`, remote returns a truncated
        // page ["a.png", "b.png"].
        let first = resolver.resolve("").unwrap();
        assert_eq!(first.start_ordinal, 1);
        let page = keys(&["a.png", "b.png"]);
        store.persist(&index_page(first.start_ordinal, &page)).unwrap();
        let hint = next_marker_hint(first.start_ordinal, page.len(), true);
        assert_eq!(hint, Some(3));

        // Second invocation: `list --marker 3`, remote returns ["c.png"].
        let second = resolver.resolve("3").unwrap();
        assert_eq!(second.api_marker.as_deref(), Some("b.png"));
        assert_eq!(second.start_ordinal, 3);
        let page = keys(&["c.png"]);
        store.persist(&index_page(second.start_ordinal, &page)).unwrap();
        assert_eq!(next_marker_hint(second.start_ordinal, page.len(), false), None);
        assert_eq!(store.key_for_ordinal(3).unwrap(), "c.png");
    }
}
