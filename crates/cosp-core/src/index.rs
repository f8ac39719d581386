use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CospError, Result};

/// One row of the persisted ordinal → key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub ordinal: u32,
    pub key: String,
}

/// Durable ordinal → object-key table for one user.
///
/// The table is rewritten in full after every listing, so ordinals stay
/// meaningful exactly until the next `list` run replaces them. There is no
/// locking: the tool is single-operator and the last listing wins.
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the persisted table with `entries`, one `ordinal<TAB>key`
    /// record per line.
    pub fn persist(&self, entries: &[IndexEntry]) -> Result<()> {
        let mut content = String::new();
        for entry in entries {
            content.push_str(&entry.ordinal.to_string());
            content.push('\t');
            content.push_str(&entry.key);
            content.push('\n');
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Object key recorded for `ordinal`. First match wins if the remote
    /// listing ever handed out a duplicate key.
    pub fn key_for_ordinal(&self, ordinal: u32) -> Result<String> {
        let content = self.read_table()?;
        for (ord, key) in parse_lines(&content) {
            if ord == ordinal {
                return Ok(key.to_string());
            }
        }
        Err(CospError::OrdinalNotFound(ordinal))
    }

    /// Ordinal the next page starts at when the previous page ended at `key`.
    /// An absent table or an unknown key starts a fresh sequence at 1; that
    /// is a policy, not an error.
    pub fn next_ordinal_for_key(&self, key: &str) -> u32 {
        if key.is_empty() {
            return 1;
        }
        let Ok(content) = self.read_table() else {
            return 1;
        };
        for (ord, k) in parse_lines(&content) {
            if k == key {
                return ord + 1;
            }
        }
        1
    }

    fn read_table(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CospError::IndexUnavailable(self.path.display().to_string())
            } else {
                CospError::Io(e)
            }
        })
    }
}

/// Malformed lines are skipped rather than rejected.
fn parse_lines(content: &str) -> impl Iterator<Item = (u32, &str)> {
    content.lines().filter_map(|line| {
        let (ord, key) = line.split_once('\t')?;
        Some((ord.parse().ok()?, key))
    })
}

/// Default backing file: `{temp dir}/{user id}_coslist`.
pub fn default_index_path() -> PathBuf {
    std::env::temp_dir().join(format!("{}_coslist", current_user_id()))
}

#[cfg(unix)]
fn current_user_id() -> String {
    nix::unistd::Uid::current().to_string()
}

#[cfg(not(unix))]
fn current_user_id() -> String {
    std::env::var("USERNAME").unwrap_or_else(|_| "default".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> IndexStore {
        IndexStore::new(tmp.path().join("coslist"))
    }

    fn entry(ordinal: u32, key: &str) -> IndexEntry {
        IndexEntry {
            ordinal,
            key: key.to_string(),
        }
    }

    #[test]
    fn persist_then_lookup_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .persist(&[entry(1, "a.png"), entry(2, "b.png")])
            .unwrap();

        assert_eq!(store.key_for_ordinal(2).unwrap(), "b.png");
        assert_eq!(store.next_ordinal_for_key("b.png"), 3);
    }

    #[test]
    fn missing_file_is_unavailable_not_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        assert!(matches!(
            store.key_for_ordinal(1),
            Err(CospError::IndexUnavailable(_))
        ));
    }

    #[test]
    fn unknown_ordinal_names_the_ordinal() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.persist(&[entry(1, "a.png")]).unwrap();
        match store.key_for_ordinal(999) {
            Err(CospError::OrdinalNotFound(n)) => assert_eq!(n, 999),
            other => panic!("expected OrdinalNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_key_starts_fresh_sequence() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        assert_eq!(store.next_ordinal_for_key("anything.png"), 1);
        store.persist(&[entry(1, "a.png")]).unwrap();
        assert_eq!(store.next_ordinal_for_key("nonexistent.png"), 1);
        assert_eq!(store.next_ordinal_for_key(""), 1);
    }

    #[test]
    fn persist_fully_replaces_previous_table() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .persist(&[entry(1, "a.png"), entry(2, "b.png")])
            .unwrap();
        store.persist(&[entry(3, "c.png")]).unwrap();

        assert_eq!(store.key_for_ordinal(3).unwrap(), "c.png");
        assert!(matches!(
            store.key_for_ordinal(1),
            Err(CospError::OrdinalNotFound(1))
        ));
    }

    #[test]
    fn duplicate_keys_resolve_first_match() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .persist(&[entry(1, "dup.png"), entry(2, "dup.png")])
            .unwrap();

        assert_eq!(store.next_ordinal_for_key("dup.png"), 2);
        assert_eq!(store.key_for_ordinal(1).unwrap(), "dup.png");
        assert_eq!(store.key_for_ordinal(2).unwrap(), "dup.png");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("coslist");
        std::fs::write(&path, "not-a-number\tx.png\nno tab here\n2\tb.png\n").unwrap();
        let store = IndexStore::new(&path);

        assert_eq!(store.key_for_ordinal(2).unwrap(), "b.png");
        assert!(matches!(
            store.key_for_ordinal(1),
            Err(CospError::OrdinalNotFound(1))
        ));
    }

    #[test]
    fn default_path_ends_with_coslist() {
        let path = default_index_path();
        assert!(path.to_string_lossy().ends_with("_coslist"));
    }
}
