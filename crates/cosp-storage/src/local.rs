use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::provider::{ListPage, ListRequest, ObjectStore, RemoteObject};

/// Filesystem-based object store for local testing.
///
/// Keys live in a flat namespace (one file per key) and listing follows the
/// remote contract: lexicographic order, keys strictly after the marker,
/// prefix filter, truncation at `max_keys`.
pub struct LocalObjectStore {
    base_path: PathBuf,
}

impl LocalObjectStore {
    pub fn new(base_path: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(base_path)?;
        Ok(Self {
            base_path: base_path.to_path_buf(),
        })
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn list(&self, req: &ListRequest) -> anyhow::Result<ListPage> {
        let mut keys: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if req.prefix.as_deref().is_some_and(|p| !name.starts_with(p)) {
                continue;
            }
            if req.marker.as_deref().is_some_and(|m| name.as_str() <= m) {
                continue;
            }
            keys.push(name);
        }
        keys.sort();

        let max = req.max_keys.max(0) as usize;
        let is_truncated = keys.len() > max;
        keys.truncate(max);

        let mut objects = Vec::with_capacity(keys.len());
        for key in keys {
            let meta = std::fs::metadata(self.object_path(&key))?;
            let last_modified = meta
                .modified()
                .ok()
                .map(|mtime| DateTime::<Utc>::from(mtime));
            objects.push(RemoteObject {
                key,
                size: meta.len(),
                last_modified,
            });
        }

        Ok(ListPage {
            objects,
            is_truncated,
        })
    }

    async fn put(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
        std::fs::write(self.object_path(key), data)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.object_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("file://{}", self.object_path(key).display())
    }
}
