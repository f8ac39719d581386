use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One listing call against the remote bucket.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub max_keys: i32,
    pub prefix: Option<String>,
    /// Raw object key; the page starts at the first key after it.
    pub marker: Option<String>,
}

/// One object as reported by the listing call.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// One page of listing results, in remote order.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub objects: Vec<RemoteObject>,
    /// More results exist beyond this page.
    pub is_truncated: bool,
}

/// Trait for object-storage backends.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects.
    async fn list(&self, req: &ListRequest) -> anyhow::Result<ListPage>;

    /// Upload an object.
    async fn put(&self, key: &str, data: &[u8]) -> anyhow::Result<()>;

    /// Delete an object.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;

    /// Public URL of an object, for display.
    fn object_url(&self, key: &str) -> String;
}
