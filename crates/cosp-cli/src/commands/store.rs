use anyhow::Result;
use std::path::Path;

use cosp_core::config::{CosSettings, CospConfig};
use cosp_storage::cos::{CosObjectStore, CosOptions};

/// Load the config and build the remote store for one command invocation.
pub async fn connect(base_dir: &Path) -> Result<CosObjectStore> {
    let config_path = CospConfig::default_path(base_dir);
    let config = CospConfig::load(&config_path)?;
    from_settings(&config.cos).await
}

pub async fn from_settings(cos: &CosSettings) -> Result<CosObjectStore> {
    let endpoint_url = cos.api_endpoint();
    let bucket_url = cos.bucket_url();
    CosObjectStore::with_options(CosOptions {
        bucket: &cos.bucket,
        region: &cos.region,
        endpoint_url: &endpoint_url,
        path_style: cos.use_path_style(),
        access_key: Some(&cos.secret_id),
        secret_key: Some(&cos.secret_key),
        bucket_url: &bucket_url,
    })
    .await
}
