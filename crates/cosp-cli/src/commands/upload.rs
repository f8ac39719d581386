use anyhow::{Context, Result, bail};
use chrono::Local;
use std::path::Path;

use crate::sniff::ImageKind;
use cosp_storage::provider::ObjectStore;

pub async fn run(path: &Path, base_dir: &Path) -> Result<()> {
    let data =
        std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;

    if ImageKind::detect(&data).is_none() {
        bail!(
            "{} is not an image or SVG; only image uploads are supported",
            path.display()
        );
    }

    let store = super::store::connect(base_dir).await?;

    // Timestamped key, keeping the original extension.
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    let object_key = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{timestamp}.{ext}"),
        None => timestamp.to_string(),
    };

    store
        .put(&object_key, &data)
        .await
        .context("Upload failed")?;
    println!("Uploaded: {}", store.object_url(&object_key));
    Ok(())
}
