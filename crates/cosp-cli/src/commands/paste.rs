use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::clipboard;
use crate::sniff::ImageKind;
use cosp_storage::provider::ObjectStore;

pub async fn run(base_dir: &Path) -> Result<()> {
    let data = clipboard::read()?;
    if data.is_empty() {
        bail!("Clipboard is empty");
    }
    let Some(kind) = ImageKind::detect(&data) else {
        bail!("Clipboard content is not an image or SVG");
    };

    let store = super::store::connect(base_dir).await?;

    let object_key = format!("paste_{}.{}", std::process::id(), kind.extension());
    store
        .put(&object_key, &data)
        .await
        .context("Upload failed")?;
    println!("Uploaded: {}", store.object_url(&object_key));
    Ok(())
}
