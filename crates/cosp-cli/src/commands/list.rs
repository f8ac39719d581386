use anyhow::Result;
use std::path::Path;

use cosp_core::index::{IndexStore, default_index_path};
use cosp_core::marker::{MarkerResolver, index_page, next_marker_hint};
use cosp_storage::provider::{ListRequest, ObjectStore, RemoteObject};

/// One page of listing results with the ordinals assigned to it.
struct PageView {
    rows: Vec<(u32, RemoteObject)>,
    next_hint: Option<u32>,
}

/// Resolve the marker token, fetch one page and record the ordinals.
///
/// Marker resolution runs before the network call and its failure aborts the
/// whole listing. Persisting the refreshed index afterwards is best effort:
/// a write failure must not erase an already-successful listing, so it is
/// only logged. An empty page leaves the previous table untouched.
async fn fetch_page(
    store: &dyn ObjectStore,
    index: &IndexStore,
    max_keys: i32,
    prefix: Option<&str>,
    marker_token: &str,
) -> Result<PageView> {
    let resolved = MarkerResolver::new(index).resolve(marker_token)?;

    let page = store
        .list(&ListRequest {
            max_keys,
            prefix: prefix.map(str::to_string),
            marker: resolved.api_marker.clone(),
        })
        .await?;

    let keys: Vec<String> = page.objects.iter().map(|o| o.key.clone()).collect();
    if !keys.is_empty() {
        if let Err(e) = index.persist(&index_page(resolved.start_ordinal, &keys)) {
            tracing::warn!("failed to persist the ordinal index: {e}");
        }
    }

    let next_hint = next_marker_hint(
        resolved.start_ordinal,
        page.objects.len(),
        page.is_truncated,
    );
    let rows = page
        .objects
        .into_iter()
        .enumerate()
        .map(|(i, obj)| (resolved.start_ordinal + i as u32, obj))
        .collect();

    Ok(PageView { rows, next_hint })
}

pub async fn run(
    base_dir: &Path,
    max_keys: i32,
    prefix: Option<&str>,
    marker: Option<&str>,
) -> Result<()> {
    let store = super::store::connect(base_dir).await?;
    let index = IndexStore::new(default_index_path());

    let view = fetch_page(&store, &index, max_keys, prefix, marker.unwrap_or("")).await?;

    if view.rows.is_empty() {
        println!("No objects found.");
        return Ok(());
    }

    println!(
        "{:<4} {:<40} {:>10} {:<19}  {}",
        "#", "KEY", "SIZE", "LAST MODIFIED", "URL"
    );
    println!("{}", "-".repeat(110));

    for (ordinal, obj) in &view.rows {
        let modified = obj
            .last_modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!(
            "{:<4} {:<40} {:>10} {:<19}  {}",
            ordinal,
            obj.key,
            format_size(obj.size),
            modified,
            store.object_url(&obj.key),
        );
    }

    println!("\n{} objects on this page", view.rows.len());
    if let Some(hint) = view.next_hint {
        println!("More objects remain; continue with `cosp list --marker {hint}`");
    }

    Ok(())
}

fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{size} B")
    }
}
