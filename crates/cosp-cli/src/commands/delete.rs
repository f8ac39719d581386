use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

use cosp_storage::provider::ObjectStore;

pub async fn run(base_dir: &Path, keys: &[String], yes: bool) -> Result<()> {
    if !yes && !confirm(keys)? {
        println!("Aborted.");
        return Ok(());
    }

    let store = super::store::connect(base_dir).await?;

    let mut deleted = 0usize;
    for key in keys {
        match store.delete(key).await {
            Ok(()) => {
                println!("Deleted: {key}");
                deleted += 1;
            }
            Err(e) => eprintln!("Failed to delete {key}: {e:#}"),
        }
    }

    println!("Deleted {deleted} of {} objects", keys.len());
    Ok(())
}

fn confirm(keys: &[String]) -> Result<bool> {
    println!("About to delete {} objects:", keys.len());
    for key in keys {
        println!("  - {key}");
    }
    print!("Continue? (y/N): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
