use anyhow::{Result, bail};
use std::path::Path;

use cosp_core::config::CospConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = CospConfig::default_path(base_dir);
    if config_path.exists() {
        bail!("Config already exists at {}", config_path.display());
    }

    CospConfig::default_config().save(&config_path)?;
    println!("Wrote {}", config_path.display());
    println!("Fill in secret_id, secret_key, bucket and region before use.");
    Ok(())
}
