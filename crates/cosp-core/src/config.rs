use crate::error::{CospError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level cosp configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CospConfig {
    pub cos: CosSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosSettings {
    pub secret_id: String,
    pub secret_key: String,
    /// Bucket name including the appid suffix, e.g. `pics-1250000000`.
    pub bucket: String,
    /// COS region, e.g. `ap-beijing`.
    pub region: String,
    /// URL schema for the bucket endpoint.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Custom endpoint URL for S3-compatible services (e.g. MinIO).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Use path-style addressing (required by most S3-compatible servers).
    /// Default: true when a custom endpoint is set, false for real COS.
    #[serde(default)]
    pub path_style: Option<bool>,
}

fn default_schema() -> String {
    "https".to_string()
}

impl CosSettings {
    /// Public URL of the bucket, virtual-host style for real COS.
    pub fn bucket_url(&self) -> String {
        match &self.endpoint {
            Some(e) => format!("{}/{}", e.trim_end_matches('/'), self.bucket),
            None => format!(
                "{}://{}.cos.{}.myqcloud.com",
                self.schema, self.bucket, self.region
            ),
        }
    }

    /// S3 API endpoint handed to the SDK.
    pub fn api_endpoint(&self) -> String {
        match &self.endpoint {
            Some(e) => e.clone(),
            None => format!("{}://cos.{}.myqcloud.com", self.schema, self.region),
        }
    }

    pub fn use_path_style(&self) -> bool {
        self.path_style.unwrap_or(self.endpoint.is_some())
    }
}

impl CospConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CospError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| CospError::TomlDe(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CospError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let c = &self.cos;
        if c.secret_id.is_empty()
            || c.secret_key.is_empty()
            || c.bucket.is_empty()
            || c.region.is_empty()
        {
            return Err(CospError::Config(
                "missing required field: secret_id, secret_key, bucket and region must be set"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Default config for `cosp init`.
    pub fn default_config() -> Self {
        Self {
            cos: CosSettings {
                secret_id: "your-secret-id".to_string(),
                secret_key: "your-secret-key".to_string(),
                bucket: "example-1250000000".to_string(),
                region: "ap-beijing".to_string(),
                schema: default_schema(),
                endpoint: None,
                path_style: None,
            },
        }
    }

    /// Resolve the config file path: `<base_dir>/cosp.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("cosp.toml")
    }

    /// Resolve the default cosp home directory: `~/.cosp`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".cosp"))
            .ok_or_else(|| CospError::Config("Cannot determine home directory".to_string()))
    }
}
