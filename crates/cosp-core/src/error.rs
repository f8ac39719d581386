use thiserror::Error;

#[derive(Debug, Error)]
pub enum CospError {
    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0} — run `cosp init` first")]
    ConfigNotFound(String),

    // Local ordinal index
    #[error("Local index not found at {0} — run `cosp list` first")]
    IndexUnavailable(String),

    #[error("No entry for ordinal {0} in the local index")]
    OrdinalNotFound(u32),

    // Serialization
    #[error("TOML deserialization error: {0}")]
    TomlDe(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),
}

pub type Result<T> = std::result::Result<T, CospError>;
