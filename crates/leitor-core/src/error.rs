use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Failure to produce a dictionary answer. "Word not found" is not an error.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("could not fetch dictionary: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not parse dictionary: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no config dir")]
    NoConfigDir,
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine not available: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
