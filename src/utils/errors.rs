use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command execution error: {0}")]
    Command(String),

    #[error("Staging error: {0}")]
    Staging(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Serial number not found: {0}")]
    SerialNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CertStoreError>;
