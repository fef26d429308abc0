use crate::store::DEFAULT_EXECUTABLE;
use crate::utils::errors::{CertStoreError, Result};
use crate::utils::paths::CertStorePaths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_ENVIRONMENT: &str = "base";

/// Runtime configuration, read from `~/.config/certstore-rs/config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// certutil executable, looked up on PATH
    pub certutil: String,
    /// Environment used when none is given on the command line
    pub default_env: String,
    /// Directories searched for `salt://` sources, per environment
    pub file_roots: BTreeMap<String, Vec<PathBuf>>,
    /// Where staged files are kept (defaults to the user cache directory)
    pub cache_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            certutil: DEFAULT_EXECUTABLE.to_string(),
            default_env: DEFAULT_ENVIRONMENT.to_string(),
            file_roots: BTreeMap::new(),
            cache_dir: None,
        }
    }
}

impl Config {
    /// Load the config file. An explicit path must exist; the default path
    /// falls back to built-in defaults when absent.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (CertStorePaths::expand_home(p)?, true),
            None => (CertStorePaths::config_file()?, false),
        };

        if !path.exists() {
            if explicit {
                return Err(CertStoreError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.certutil.trim().is_empty() {
            return Err(CertStoreError::Config(
                "certutil executable must not be empty".to_string(),
            ));
        }
        if self.default_env.trim().is_empty() {
            return Err(CertStoreError::Config(
                "default_env must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective cache directory
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => CertStorePaths::expand_home(&dir.to_string_lossy()),
            None => CertStorePaths::cache_dir(),
        }
    }
}
