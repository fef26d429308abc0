use crate::utils::errors::{CertStoreError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CertStorePaths;
const PROGRAM_NAME: &str = "certstore-rs";

impl CertStorePaths {
    /// Get the config directory: ~/.config/certstore-rs/
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(PROGRAM_NAME))
            .ok_or_else(|| CertStoreError::Config("Cannot determine config directory".to_string()))
    }

    /// Get the default config file: ~/.config/certstore-rs/config.yaml
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Get the cache directory: ~/.cache/certstore-rs/
    pub fn cache_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|dir| dir.join(PROGRAM_NAME))
            .ok_or_else(|| CertStoreError::Config("Cannot determine cache directory".to_string()))
    }

    /// Expand a leading `~/` to the user's home directory
    pub fn expand_home(path: &str) -> Result<PathBuf> {
        match path.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .ok_or_else(|| CertStoreError::Config("Cannot determine home directory".to_string())),
            None => Ok(PathBuf::from(path)),
        }
    }

    /// Ensure a directory exists with proper permissions
    pub fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;

            // Staged certificates stay private to the user (700)
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = fs::metadata(path)?.permissions();
                perms.set_mode(0o700);
                fs::set_permissions(path, perms)?;
            }
        }
        Ok(())
    }
}
