use crate::utils::errors::{CertStoreError, Result};
use crate::utils::paths::CertStorePaths;
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Create the HTTP client used for remote certificate sources
pub fn create_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .use_rustls_tls()
        .build()
}

/// Cache location for a downloaded URL: `<base>/<host>/<path>`.
///
/// URLs without a file name are stored under the SHA-256 of the URL.
pub fn cache_path_for_url(base: &Path, url: &str) -> Result<PathBuf> {
    let parsed =
        Url::parse(url).map_err(|e| CertStoreError::InvalidInput(format!("Bad URL '{url}': {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| CertStoreError::InvalidInput(format!("URL '{url}' has no host")))?;

    let mut path = base.join(host);
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty() && *seg != "..").collect())
        .unwrap_or_default();

    let file_name = match segments.split_last() {
        Some((last, dirs)) if parsed.query().is_none() => {
            for dir in dirs {
                path.push(dir);
            }
            last.to_string()
        }
        _ => hex::encode(Sha256::digest(url.as_bytes())),
    };

    Ok(path.join(file_name))
}

/// Download `url` into `dest`, creating parent directories as needed
pub async fn download(client: &Client, url: &str, dest: &Path) -> Result<()> {
    tracing::debug!("Downloading {url} to {}", dest.display());

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(CertStoreError::Staging(format!(
            "Fetching {url} failed with status {}",
            response.status()
        )));
    }

    let body = response.bytes().await?;
    if let Some(parent) = dest.parent() {
        CertStorePaths::ensure_dir_exists(parent)?;
    }
    tokio::fs::write(dest, &body).await?;

    tracing::info!("Staged {} bytes from {url}", body.len());
    Ok(())
}
