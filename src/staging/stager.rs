use crate::config::Config;
use crate::staging::http::{cache_path_for_url, create_http_client, download};
use crate::staging::source::Source;
use crate::utils::errors::{CertStoreError, Result};
use crate::utils::paths::CertStorePaths;
use reqwest::Client;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;

/// Resolves a source descriptor to a file on the local disk.
pub trait FileStager: Send + Sync {
    /// `env` selects where remote sources are looked up; it is ignored for
    /// sources that are already local.
    fn stage(&self, source: &str, env: &str) -> impl Future<Output = Result<PathBuf>> + Send;
}

/// Copies remote sources into a per-environment cache directory
pub struct CachingStager {
    cache_dir: PathBuf,
    file_roots: BTreeMap<String, Vec<PathBuf>>,
    client: Client,
}

impl CachingStager {
    pub fn new(cache_dir: PathBuf, file_roots: BTreeMap<String, Vec<PathBuf>>) -> Result<Self> {
        let client = create_http_client()?;
        Ok(Self {
            cache_dir,
            file_roots,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.cache_dir()?, config.file_roots.clone())
    }

    async fn stage_local(&self, path: PathBuf) -> Result<PathBuf> {
        if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
            Ok(path)
        } else {
            Err(CertStoreError::Staging(format!(
                "Source file not found: {}",
                path.display()
            )))
        }
    }

    async fn stage_from_roots(&self, relative: &str, env: &str) -> Result<PathBuf> {
        let roots = self.file_roots.get(env).ok_or_else(|| {
            CertStoreError::Config(format!("No file roots configured for environment '{env}'"))
        })?;

        for root in roots {
            let candidate = root.join(relative);
            tracing::trace!("Looking for {relative} in {}", candidate.display());
            if !tokio::fs::metadata(&candidate)
                .await
                .is_ok_and(|m| m.is_file())
            {
                continue;
            }

            let dest = self.cache_dir.join("files").join(env).join(relative);
            if let Some(parent) = dest.parent() {
                CertStorePaths::ensure_dir_exists(parent)?;
            }
            tokio::fs::copy(&candidate, &dest).await?;
            tracing::debug!("Staged {} to {}", candidate.display(), dest.display());
            return Ok(dest);
        }

        Err(CertStoreError::Staging(format!(
            "salt://{relative} not found in environment '{env}'"
        )))
    }

    async fn stage_from_url(&self, url: &str, env: &str) -> Result<PathBuf> {
        let base = self.cache_dir.join("extrn_files").join(env);
        let dest = cache_path_for_url(&base, url)?;
        download(&self.client, url, &dest).await?;
        Ok(dest)
    }
}

impl FileStager for CachingStager {
    async fn stage(&self, source: &str, env: &str) -> Result<PathBuf> {
        let parsed = Source::parse(source)?;
        if !parsed.is_remote() {
            tracing::trace!("{source} is local, environment '{env}' not consulted");
        }

        match parsed {
            Source::Local(path) => self.stage_local(path).await,
            Source::FileRoots(relative) => self.stage_from_roots(relative, env).await,
            Source::Http(url) => self.stage_from_url(url, env).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn stager_with_roots(cache: &Path, roots: &[(&str, &Path)]) -> CachingStager {
        let mut file_roots = BTreeMap::new();
        for (env, root) in roots {
            file_roots
                .entry(env.to_string())
                .or_insert_with(Vec::new)
                .push(root.to_path_buf());
        }
        CachingStager::new(cache.to_path_buf(), file_roots).unwrap()
    }

    #[tokio::test]
    async fn test_local_path_ignores_environment() {
        let tmp = tempfile::tempdir().unwrap();
        let cert = tmp.path().join("cert.cer");
        fs::write(&cert, "cert").unwrap();
        let stager = stager_with_roots(&tmp.path().join("cache"), &[]);

        let staged = stager
            .stage(&cert.to_string_lossy(), "no-such-env")
            .await
            .unwrap();
        assert_eq!(staged, cert);
    }

    #[tokio::test]
    async fn test_missing_local_path() {
        let tmp = tempfile::tempdir().unwrap();
        let stager = stager_with_roots(&tmp.path().join("cache"), &[]);

        let err = stager
            .stage(&tmp.path().join("gone.cer").to_string_lossy(), "base")
            .await
            .unwrap_err();
        assert!(matches!(err, CertStoreError::Staging(_)));
    }

    #[tokio::test]
    async fn test_file_roots_copy_into_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("srv1");
        let second = tmp.path().join("srv2");
        fs::create_dir_all(second.join("x")).unwrap();
        fs::create_dir_all(&first).unwrap();
        fs::write(second.join("x").join("cert.cer"), "DER").unwrap();

        let cache = tmp.path().join("cache");
        let stager = stager_with_roots(
            &cache,
            &[("base", first.as_path()), ("base", second.as_path())],
        );

        let staged = stager.stage("salt://x/cert.cer", "base").await.unwrap();
        assert_eq!(
            staged,
            cache.join("files").join("base").join("x").join("cert.cer")
        );
        assert_eq!(fs::read_to_string(&staged).unwrap(), "DER");
    }

    #[tokio::test]
    async fn test_file_roots_respect_environment() {
        let tmp = tempfile::tempdir().unwrap();
        let base_root = tmp.path().join("base");
        fs::create_dir_all(&base_root).unwrap();
        fs::write(base_root.join("cert.cer"), "DER").unwrap();
        let dev_root = tmp.path().join("dev");
        fs::create_dir_all(&dev_root).unwrap();

        let stager = stager_with_roots(
            &tmp.path().join("cache"),
            &[("base", base_root.as_path()), ("dev", dev_root.as_path())],
        );

        let err = stager.stage("salt://cert.cer", "dev").await.unwrap_err();
        assert!(matches!(err, CertStoreError::Staging(_)));

        let err = stager.stage("salt://cert.cer", "prod").await.unwrap_err();
        assert!(matches!(err, CertStoreError::Config(_)));
    }

    #[tokio::test]
    async fn test_unknown_scheme() {
        let tmp = tempfile::tempdir().unwrap();
        let stager = stager_with_roots(tmp.path(), &[]);
        let err = stager
            .stage("ftp://example.com/cert.cer", "base")
            .await
            .unwrap_err();
        assert!(matches!(err, CertStoreError::InvalidInput(_)));
    }
}
