//! Certificate store operations on top of certutil.
//!
//! Every operation is one (or, for deletion, two) certutil round-trips. The
//! tool's exit status is never inspected: callers get the raw text back and
//! decide for themselves whether it succeeded.

use crate::cert::SerialNumber;
use crate::exec::CommandRunner;
use crate::staging::FileStager;
use crate::store::command::{CertutilCommand, DEFAULT_EXECUTABLE};
use crate::store::parser::{parse_store_serials, parse_verify_serial};
use crate::store::platform::Platform;
use crate::utils::errors::{CertStoreError, Result};
use std::path::Path;

pub struct StoreManager<R, S> {
    runner: R,
    stager: S,
    executable: String,
}

impl<R: CommandRunner, S: FileStager> StoreManager<R, S> {
    pub fn new(runner: R, stager: S) -> Self {
        Self {
            runner,
            stager,
            executable: DEFAULT_EXECUTABLE.to_string(),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Build a manager only if `platform` has a certificate store
    pub fn for_platform(platform: &Platform, runner: R, stager: S) -> Result<Self> {
        if !platform.has_cert_store() {
            return Err(CertStoreError::UnsupportedPlatform(format!(
                "certificate store management requires windows, running on {platform}"
            )));
        }
        Ok(Self::new(runner, stager))
    }

    /// Build a manager for the current host, checking that `executable` is
    /// reachable on PATH.
    pub fn for_host(runner: R, stager: S, executable: &str) -> Result<Self> {
        let manager = Self::for_platform(&Platform::current(), runner, stager)?;

        let resolved = which::which(executable).map_err(|_| {
            CertStoreError::Config(format!("{executable} not found in PATH"))
        })?;
        tracing::debug!("Using {} for certificate store access", resolved.display());

        Ok(manager.with_executable(executable))
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn stager(&self) -> &S {
        &self.stager
    }

    async fn run(&self, command: CertutilCommand<'_>) -> Result<String> {
        let line = command.command_line(&self.executable);
        tracing::debug!("certutil {}", command.verb());
        self.runner.run(&line).await
    }

    /// Serial number of a local certificate file, or `None` when the verify
    /// report does not contain one.
    pub async fn get_cert_serial(&self, cert_file: &Path) -> Result<Option<SerialNumber>> {
        let output = self.run(CertutilCommand::Verify { cert_file }).await?;
        let serial = parse_verify_serial(&output);

        match &serial {
            Some(serial) => tracing::debug!("{} has serial {serial}", cert_file.display()),
            None => tracing::warn!("No serial number found for {}", cert_file.display()),
        }
        Ok(serial)
    }

    /// Serial numbers of every certificate in `store`, in listing order.
    ///
    /// Output that cannot be parsed yields an empty list.
    pub async fn get_stored_cert_serials(&self, store: &str) -> Result<Vec<SerialNumber>> {
        let output = self.run(CertutilCommand::Store { store }).await?;
        let serials = parse_store_serials(&output);
        tracing::debug!("Found {} certificates in store {store}", serials.len());
        Ok(serials)
    }

    /// Add the certificate at `source` to `store` and return certutil's output
    pub async fn add_store(&self, source: &str, store: &str, env: &str) -> Result<String> {
        let cert_file = self.stager.stage(source, env).await?;
        tracing::info!("Adding {source} to store {store}");
        self.run(CertutilCommand::AddStore {
            store,
            cert_file: &cert_file,
        })
        .await
    }

    /// Remove the certificate at `source` from `store`, matched by serial.
    ///
    /// Fails with [`CertStoreError::SerialNotFound`] before touching the store
    /// when the certificate's serial cannot be read.
    pub async fn del_store(&self, source: &str, store: &str, env: &str) -> Result<String> {
        let cert_file = self.stager.stage(source, env).await?;
        let serial = self
            .get_cert_serial(&cert_file)
            .await?
            .ok_or_else(|| CertStoreError::SerialNotFound(source.to_string()))?;

        tracing::info!("Removing serial {serial} from store {store}");
        self.run(CertutilCommand::DelStore {
            store,
            serial: &serial,
        })
        .await
    }
}
