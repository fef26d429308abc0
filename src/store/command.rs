use crate::cert::SerialNumber;
use std::path::Path;

pub const DEFAULT_EXECUTABLE: &str = "certutil.exe";

/// certutil invocations issued by the store manager.
///
/// Arguments are interpolated as-is; quoting is left to the caller.
#[derive(Debug, Clone, Copy)]
pub enum CertutilCommand<'a> {
    Verify {
        cert_file: &'a Path,
    },
    Store {
        store: &'a str,
    },
    AddStore {
        store: &'a str,
        cert_file: &'a Path,
    },
    DelStore {
        store: &'a str,
        serial: &'a SerialNumber,
    },
}

impl CertutilCommand<'_> {
    pub fn verb(&self) -> &'static str {
        match self {
            CertutilCommand::Verify { .. } => "-verify",
            CertutilCommand::Store { .. } => "-store",
            CertutilCommand::AddStore { .. } => "-addstore",
            CertutilCommand::DelStore { .. } => "-delstore",
        }
    }

    /// Full shell command line for the given executable
    pub fn command_line(&self, executable: &str) -> String {
        format!("{executable} {} {}", self.verb(), self.operands())
    }

    fn operands(&self) -> String {
        match self {
            CertutilCommand::Verify { cert_file } => cert_file.display().to_string(),
            CertutilCommand::Store { store } => store.to_string(),
            CertutilCommand::AddStore { store, cert_file } => {
                format!("{store} {}", cert_file.display())
            }
            CertutilCommand::DelStore { store, serial } => format!("{store} {serial}"),
        }
    }
}
