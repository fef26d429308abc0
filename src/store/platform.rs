use std::fmt;

/// Host operating system, as far as certificate store support is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        if os.eq_ignore_ascii_case("windows") {
            Platform::Windows
        } else {
            Platform::Other(os.to_string())
        }
    }

    pub fn has_cert_store(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::Other(os) => f.write_str(os),
        }
    }
}
