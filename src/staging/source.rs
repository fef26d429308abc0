use crate::utils::errors::{CertStoreError, Result};
use std::path::{Component, Path, PathBuf};

/// A certificate source descriptor, as given by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source<'a> {
    /// Already on this machine
    Local(PathBuf),
    /// `salt://` path, relative to an environment's file roots
    FileRoots(&'a str),
    /// `http://` or `https://` URL
    Http(&'a str),
}

impl<'a> Source<'a> {
    pub fn parse(source: &'a str) -> Result<Self> {
        let Some((scheme, rest)) = source.split_once("://") else {
            return Ok(Source::Local(PathBuf::from(source)));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "file" => Ok(Source::Local(PathBuf::from(strip_drive_slash(rest)))),
            "salt" => {
                let relative = rest.trim_start_matches('/');
                if relative.is_empty() {
                    return Err(CertStoreError::InvalidInput(format!(
                        "Empty path in source '{source}'"
                    )));
                }
                if Path::new(relative)
                    .components()
                    .any(|c| !matches!(c, Component::Normal(_)))
                {
                    return Err(CertStoreError::InvalidInput(format!(
                        "Source '{source}' must stay inside the file roots"
                    )));
                }
                Ok(Source::FileRoots(relative))
            }
            "http" | "https" => Ok(Source::Http(source)),
            other => Err(CertStoreError::InvalidInput(format!(
                "Unsupported source scheme '{other}' in '{source}'"
            ))),
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, Source::Local(_))
    }
}

/// `file:///C:/certs/a.cer` carries a slash before the drive letter
fn strip_drive_slash(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':'
    {
        &path[1..]
    } else {
        path
    }
}
