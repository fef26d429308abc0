use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A certificate serial number as printed by certutil.
///
/// The token is kept verbatim: certutil prints serials in the store's own
/// casing and `-delstore` matches them as given, so no normalisation is done.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber {
    token: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SerialNumberParseError {
    #[error("Empty string provided")]
    EmptyString,

    #[error("Embedded whitespace at byte {0}")]
    Whitespace(usize),
}

pub type Result<T> = std::result::Result<T, SerialNumberParseError>;

impl SerialNumber {
    /// Parse a token scraped from tool output
    pub fn parse(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(SerialNumberParseError::EmptyString);
        }

        if let Some((pos, _)) = token.char_indices().find(|(_, c)| c.is_whitespace()) {
            return Err(SerialNumberParseError::Whitespace(pos));
        }

        Ok(Self {
            token: token.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

impl FromStr for SerialNumber {
    type Err = SerialNumberParseError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for SerialNumber {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.token)
    }
}

impl<'de> Deserialize<'de> for SerialNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SerialNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}
