use crate::shared::serde_ext::parse_via_string;
use serde::{Deserialize, Deserializer, Serialize};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
// Largest multiple of 36 that fits in a byte; samples at or above it are
// rejected so every symbol is equally likely.
const BASE36_SAMPLE_LIMIT: u8 = 252;
pub const MAX_SHORT_ID_LEN: usize = 21;

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

/// Server-assigned experiment identifier, used as the target of an update.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExperimentId(String);

impl ExperimentId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("experiment id", raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for ExperimentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for ExperimentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "experiment id", Self::parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdError {
    #[error("short id length must be between 1 and {MAX_SHORT_ID_LEN}, got {0}")]
    InvalidLength(usize),
    #[error("failed to gather randomness for short id: {0}")]
    Entropy(String),
}

/// Source of the short suffix appended to cloned experiment names.
pub trait ShortIdGenerator {
    fn short_id(&self, len: usize) -> Result<String, IdError>;
}

/// Lower-case base36 ids drawn from the OS random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShortIds;

impl ShortIdGenerator for RandomShortIds {
    fn short_id(&self, len: usize) -> Result<String, IdError> {
        if len == 0 || len > MAX_SHORT_ID_LEN {
            return Err(IdError::InvalidLength(len));
        }
        let mut out = String::with_capacity(len);
        let mut buf = [0_u8; 32];
        while out.len() < len {
            getrandom::getrandom(&mut buf).map_err(|err| IdError::Entropy(err.to_string()))?;
            for byte in buf {
                if byte >= BASE36_SAMPLE_LIMIT {
                    continue;
                }
                out.push(BASE36_ALPHABET[(byte % 36) as usize] as char);
                if out.len() == len {
                    break;
                }
            }
        }
        Ok(out)
    }
}
