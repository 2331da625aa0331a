//! The `cpu=<n>,memory=<n><unit>` resources string carried by each spec entry.
//!
//! Encoding is plain formatting. Decoding matches the whole string against
//! one anchored pattern, so any text outside the three captured fields is an
//! error rather than being dropped.

use super::error::ResourceParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MEMORY_UNITS: [MemoryUnit; 2] = [MemoryUnit::M, MemoryUnit::G];

const RESOURCES_RE: &str = r"^cpu=([0-9]+),memory=([0-9]+)([MG])$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryUnit {
    M,
    G,
}

impl MemoryUnit {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "M" => Some(MemoryUnit::M),
            "G" => Some(MemoryUnit::G),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemoryUnit::M => "M",
            MemoryUnit::G => "G",
        }
    }
}

impl std::fmt::Display for MemoryUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded resources. `memory` keeps the digits exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub cpus: u32,
    pub memory: String,
    pub unit: MemoryUnit,
}

impl Resources {
    pub fn encode(&self) -> String {
        compose_resources(self.cpus, &self.memory, self.unit.as_str())
    }

    pub fn parse(raw: &str) -> Result<Self, ResourceParseError> {
        let malformed = || ResourceParseError::Malformed {
            raw: raw.to_string(),
        };
        let caps = resources_regex().captures(raw).ok_or_else(malformed)?;
        let unit = MemoryUnit::parse(&caps[3]).ok_or_else(malformed)?;
        let cpus = caps[1]
            .parse::<u32>()
            .map_err(|_| ResourceParseError::CpuOverflow {
                raw: caps[1].to_string(),
            })?;

        Ok(Self {
            cpus,
            memory: caps[2].to_string(),
            unit,
        })
    }
}

/// Compose the wire string from raw form values without validating them.
pub fn compose_resources(cpus: impl std::fmt::Display, memory: &str, unit: &str) -> String {
    format!("cpu={cpus},memory={memory}{unit}")
}

fn resources_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RESOURCES_RE).expect("resources regex is valid"))
}
