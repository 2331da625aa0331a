//! `ExperimentSpec`: the JSON document exchanged with the experiment backend.
//!
//! JSON shape:
//! {
//!   "meta": {
//!     "name": "mnist-job",
//!     "namespace": "default",
//!     "framework": "Tensorflow",
//!     "cmd": "python train.py",
//!     "description": "optional",
//!     "envVars": { "ENV_1": "ENV1" }
//!   },
//!   "environment": { "image": "registry/mnist:latest" },
//!   "spec": {
//!     "Worker": { "replicas": 2, "resources": "cpu=4,memory=8G" }
//!   }
//! }

use crate::shared::serde_ext::{is_blank, string_or_null};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Framework written by every encoded spec.
pub const DEFAULT_FRAMEWORK: Framework = Framework::Tensorflow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSpec {
    pub meta: SpecMeta,
    #[serde(default)]
    pub environment: SpecEnvironment,
    #[serde(default)]
    pub spec: Specs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecMeta {
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub namespace: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub framework: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub cmd: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(rename = "envVars", default)]
    pub env_vars: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEnvironment {
    #[serde(default, deserialize_with = "string_or_null")]
    pub image: String,
}

/// Resource groups keyed by spec name (`Worker`, `Ps`, ...).
pub type Specs = BTreeMap<String, SpecResource>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecResource {
    pub replicas: Replicas,
    pub resources: String,
}

/// Replica count as it arrives on the wire: backends send either a number or
/// a numeric string. Anything else (negative, fractional, null) lands in
/// `Other` and fails at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Replicas {
    Count(u32),
    Text(String),
    Other(serde_json::Value),
}

impl Replicas {
    pub fn count(&self) -> Option<u32> {
        match self {
            Replicas::Count(value) => Some(*value),
            Replicas::Text(raw) => raw.trim().parse::<u32>().ok(),
            Replicas::Other(_) => None,
        }
    }

    pub fn raw(&self) -> String {
        match self {
            Replicas::Count(value) => value.to_string(),
            Replicas::Text(raw) => raw.clone(),
            Replicas::Other(value) => value.to_string(),
        }
    }
}

impl From<u32> for Replicas {
    fn from(value: u32) -> Self {
        Replicas::Count(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Tensorflow,
    Pytorch,
}

const TENSORFLOW_SPEC_NAMES: [&str; 3] = ["Master", "Worker", "Ps"];
const PYTORCH_SPEC_NAMES: [&str; 2] = ["Master", "Worker"];

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Tensorflow => "Tensorflow",
            Framework::Pytorch => "Pytorch",
        }
    }

    /// Spec names offered as suggestions for this framework.
    pub fn spec_names(self) -> &'static [&'static str] {
        match self {
            Framework::Tensorflow => &TENSORFLOW_SPEC_NAMES,
            Framework::Pytorch => &PYTORCH_SPEC_NAMES,
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
