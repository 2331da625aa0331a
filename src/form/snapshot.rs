use super::entries::{EnvVar, SpecEntryValues};
use serde::{Deserialize, Serialize};

/// Plain copy of every value a user can see in the form, in list order.
/// Draft files and decoded specs use this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    pub experiment_name: String,
    pub description: String,
    pub namespace: String,
    pub cmd: String,
    pub image: String,
    pub envs: Vec<EnvVar>,
    pub specs: Vec<SpecEntryValues>,
}
