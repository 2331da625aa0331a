use super::error::ApiError;
use crate::shared::ids::ExperimentId;
use crate::spec::ExperimentSpec;
use serde::{Deserialize, Serialize};

/// What the backend reports back about a created or updated experiment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedExperiment {
    #[serde(rename = "experimentId", default)]
    pub experiment_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

pub trait ExperimentApi {
    fn create_experiment(&self, spec: &ExperimentSpec) -> Result<SubmittedExperiment, ApiError>;

    fn update_experiment(
        &self,
        id: &ExperimentId,
        spec: &ExperimentSpec,
    ) -> Result<SubmittedExperiment, ApiError>;
}
