use super::client::{ExperimentApi, SubmittedExperiment};
use super::error::ApiError;
use crate::config::Settings;
use crate::shared::ids::ExperimentId;
use crate::spec::ExperimentSpec;
use serde::Deserialize;
use std::time::Duration;

const EXPERIMENT_PATH: &str = "api/v1/experiment";

#[derive(Debug, Clone)]
pub struct HttpExperimentApi {
    api_base: String,
    timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

impl HttpExperimentApi {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.request_timeout())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    fn send_spec(
        &self,
        method: &str,
        url: &str,
        spec: &ExperimentSpec,
    ) -> Result<SubmittedExperiment, ApiError> {
        let body = serde_json::to_value(spec).map_err(|e| ApiError::Request(e.to_string()))?;
        let response = match ureq::request(method, url)
            .timeout(self.timeout)
            .send_json(body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(ApiError::Rejected {
                    status,
                    message: rejection_message(status, response),
                });
            }
            Err(err) => return Err(ApiError::Request(err.to_string())),
        };

        let status = response.status();
        let envelope: ApiEnvelope<SubmittedExperiment> = response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if envelope.success == Some(false) {
            let status = envelope.code.unwrap_or(status);
            return Err(ApiError::Rejected {
                status,
                message: non_empty(envelope.message)
                    .unwrap_or_else(|| format!("experiment api reported failure ({status})")),
            });
        }
        Ok(envelope.result.unwrap_or_default())
    }
}

impl ExperimentApi for HttpExperimentApi {
    fn create_experiment(&self, spec: &ExperimentSpec) -> Result<SubmittedExperiment, ApiError> {
        self.send_spec("POST", &self.endpoint(EXPERIMENT_PATH), spec)
    }

    fn update_experiment(
        &self,
        id: &ExperimentId,
        spec: &ExperimentSpec,
    ) -> Result<SubmittedExperiment, ApiError> {
        let path = format!("{EXPERIMENT_PATH}/{}", urlencoding::encode(id.as_str()));
        self.send_spec("PATCH", &self.endpoint(&path), spec)
    }
}

fn rejection_message(status: u16, response: ureq::Response) -> String {
    let fallback = format!("experiment api returned status {status}");
    let Ok(body) = response.into_string() else {
        return fallback;
    };
    serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| non_empty(envelope.message))
        .unwrap_or(fallback)
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|value| !value.trim().is_empty())
}
