use super::ConfigError;
use crate::form::{FormOptions, DEFAULT_NAMESPACE, DEFAULT_PAGE_SIZE};
use crate::shared::ids::MAX_SHORT_ID_LEN;
use crate::shared::logging::EventLog;
use crate::wizard::WizardOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CLONE_SUFFIX_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub default_namespace: String,
    pub page_size: usize,
    pub clone_suffix_length: usize,
    /// Block the basic info step on missing required fields. Off by default:
    /// the form has historically let that step through unchecked.
    pub gate_basic_info: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            clone_suffix_length: DEFAULT_CLONE_SUFFIX_LENGTH,
            gate_basic_info: false,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(super::API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = base.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Settings(
                "api_base_url must be non-empty".to_string(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Settings(format!(
                "api_base_url `{base}` must start with http:// or https://"
            )));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Settings(
                "request_timeout_seconds must be >= 1".to_string(),
            ));
        }
        if self.default_namespace.trim().is_empty() {
            return Err(ConfigError::Settings(
                "default_namespace must be non-empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Settings("page_size must be >= 1".to_string()));
        }
        if self.clone_suffix_length == 0 || self.clone_suffix_length > MAX_SHORT_ID_LEN {
            return Err(ConfigError::Settings(format!(
                "clone_suffix_length must be between 1 and {MAX_SHORT_ID_LEN}"
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn wizard_options(&self) -> WizardOptions {
        WizardOptions {
            form: FormOptions {
                default_namespace: self.default_namespace.clone(),
                page_size: self.page_size,
            },
            clone_suffix_length: self.clone_suffix_length,
            gate_basic_info: self.gate_basic_info,
        }
    }

    pub fn event_log(&self) -> EventLog {
        match &self.log_path {
            Some(path) => EventLog::to_path(path.clone()),
            None => EventLog::disabled(),
        }
    }
}
