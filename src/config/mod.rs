pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::load_settings;
pub use paths::{
    default_global_config_path, API_BASE_ENV, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use settings::{
    Settings, DEFAULT_API_BASE_URL, DEFAULT_CLONE_SUFFIX_LENGTH, DEFAULT_REQUEST_TIMEOUT_SECONDS,
};
