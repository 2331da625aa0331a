use super::{default_global_config_path, ConfigError, Settings};
use std::path::Path;

/// Load settings from `explicit` when given (the file must exist), otherwise
/// from the global config path when present, otherwise defaults. Environment
/// overrides apply last, then the result is validated.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match explicit {
        Some(path) => Settings::from_path(path)?,
        None => match default_global_config_path() {
            Ok(path) if path.exists() => Settings::from_path(&path)?,
            _ => Settings::default(),
        },
    };
    settings.apply_env_overrides_from(|key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}
