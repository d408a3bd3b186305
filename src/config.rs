use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Use this 7-Zip executable instead of probing the install locations.
    pub engine_path: Option<PathBuf>,
    /// Suffix for archive commands that don't pass `--suffix`.
    pub default_suffix: Option<String>,
}

impl AppConfig {
    /// Pick the suffix for an archive command: explicit flag, then config.
    pub fn suffix_or_default(&self, explicit: Option<String>) -> Option<String> {
        explicit
            .or_else(|| self.default_suffix.clone())
            .filter(|s| !s.is_empty())
    }
}

/// Load `Config.toml` (optional) overlaid with `SEVENZ_BATCH_*` env vars.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(environment())
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

fn environment() -> Environment {
    Environment::with_prefix("SEVENZ_BATCH")
}
