//! Server Settings

use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration for the API server.
///
/// Defaults can be overridden by an optional `config.toml` next to the
/// binary, then by `PRICE_API_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the server listens on
    pub bind_addr: String,
    /// Path to the persisted model
    pub model_path: PathBuf,
}

impl Settings {
    /// Load settings from defaults, file, and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("model_path", "models/price_tree.json")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("PRICE_API"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.model_path, PathBuf::from("models/price_tree.json"));
    }
}
