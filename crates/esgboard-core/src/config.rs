use crate::error::{EsgError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered pipeline configuration: geocoder endpoint and pacing, plus
/// the cache location. Precedence: Default < File < Environment < Cli.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub geocoder_base_url: ConfigValue<String>,
    pub geocoder_user_agent: ConfigValue<String>,
    pub rate_limit_ms: ConfigValue<u64>,
    pub lookup_timeout_secs: ConfigValue<u64>,
    pub cache_path: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            geocoder_base_url: ConfigValue::new(
                "https://nominatim.openstreetmap.org".to_string(),
                ConfigSource::Default,
            ),
            geocoder_user_agent: ConfigValue::new(
                "esgboard/0.1".to_string(),
                ConfigSource::Default,
            ),
            rate_limit_ms: ConfigValue::new(1100, ConfigSource::Default),
            lookup_timeout_secs: ConfigValue::new(8, ConfigSource::Default),
            cache_path: ConfigValue::new(
                PathBuf::from("geocode_cache.json"),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| EsgError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {e}"),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| EsgError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {e}"),
            })?;

        if let Some(url) = file_config.geocoder_base_url {
            self.geocoder_base_url.update(url, ConfigSource::File);
        }
        if let Some(agent) = file_config.geocoder_user_agent {
            self.geocoder_user_agent.update(agent, ConfigSource::File);
        }
        if let Some(ms) = file_config.rate_limit_ms {
            self.rate_limit_ms.update(ms, ConfigSource::File);
        }
        if let Some(secs) = file_config.lookup_timeout_secs {
            self.lookup_timeout_secs.update(secs, ConfigSource::File);
        }
        if let Some(path) = file_config.cache_path {
            self.cache_path.update(path, ConfigSource::File);
        }

        Ok(self)
    }

    /// Apply overrides from `ESGBOARD_`-prefixed environment variables
    pub fn load_from_env(mut self) -> Result<Self> {
        if let Ok(url) = env::var("ESGBOARD_GEOCODER_URL") {
            self.geocoder_base_url.update(url, ConfigSource::Environment);
        }
        if let Ok(agent) = env::var("ESGBOARD_USER_AGENT") {
            self.geocoder_user_agent
                .update(agent, ConfigSource::Environment);
        }
        if let Ok(ms) = env::var("ESGBOARD_RATE_LIMIT_MS") {
            let ms = ms.parse().map_err(|_| EsgError::ConfigInvalid {
                key: "ESGBOARD_RATE_LIMIT_MS".to_string(),
                reason: format!("not an integer: {ms}"),
            })?;
            self.rate_limit_ms.update(ms, ConfigSource::Environment);
        }
        if let Ok(secs) = env::var("ESGBOARD_LOOKUP_TIMEOUT_SECS") {
            let secs = secs.parse().map_err(|_| EsgError::ConfigInvalid {
                key: "ESGBOARD_LOOKUP_TIMEOUT_SECS".to_string(),
                reason: format!("not an integer: {secs}"),
            })?;
            self.lookup_timeout_secs
                .update(secs, ConfigSource::Environment);
        }
        if let Ok(path) = env::var("ESGBOARD_CACHE_PATH") {
            self.cache_path
                .update(PathBuf::from(path), ConfigSource::Environment);
        }
        Ok(self)
    }
}

/// Shape of the optional TOML config file
#[derive(Debug, Deserialize)]
struct FileConfig {
    geocoder_base_url: Option<String>,
    geocoder_user_agent: Option<String>,
    rate_limit_ms: Option<u64>,
    lookup_timeout_secs: Option<u64>,
    cache_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_have_expected_pacing() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.rate_limit_ms.value, 1100);
        assert_eq!(config.lookup_timeout_secs.value, 8);
        assert_eq!(config.rate_limit_ms.source, ConfigSource::Default);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rate_limit_ms = 500\ngeocoder_user_agent = \"test/1.0\"").unwrap();

        let config = LayeredConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap();
        assert_eq!(config.rate_limit_ms.value, 500);
        assert_eq!(config.rate_limit_ms.source, ConfigSource::File);
        assert_eq!(config.geocoder_user_agent.value, "test/1.0");
        // Untouched keys keep their defaults
        assert_eq!(config.lookup_timeout_secs.source, ConfigSource::Default);
    }

    #[test]
    fn lower_precedence_never_wins() {
        let mut value = ConfigValue::new(10u64, ConfigSource::Environment);
        value.update(20, ConfigSource::File);
        assert_eq!(value.value, 10);
        value.update(30, ConfigSource::Cli);
        assert_eq!(value.value, 30);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rate_limit_ms = \"fast\"").unwrap();
        let err = LayeredConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap_err();
        assert!(matches!(err, EsgError::ConfigInvalid { .. }));
    }
}
