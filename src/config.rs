use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default ODsay public transit path search endpoint
pub const DEFAULT_ODSAY_API_URL: &str = "https://api.odsay.com/v1/api/searchPubTransPathT";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub odsay: OdsaySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Clone, Deserialize)]
pub struct OdsaySettings {
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OdsaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdsaySettings")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_timeout_secs() -> u64 { 10 }

impl Settings {
    /// Load configuration from defaults, files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with BUSTIME__)
    /// 4. ODSAY_API_KEY / ODSAY_API_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., BUSTIME__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("BUSTIME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = substitute_env_vars(settings)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("BUSTIME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = substitute_env_vars(settings)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.odsay.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "ODsay API key is not set (ODSAY_API_KEY or BUSTIME__ODSAY__API_KEY)".to_string(),
            ));
        }
        if self.odsay.api_url.trim().is_empty() {
            return Err(ConfigError::Message("ODsay API URL is empty".to_string()));
        }
        if self.odsay.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "odsay.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("odsay.api_url", DEFAULT_ODSAY_API_URL)?
        .set_default("odsay.timeout_secs", default_timeout_secs() as i64)
}

/// Apply the plain ODSAY_* variables used by existing deployments
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("ODSAY_API_KEY").ok();
    let api_url = env::var("ODSAY_API_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("odsay.api_key", api_key)?;
    }
    if let Some(api_url) = api_url {
        builder = builder.set_override("odsay.api_url", api_url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: &str) -> Settings {
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8000,
                workers: None,
            },
            odsay: OdsaySettings {
                api_url: DEFAULT_ODSAY_API_URL.to_string(),
                api_key: api_key.to_string(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(default_timeout_secs(), 10);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = with_defaults(Config::builder())
            .unwrap()
            .set_override("odsay.api_key", "test_key")
            .unwrap()
            .build()
            .unwrap();
        let settings: Settings = config.try_deserialize().unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.odsay.api_url, DEFAULT_ODSAY_API_URL);
        assert_eq!(settings.odsay.timeout_secs, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_rejected() {
        assert!(settings("").validate().is_err());
        assert!(settings("   ").validate().is_err());
        assert!(settings("test_key").validate().is_ok());
    }

    #[test]
    fn test_load_from_applies_odsay_env_vars() {
        // Only test in this crate that touches ODSAY_* variables
        std::env::set_var("ODSAY_API_KEY", "from-env");
        std::env::set_var("ODSAY_API_URL", "http://odsay.local/searchPubTransPathT");

        let loaded = Settings::load_from("config/default.toml");

        std::env::remove_var("ODSAY_API_KEY");
        std::env::remove_var("ODSAY_API_URL");

        let settings = loaded.unwrap();
        assert_eq!(settings.odsay.api_key, "from-env");
        assert_eq!(settings.odsay.api_url, "http://odsay.local/searchPubTransPathT");
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", settings("super-secret"));
        assert!(!debug.contains("super-secret"));
    }
}
