use rocket::serde::de::DeserializeOwned;
use rocket::serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Default)]
#[serde(crate = "rocket::serde", default)]
pub struct Config {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct ApiConfig {
    pub host: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct DashboardConfig {
    pub poll_interval_ms: u64,
}

impl ApiConfig {
    /// `{host}/api/{api_version}`
    pub fn base_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.host.trim_end_matches('/'),
            self.api_version
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "http://localhost:5000".to_string(),
            api_version: "v1".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            poll_interval_ms: 5000, // 5 seconds
        }
    }
}

impl Config {
    /// Load the config at `path`, falling back to defaults when the file is absent.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config: Config = if Path::new(path).exists() {
            read_config(path)?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the backend host, e.g. with the value of `APP_HOST`.
    pub fn with_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.api.host = host;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.api.host.trim().is_empty() {
            return Err(ConfigError::Invalid("api.host must not be empty".to_string()));
        }
        Ok(())
    }
}

pub fn read_config<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}
