//! Configuration loading for the API service
//!
//! Every setting is resolved independently in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; the service starts on defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_PATH: &str = "database.db";
pub const DEFAULT_MODEL_PATH: &str = "data/attrition_model.json";
pub const DEFAULT_LOG_FILTER: &str = "attrition_api=info,tower_http=info";

pub const ENV_HOST: &str = "ATTRITION_API_HOST";
pub const ENV_PORT: &str = "ATTRITION_API_PORT";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";
pub const ENV_MODEL_PATH: &str = "MODEL_PATH";
pub const ENV_CONFIG: &str = "ATTRITION_CONFIG";

/// Name of the config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "attrition.toml";

/// Bootstrap configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// SQLite employee database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Classifier artifact
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default)]
    pub filter: Option<String>,
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Fully resolved API configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub model_path: PathBuf,
    pub log_filter: String,
    /// Config file that contributed values, if any
    pub config_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            config_file: None,
        }
    }
}

impl ApiConfig {
    /// Resolve every setting from CLI, environment, config file and defaults
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let config_file = locate_config_file(cli.config.as_deref())?;
        let toml = match &config_file {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                TomlConfig::load(path)?
            }
            None => TomlConfig::default(),
        };

        let port = match cli.port {
            Some(port) => port,
            None => match env_var(ENV_PORT) {
                Some(raw) => raw.parse().map_err(|_| {
                    Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw))
                })?,
                None => toml.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let host = cli
            .host
            .clone()
            .or_else(|| env_var(ENV_HOST))
            .or(toml.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let database_path = cli
            .database
            .clone()
            .or_else(|| env_var(ENV_DATABASE_PATH).map(PathBuf::from))
            .or(toml.database_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let model_path = cli
            .model
            .clone()
            .or_else(|| env_var(ENV_MODEL_PATH).map(PathBuf::from))
            .or(toml.model_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let log_filter = toml
            .logging
            .filter
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            host,
            port,
            database_path,
            model_path,
            log_filter,
            config_file,
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Find the config file to read.
///
/// An explicitly requested file must exist. Otherwise `./attrition.toml`, then
/// `<config_dir>/attrition/config.toml`; none found means defaults only.
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let requested = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_var(ENV_CONFIG).map(PathBuf::from));

    if let Some(path) = requested {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    if let Some(user_config) = dirs::config_dir().map(|d| d.join("attrition").join("config.toml")) {
        if user_config.exists() {
            return Ok(Some(user_config));
        }
    }

    warn!("No config file found, using defaults");
    Ok(None)
}
