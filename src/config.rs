//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::fs;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_NAMING_RULES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub raceclasses: RaceclassesConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub request_timeout_secs: u64,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT verification configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Defaults applied to raceclasses synthesized by generation.
///
/// Read from the JSON file named by `RACECLASSES_CONFIG`; missing keys take
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RaceclassesConfig {
    /// Substitutions turning an ageclass label into a raceclass name, applied in order
    pub naming_rules: Vec<NamingRule>,
    /// Ageclasses in starting priority; unlisted ones follow by age and name
    pub ageclass_order: Vec<String>,
    /// Genders in starting priority among ageclasses of equal rank
    pub gender_order: Vec<String>,
    pub grouping_feature: GroupingFeature,
    /// Ageclasses whose synthesized raceclasses are not ranked
    pub unranked_ageclasses: Vec<String>,
}

/// One substitution of the raceclass naming rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamingRule {
    pub from: String,
    pub to: String,
}

/// How synthesized raceclasses are split into groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingFeature {
    /// One group per age; `Jenter 15 år` and `Gutter 15 år` share a group
    #[default]
    SameAge,
    /// Every synthesized raceclass in one group
    SingleGroup,
}

impl Default for RaceclassesConfig {
    fn default() -> Self {
        Self {
            naming_rules: DEFAULT_NAMING_RULES
                .iter()
                .map(|(from, to)| NamingRule {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
            ageclass_order: Vec::new(),
            gender_order: Vec::new(),
            grouping_feature: GroupingFeature::default(),
            unranked_ageclasses: Vec::new(),
        }
    }
}

impl RaceclassesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match env::var("RACECLASSES_CONFIG") {
            Ok(path) => {
                let content = fs::read_to_string(&path).map_err(|e| ConfigError::File {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                Self::from_json(&content).map_err(|message| ConfigError::File { path, message })
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parse a configuration document
    pub fn from_json(content: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(content).map_err(|e| e.to_string())?;

        if config.naming_rules.iter().any(|rule| rule.from.is_empty()) {
            return Err("naming rules must not have an empty 'from'".to_string());
        }

        Ok(config)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            raceclasses: RaceclassesConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse()?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
        })
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),

    #[error("Invalid configuration file '{path}': {message}")]
    File { path: String, message: String },
}
