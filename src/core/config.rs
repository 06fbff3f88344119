//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! Every value has a default, so the server also runs with no config file at
//! all: host 0.0.0.0, port 8000, model gpt-4o, 60 second provider timeout,
//! 2 retries, static assets next to the binary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default server port
const DEFAULT_PORT: u16 = 8000;

/// Default provider request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 60;

/// Default retry budget for transient provider failures
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default chat model
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default provider base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
    #[serde(default)]
    pub assets: Option<AssetsConfig>,
}

/// Application configuration, validated at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Chat model identifier sent with every generation request
    pub model: String,

    /// Provider API base URL
    pub base_url: String,

    /// Provider request timeout in seconds
    pub request_timeout: u64,

    /// Retry budget for transient provider failures
    pub max_retries: u32,

    /// Static asset directory, as configured (resolution happens at startup)
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl Config {
    fn from_toml(config: TomlConfig) -> Self {
        let server = config.server.unwrap_or_default();
        let provider = config.provider.unwrap_or_default();
        let assets = config.assets.unwrap_or_default();

        Config {
            host: server.host,
            port: server.port,
            log_level: server.log_level,
            model: provider.model,
            base_url: provider.base_url,
            request_timeout: provider.request_timeout,
            max_retries: provider.max_retries,
            static_dir: assets.static_dir,
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        Ok(Self::from_toml(config))
    }

    /// Load configuration from the environment
    ///
    /// Reads the path from `CONFIG_PATH`, defaulting to `config.toml` in the
    /// current directory. A missing file is not an error: the server has no
    /// required configuration and falls back to built-in defaults. A file
    /// that exists but fails to parse is fatal.
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }
}
