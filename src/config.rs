//! Configuration module for Yatube.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, YatubeError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/yatube.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Session / login configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (must be set).
    #[serde(default)]
    pub session_secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_session_expiry() -> u64 {
    14 * 24 * 60 * 60 // 2 weeks
}

fn default_cookie_name() -> String {
    "yatube_session".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_expiry_secs: default_session_expiry(),
            cookie_name: default_cookie_name(),
        }
    }
}

/// Templates configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TemplatesConfig {
    /// Directory overriding the built-in templates.
    ///
    /// When unset the templates compiled into the binary are used.
    #[serde(default)]
    pub path: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/yatube.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Site information shown in page headers and titles.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Name of the site.
    #[serde(default = "default_site_name")]
    pub name: String,
}

fn default_site_name() -> String {
    "Yatube".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
        }
    }
}

/// A group that must exist once the server has started.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GroupSeed {
    /// Display title.
    pub title: String,
    /// URL slug (unique).
    pub slug: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Templates configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Site information.
    #[serde(default)]
    pub site: SiteConfig,
    /// Groups created at startup if missing.
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(YatubeError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| YatubeError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `YATUBE_SESSION_SECRET`: Override the session signing secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("YATUBE_SESSION_SECRET") {
            if !secret.is_empty() {
                self.auth.session_secret = secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the session secret is not set or a group seed
    /// is missing its slug.
    pub fn validate(&self) -> Result<()> {
        if self.auth.session_secret.is_empty() {
            return Err(YatubeError::Config(
                "session_secret is not set. \
                 Set it in config.toml or via YATUBE_SESSION_SECRET environment variable."
                    .to_string(),
            ));
        }
        if let Some(seed) = self.groups.iter().find(|g| g.slug.trim().is_empty()) {
            return Err(YatubeError::Config(format!(
                "group \"{}\" has an empty slug",
                seed.title
            )));
        }
        Ok(())
    }
}
