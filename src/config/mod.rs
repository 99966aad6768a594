mod types;

pub use types::*;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variables that override file configuration.
pub mod env {
    pub const HOST: &str = "THUMBFORGE_HOST";
    pub const PORT: &str = "THUMBFORGE_PORT";
    pub const DB_PATH: &str = "DB_PATH";
    pub const SEARCH_QUERY: &str = "SEARCH_QUERY";
    pub const MAX_IMAGES: &str = "MAX_IMAGES";
    pub const SEARCH_URL_TEMPLATE: &str = "SEARCH_URL_TEMPLATE";
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No search query configured: pass --query or set {}", env::SEARCH_QUERY)]
    MissingQuery,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./thumbforge.toml",
        "./config.toml",
        "~/.config/thumbforge/config.toml",
        "/etc/thumbforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts `std::env::var` so overrides can be exercised without
/// touching the process environment. Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get(env::HOST) {
        config.server.host = host;
    }
    if let Some(port) = get(env::PORT) {
        config.server.port = parse_env(env::PORT, &port)?;
    }
    if let Some(path) = get(env::DB_PATH) {
        config.database.path = PathBuf::from(path);
    }
    if let Some(query) = get(env::SEARCH_QUERY) {
        config.scrape.query = Some(query);
    }
    if let Some(max) = get(env::MAX_IMAGES) {
        config.scrape.max_images = parse_env(env::MAX_IMAGES, &max)?;
    }
    if let Some(template) = get(env::SEARCH_URL_TEMPLATE) {
        config.scrape.search_url = template;
    }

    Ok(())
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid("Server port cannot be 0".into()));
    }

    if config.scrape.concurrency == 0 {
        return Err(ConfigError::Invalid(
            "scrape.concurrency must be at least 1".into(),
        ));
    }

    if config.scrape.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "scrape.timeout_secs must be at least 1".into(),
        ));
    }

    if !config.scrape.search_url.contains(QUERY_PLACEHOLDER) {
        return Err(ConfigError::Invalid(format!(
            "scrape.search_url must contain the {} placeholder",
            QUERY_PLACEHOLDER
        )));
    }

    if !config.resize.target().is_valid() {
        return Err(ConfigError::Invalid(format!(
            "resize target {} must have non-zero dimensions",
            config.resize.target()
        )));
    }

    Ok(())
}

impl Config {
    /// Resolve the search query for a run.
    ///
    /// An explicit value (from the command line) wins over the configured one.
    /// Blank queries are treated as missing.
    pub fn require_query(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .or(self.scrape.query.as_deref())
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .ok_or(ConfigError::MissingQuery)
    }
}
