use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thumbforge_common::TargetSize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub resize: ResizeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("thumbforge.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrapeConfig {
    /// Search query. Required by `run`; there is no default.
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Search document URL with a `{query}` placeholder
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of image downloads in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

pub const QUERY_PLACEHOLDER: &str = "{query}";

fn default_max_images() -> usize {
    10
}
fn default_search_url() -> String {
    "https://www.google.com/search?q={query}&tbm=isch".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_concurrency() -> usize {
    8
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            query: None,
            max_images: default_max_images(),
            search_url: default_search_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResizeConfig {
    #[serde(default = "default_dimension")]
    pub width: u32,

    #[serde(default = "default_dimension")]
    pub height: u32,
}

fn default_dimension() -> u32 {
    128
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
        }
    }
}

impl ResizeConfig {
    pub fn target(&self) -> TargetSize {
        TargetSize::new(self.width, self.height)
    }
}
