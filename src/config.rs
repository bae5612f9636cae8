//! Configuration management.
//!
//! Environment-level defaults for the CLI, loadable from a TOML file
//! and `ARXIV_HARVEST_`-prefixed environment variables. Command-line
//! flags always take precedence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default directory for downloaded files
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Default per-request chunk size
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Default courtesy delay between API calls, in seconds
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Default worker pool size for per-batch downloads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            chunk_size: default_chunk_size(),
            delay_secs: default_delay_secs(),
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_save_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_chunk_size() -> usize {
    100
}

fn default_delay_secs() -> u64 {
    3
}

fn default_workers() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    30
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &PathBuf) -> Result<AppConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("ARXIV_HARVEST"))
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from environment variables alone
pub fn load_env_config() -> Result<AppConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("ARXIV_HARVEST"))
        .build()?;

    settings.try_deserialize()
}

/// Locate a configuration file in the default locations
///
/// Probes `./arxiv-harvest.toml`, then the platform config directory
/// (`~/.config/arxiv-harvest/config.toml` on Linux).
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("arxiv-harvest.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("arxiv-harvest").join("config.toml"))
        .filter(|path| path.is_file())
}
