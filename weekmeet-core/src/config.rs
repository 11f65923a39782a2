//! Global weekmeet configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{WeekmeetError, WeekmeetResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/weekmeet";
static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4180";

/// Port the server binds when none is configured.
pub const DEFAULT_PORT: u16 = 4180;

/// How often watching clients re-fetch, unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Which blob backend a server uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Redis,
    #[default]
    File,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Global configuration at ~/.config/weekmeet/config.toml
///
/// One file serves both binaries: the server reads the backend settings
/// and port, the CLI reads server_url and poll_interval_ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekmeetConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Connection URL, required when backend = "redis".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis_url: Option<String>,

    /// Blob directory used when backend = "file".
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WeekmeetConfig {
    fn default() -> Self {
        WeekmeetConfig {
            backend: StoreBackend::default(),
            redis_url: None,
            data_dir: default_data_dir(),
            port: default_port(),
            server_url: default_server_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WeekmeetConfig {
    pub fn config_path() -> WeekmeetResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WeekmeetError::Config("Could not determine config directory".into()))?
            .join("weekmeet");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/weekmeet/config.toml, seeding a commented default
    /// file on first run. Missing keys fall back to defaults.
    pub fn load() -> WeekmeetResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path instead of the user config directory.
    pub fn load_from(path: &Path) -> WeekmeetResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| WeekmeetError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| WeekmeetError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> WeekmeetResult<()> {
        let contents = format!(
            "\
# weekmeet configuration

# Where availability data lives. \"file\" needs no extra infrastructure,
# \"redis\" lets several servers share one store, \"memory\" is throwaway.
# backend = \"file\"

# redis_url = \"redis://127.0.0.1:6379\"

# data_dir = \"{DEFAULT_DATA_DIR}\"

# Port the server binds on localhost:
# port = {DEFAULT_PORT}

# Where the CLI finds the server:
# server_url = \"{DEFAULT_SERVER_URL}\"

# How often `weekmeet watch` re-fetches, in milliseconds:
# poll_interval_ms = {DEFAULT_POLL_INTERVAL_MS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeekmeetError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| WeekmeetError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// data_dir with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).into_owned())
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
