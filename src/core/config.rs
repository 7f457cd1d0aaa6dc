use crate::core::rate::CurrencyPair;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable that overrides `providers.moonpay.api_key`.
pub const API_KEY_ENV: &str = "MOONRATE_API_KEY";

const DEFAULT_MOONPAY_URL: &str = "https://api.moonpay.io";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_moonpay_url() -> String {
    DEFAULT_MOONPAY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Deserialize, Serialize, Clone)]
pub struct MoonPayProviderConfig {
    #[serde(default = "default_moonpay_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MoonPayProviderConfig {
    fn default() -> Self {
        MoonPayProviderConfig {
            base_url: default_moonpay_url(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the key out of `{config:#?}` style log lines.
impl std::fmt::Debug for MoonPayProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoonPayProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MoonPayProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key to send, preferring the environment over the file.
    pub fn resolved_api_key(&self) -> String {
        resolve_api_key(&self.api_key, std::env::var(API_KEY_ENV).ok())
    }
}

fn resolve_api_key(configured: &str, from_env: Option<String>) -> String {
    from_env
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub moonpay: MoonPayProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub pair: CurrencyPair,
    pub logo_path: Option<String>,
    /// Directory of the file this config was read from.
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "moonrate", "moonrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.config_dir = path.parent().map(|p| p.to_path_buf());
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Resolves `logo_path`; relative paths are taken from the config file's directory.
    pub fn logo_file(&self) -> Option<PathBuf> {
        let logo = PathBuf::from(self.logo_path.as_ref()?);
        if logo.is_absolute() {
            return Some(logo);
        }
        match &self.config_dir {
            Some(dir) => Some(dir.join(logo)),
            None => Some(logo),
        }
    }
}
