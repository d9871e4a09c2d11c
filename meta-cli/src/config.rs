//! Configuration management for storemeta.
//!
//! Settings live in `config.toml` inside the data directory. Every key is
//! optional; a missing file is the same as an empty one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use storemeta_client::translate::{DEFAULT_TRANSLATION_MODEL, DEFAULT_TRANSLATION_URL};
use storemeta_client::{DEFAULT_BASE_URL, DEFAULT_LOAD_TIMEOUT, DEFAULT_MAX_IN_FLIGHT};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Metadata API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Translation service settings.
    #[serde(default)]
    pub translation: TranslationConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline for loading a version's localizations, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Submissions allowed in flight at once.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_LOAD_TIMEOUT.as_secs()
}

fn default_max_in_flight() -> usize {
    DEFAULT_MAX_IN_FLIGHT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl ApiConfig {
    /// The load deadline as a duration. Zero is bumped to one second.
    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// `[translation]` section. Only read when a translator is built.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationConfig {
    /// API key for the translation service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat-completions endpoint.
    #[serde(default = "default_translation_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_translation_model")]
    pub model: String,
    /// Use the built-in mock translator.
    #[serde(default)]
    pub use_mock: bool,
}

fn default_translation_url() -> String {
    DEFAULT_TRANSLATION_URL.to_string()
}

fn default_translation_model() -> String {
    DEFAULT_TRANSLATION_MODEL.to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_translation_url(),
            model: default_translation_model(),
            use_mock: false,
        }
    }
}

impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("use_mock", &self.use_mock)
            .finish()
    }
}

impl Config {
    /// Load configuration from a directory, falling back to defaults when
    /// the file does not exist.
    pub async fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        toml::from_str(&contents).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Save configuration to a directory.
    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let contents = toml::to_string_pretty(self).context("Failed to encode configuration")?;
        tokio::fs::write(&path, contents)
            .await
            .context("Failed to save configuration")?;
        set_file_permissions_0600(&path).await?;
        Ok(())
    }
}

/// Set file permissions to 0600 (owner read/write only) on Unix.
/// No-op on non-Unix platforms.
async fn set_file_permissions_0600(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .context("Failed to set file permissions")?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Set directory permissions to 0700 (owner only) on Unix.
/// No-op on non-Unix platforms.
pub async fn set_dir_permissions_0700(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
            .await
            .context("Failed to set directory permissions")?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
