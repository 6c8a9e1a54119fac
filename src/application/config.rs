use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::Target;

/// Configuration problems that must abort startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no targets configured: the target list is empty after trimming blank entries")]
    NoTargets,
    #[error("poll_interval_secs must be at least 1")]
    ZeroPollInterval,
    #[error("threshold_secs must be a positive, finite number of seconds (got {0})")]
    InvalidThreshold(f64),
    #[error("email is enabled but no recipients are configured")]
    NoRecipients,
    #[error("email is enabled but no SMTP server is configured")]
    NoServer,
}

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Filesystem paths to probe. Blank entries are trimmed at load time.
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub email: EmailConfig,
}

/// Polling cadence and slowness threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_threshold")]
    pub threshold_secs: f64,
}

/// Email alert channel: recipients, SMTP relay, credentials, cooldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default, rename = "from")]
    pub from_address: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// `true` opens an implicit-TLS (SMTPS) connection; `false` starts in
    /// plaintext and upgrades via STARTTLS when the relay offers it.
    #[serde(default)]
    pub is_ssl: bool,
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
}

// --- Defaults ---

const fn default_poll_interval() -> u64 {
    1
}

const fn default_threshold() -> f64 {
    0.25
}

const fn default_smtp_port() -> u16 {
    587
}

const fn default_cooldown_minutes() -> u64 {
    30
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            threshold_secs: default_threshold(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            to: Vec::new(),
            from_address: String::new(),
            signature: String::new(),
            server: String::new(),
            port: default_smtp_port(),
            user: String::new(),
            password: String::new(),
            is_ssl: false,
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from the default path or create a default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// invalid, or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is
    /// invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, serialization
    /// fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("pathpulse").join("config.toml"))
    }

    /// Validate the loaded configuration, failing fast on anything that would
    /// leave the daemon silently useless.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found: empty target list, zero poll
    /// interval, non-positive threshold, or an enabled email channel with no
    /// recipients or server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trimmed_targets().is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.general.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        let threshold = self.general.threshold_secs;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        if self.email.enabled {
            if self.email.to.iter().all(|r| r.trim().is_empty()) {
                return Err(ConfigError::NoRecipients);
            }
            if self.email.server.trim().is_empty() {
                return Err(ConfigError::NoServer);
            }
        }
        Ok(())
    }

    /// Target list with blank entries trimmed out.
    #[must_use]
    pub fn trimmed_targets(&self) -> Vec<Target> {
        self.targets
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Target::new)
            .collect()
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.general.poll_interval_secs)
    }

    #[must_use]
    pub fn threshold(&self) -> Duration {
        Duration::from_secs_f64(self.general.threshold_secs)
    }

    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_secs(self.email.cooldown_minutes * 60)
    }
}
