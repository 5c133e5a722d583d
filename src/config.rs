use crate::keymap::Keymap;
use crate::models::Region;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Orphanages service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Initial viewport of the orphanages map (never auto-fitted)
    #[serde(default)]
    pub map: Region,
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Keyboard bindings
    #[serde(default)]
    pub keymap: Keymap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the orphanages service (default: http://localhost:3333)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            map: Region::default(),
            theme: default_theme(),
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or write the defaults there on first run
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            if config.api.base_url.trim().is_empty() {
                config.api.base_url = default_base_url();
            }
            if config.api.timeout_secs == 0 {
                config.api.timeout_secs = default_timeout_secs();
            }
            if !config.map.is_valid() {
                warn!("Invalid [map] region in config {:?}, using the default", config.map);
                config.map = Region::default();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with owner-only permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }
}
