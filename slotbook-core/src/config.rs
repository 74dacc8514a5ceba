//! Global slotbook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COLOR;
use crate::error::{SlotbookError, SlotbookResult};
use crate::snapshot::ReconcilePolicy;

static DEFAULT_STORE_PATH: &str = "~/.local/share/slotbook/store.json";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_user() -> String {
    std::env::var("USER").unwrap_or_else(|_| "slotbook".to_string())
}

/// Configuration at ~/.config/slotbook/config.toml, overridable with
/// `SLOTBOOK_*` environment variables (e.g. `SLOTBOOK_STORE_PATH`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlotbookConfig {
    /// JSON document holding the event tree
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Recorded as the creator of new events
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_color")]
    pub default_color: String,

    #[serde(default)]
    pub reconcile: ReconcilePolicy,
}

impl Default for SlotbookConfig {
    fn default() -> Self {
        SlotbookConfig {
            store_path: default_store_path(),
            user: default_user(),
            default_color: default_color(),
            reconcile: ReconcilePolicy::default(),
        }
    }
}

impl SlotbookConfig {
    pub fn config_path() -> SlotbookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SlotbookError::Config("Could not determine config directory".into()))?
            .join("slotbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented-out config there
    /// on first run.
    pub fn load() -> SlotbookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) layered with the environment.
    pub fn load_from(path: &Path) -> SlotbookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SLOTBOOK"))
            .build()
            .map_err(|e| SlotbookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SlotbookError::Config(e.to_string()))
    }

    /// `store_path` with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.store_path.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn save(&self, path: &Path) -> SlotbookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SlotbookError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| SlotbookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SlotbookResult<()> {
        let contents = format!(
            "\
# slotbook configuration

# Where events are stored:
# store_path = \"{}\"

# Name recorded as the creator of new events:
# user = \"reception\"

# Colour of new events:
# default_color = \"{}\"

# trust_snapshot drops events deleted elsewhere when a month is reloaded,
# accumulate keeps them until deleted here:
# reconcile = \"trust_snapshot\"
",
            DEFAULT_STORE_PATH, DEFAULT_COLOR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SlotbookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SlotbookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
