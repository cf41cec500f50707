use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON file per storage key
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Overrides `ADPATTERNS_API_URL` for the declared endpoint table
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Event poll interval
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_show_splash")]
    pub show_splash: bool,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_show_splash() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: None,
            api_base_url: None,
            tick_rate_ms: default_tick_rate_ms(),
            show_splash: default_show_splash(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".adpatterns"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the user config, falling back to defaults when it is missing or
    /// unreadable
    pub fn load() -> Config {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Config {
        if !path.exists() {
            return Config::default();
        }
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| serde_json::from_str(&contents).map_err(anyhow::Error::from));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Storage directory: configured value or `~/.adpatterns/storage`
    pub fn resolved_storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .or_else(|| Self::config_dir().map(|d| d.join("storage")))
            .unwrap_or_else(|| PathBuf::from(".adpatterns/storage"))
    }
}
