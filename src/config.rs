use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "OPERATOR_TUI_DATA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding operators.json and the other data tables
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Initial state of the "Guide available" checkbox
    #[serde(default = "default_true")]
    pub show_only_guide_available: bool,
    /// Whether class/branch description cards start expanded
    #[serde(default = "default_true")]
    pub show_class_descriptions: bool,
    /// tracing filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Data dir from the environment; never written back to disk
    #[serde(skip)]
    pub data_dir_override: Option<String>,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            show_only_guide_available: true,
            show_class_descriptions: true,
            log_filter: default_log_filter(),
            data_dir_override: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".operator-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(config_path: &Path) -> Option<Config> {
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Saved config, or defaults; the data dir env override applies to both
    pub fn load_or_default() -> Config {
        Self::load().unwrap_or_default().with_env_override()
    }

    fn with_env_override(mut self) -> Config {
        self.data_dir_override = env::var(DATA_DIR_ENV).ok().filter(|dir| !dir.is_empty());
        self
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(self.data_dir_override.as_deref().unwrap_or(&self.data_dir))
    }

    /// Where exports and the log file go; falls back to the working directory
    pub fn output_dir() -> PathBuf {
        Self::config_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        self.save_to(&config_path)
    }

    fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "data_dir": "/srv/ak-data" }"#).unwrap();
        assert_eq!(config.data_dir, "/srv/ak-data");
        assert!(config.show_only_guide_available);
        assert!(config.show_class_descriptions);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            show_only_guide_available: false,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }

    #[test]
    fn test_env_data_dir_is_not_saved() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        env::set_var(DATA_DIR_ENV, "/tmp/one-off-data");
        let config = Config::load_from(&path).unwrap_or_default().with_env_override();
        assert_eq!(config.data_path(), PathBuf::from("/tmp/one-off-data"));
        config.save_to(&path).unwrap();
        env::remove_var(DATA_DIR_ENV);

        let reloaded = Config::load_from(&path).unwrap().with_env_override();
        assert_eq!(reloaded.data_dir, "data");
        assert_eq!(reloaded.data_path(), PathBuf::from("data"));
    }
}
