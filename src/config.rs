use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;
use tracing::{info, warn};

/// Configuration for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Maximum number of cards returned by a due-queue fetch when the
    /// caller does not pass an explicit limit
    pub due_limit: i64,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the default due-queue limit
    #[serde(default)]
    pub due_limit: Option<i64>,
}

/// Default due-queue truncation when no limit is configured or supplied
pub const DEFAULT_DUE_LIMIT: i64 = 20;

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            due_limit: update.due_limit.unwrap_or(self.due_limit),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config(data_dir: Option<PathBuf>) -> Config {
    let database_url = data_dir.map_or("engram.db".to_string(), |path| {
        path.join("engram.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        due_limit: DEFAULT_DUE_LIMIT,
    }
}

/// Returns the default config file path for this platform, if one can
/// be determined
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "engram").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads configuration overrides from a TOML file
///
/// A missing file is not an error: it yields an empty update so the base
/// configuration applies unchanged.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

#[cfg(test)]
mod tests;
