//! Default paths for carlog components
//!
//! Paths are user-writable by default:
//! - Config: `$XDG_CONFIG_HOME/carlog/config.toml` or `~/.config/carlog/config.toml`
//! - Data: `$XDG_DATA_HOME/carlog` or `~/.local/share/carlog`

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const CARLOG_CONFIG_ENV: &str = "CARLOG_CONFIG";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "carlog";

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$CARLOG_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/carlog/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/carlog/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CARLOG_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking the CARLOG_CONFIG env var.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/tmp").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory, where local event-log exports live.
///
/// Order of precedence:
/// 1. `$XDG_DATA_HOME/carlog` (if XDG_DATA_HOME is set)
/// 2. `~/.local/share/carlog` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Default location of the event-log export (JSON) inside the data directory
pub fn default_log_path() -> PathBuf {
    default_data_dir().join("events.json")
}
