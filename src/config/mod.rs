//! Configuration module
//!
//! TOML-based configuration with environment variable overrides.
//! Priority: CLI args > Environment variables > Config file > Defaults

pub mod app_config;

pub use app_config::AppConfig;

use std::path::PathBuf;

/// Get the XDG config directory for tropematch
///
/// Returns: $XDG_CONFIG_HOME/tropematch or ~/.config/tropematch
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("tropematch")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config").join("tropematch")
    } else {
        PathBuf::from(".config").join("tropematch")
    }
}
