pub mod schema;
pub mod watcher;

pub use schema::{LivemonConfig, StreamConfig, ThemeConfig, WindowConfig};
pub use watcher::ConfigWatcher;

use livemon_core::{LivemonError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `LivemonConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<LivemonConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(LivemonConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| LivemonError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<LivemonConfig> {
    let config: LivemonConfig =
        toml::from_str(raw).map_err(|e| LivemonError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &LivemonConfig) -> Result<()> {
    if config.stream.interval_ms == 0 {
        return Err(LivemonError::Config("stream.interval_ms must be greater than 0".into()));
    }
    if config.stream.capacity == 0 {
        return Err(LivemonError::Config("stream.capacity must be greater than 0".into()));
    }
    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("livemon").join("livemon.toml")
}
