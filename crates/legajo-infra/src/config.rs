//! Config file loading.
//!
//! `LegajoConfig` lives at `~/.legajo/config.toml`. An absent file yields
//! the defaults; a present but malformed file is an error rather than a
//! silent fallback.

use std::path::{Path, PathBuf};

use legajo_types::config::LegajoConfig;
use legajo_types::error::ConfigError;

/// Default config file location, if a home directory can be resolved.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".legajo").join("config.toml"))
}

/// Load configuration from the default location.
pub fn load() -> Result<LegajoConfig, ConfigError> {
    match default_config_path() {
        Some(path) => load_from(&path),
        None => Ok(LegajoConfig::default()),
    }
}

/// Load configuration from an explicit path. A missing file is not an
/// error; it yields the defaults.
pub fn load_from(path: &Path) -> Result<LegajoConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(LegajoConfig::default());
        }
        Err(err) => return Err(ConfigError::Read(err.to_string())),
    };

    toml::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))
}
