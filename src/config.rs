// SPDX-License-Identifier: MIT
//
// Application configuration for the gencontrast binary.
//
// The file lives at <config dir>/gencontrast/config.toml ($XDG_CONFIG_HOME
// or ~/.config on Linux, Application Support on macOS, %APPDATA% on Windows)
// unless --config points elsewhere. Two tables, both optional:
//
//   [contrast]   defaults for pair/luminance requests (gc_contrast::ContrastConfig)
//   [logging]    level = "warn"

use std::fs;
use std::path::{Path, PathBuf};

use gc_contrast::{ConfigError, ContrastConfig};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "gencontrast";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding the config file, under the platform's config dir.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Standard config file location.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter: error, warn, info, debug, trace, or full directives.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub contrast: ContrastConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;
        config.contrast.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or defaults when no file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
