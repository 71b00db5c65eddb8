// src/internal/config/config.rs

use std::path::Path;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::internal::logger::{LogError, OutputTarget, LOG_FILE_NAME};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings file looked up in the working directory when no path is given
pub const DEFAULT_SETTINGS_NAME: &str = "vigil-log";

/// Get version information
pub fn get_version_info() -> String {
    format!("vigil-log version {}", VERSION)
}

/// File-backed logger settings. Defaults match `LogManager::initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Also write to stdout
    #[serde(default = "default_true")]
    pub console: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_file_name() -> String {
    LOG_FILE_NAME.to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            color: default_true(),
            file_name: default_file_name(),
            console: default_true(),
        }
    }
}

impl LogSettings {
    /// Load settings from `path`, or from an optional `vigil-log.*` file in
    /// the working directory. An explicit path must exist.
    pub fn load(path: Option<&str>) -> Result<Self, LogError> {
        let source = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_NAME).required(false),
        };

        let config = Config::builder()
            .set_default("level", "info")?
            .set_default("color", true)?
            .set_default("file_name", LOG_FILE_NAME)?
            .set_default("console", true)?
            .add_source(source)
            .build()?;

        let settings: LogSettings = config.try_deserialize()?;
        if settings.file_name.trim().is_empty() {
            return Err(ConfigError::Message("file_name must not be empty".to_string()).into());
        }

        Ok(settings)
    }

    /// Destinations in write order, with the log file rooted at `dir`
    pub fn outputs(&self, dir: &Path) -> Vec<OutputTarget> {
        let mut outputs = Vec::with_capacity(2);
        if self.console {
            outputs.push(OutputTarget::Stdout);
        }
        outputs.push(OutputTarget::file(dir.join(&self.file_name)));
        outputs
    }
}
