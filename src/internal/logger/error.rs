// src/internal/logger/error.rs

use std::io;
use std::path::PathBuf;

/// Errors produced while bootstrapping or rebuilding a logger
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to {action} the log file {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to build config for logger: {0}")]
    ConfigBuild(String),
    #[error("failed to load logger settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("a global logger is already installed")]
    GlobalAlreadySet,
}

impl LogError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
