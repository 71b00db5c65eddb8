pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::config::LogSettings;
pub use internal::logger::{
    CallerEncoding, Encoding, LogConfig, LogError, LogManager, Logger, ModeTime, OutputTarget,
    VigilFormat, LOG_FILE_NAME,
};
