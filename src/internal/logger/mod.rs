// src/internal/logger/mod.rs

pub mod encoder;
pub mod error;
pub mod logger;
pub mod writer;

pub use encoder::{CallerEncoding, Encoding, ModeTime, VigilFormat};
pub use error::LogError;
pub use logger::{is_debug_tier, LogConfig, LogManager, Logger, LOG_FILE_MODE, LOG_FILE_NAME};
pub use writer::OutputTarget;

// Note: The log_* macros are exported at the crate root via #[macro_export]
// and take the logger as their first argument, e.g. `log_info!(logger, "ready")`.
