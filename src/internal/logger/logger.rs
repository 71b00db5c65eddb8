// src/internal/logger/logger.rs

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{Dispatch, Level};

use super::encoder::{CallerEncoding, Encoding, ModeTime, VigilFormat};
use super::error::{LogError, Result};
use super::writer::{make_writer, OutputTarget};
use crate::internal::config::LogSettings;

/// Name of the log file created next to the process
pub const LOG_FILE_NAME: &str = "BharatVigil-logs.txt";

/// Permission bits forced onto the log file
pub const LOG_FILE_MODE: u32 = 0o777;

/// Prefix for bootstrap messages written before any logger exists
const BOOTSTRAP_TAG: &str = "\u{1F980} GoCrab";

/// Everything needed to build a logger. Loggers copy it at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub encoding: Encoding,
    pub level: Level,
    pub disable_stacktrace: bool,
    pub caller: CallerEncoding,
    pub outputs: Vec<OutputTarget>,
    pub time: ModeTime,
}

impl LogConfig {
    /// Color console, info level, no stacktraces, no caller, stdout plus `log_file`
    pub fn defaults(log_file: impl Into<PathBuf>) -> Self {
        Self {
            encoding: Encoding::Color,
            level: Level::INFO,
            disable_stacktrace: true,
            caller: CallerEncoding::Omit,
            outputs: vec![OutputTarget::Stdout, OutputTarget::file(log_file)],
            time: ModeTime::plain(),
        }
    }

    /// Debug and trace turn on stacktraces and short callers, anything
    /// quieter turns both off.
    fn apply_level(&mut self, level: Level) {
        self.level = level;
        if is_debug_tier(level) {
            self.disable_stacktrace = false;
            self.caller = CallerEncoding::Short;
        } else {
            self.disable_stacktrace = true;
            self.caller = CallerEncoding::Omit;
        }
    }

    pub fn build(&self) -> Result<Logger> {
        let writer = make_writer(&self.outputs)?;
        let format = VigilFormat::new(self.encoding, self.time.clone())
            .with_caller(self.caller)
            .with_stacktrace(!self.disable_stacktrace);

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_ansi(self.encoding.is_color())
            .with_writer(writer)
            .event_format(format)
            .finish();

        Ok(Logger {
            dispatch: Dispatch::new(subscriber),
            config: self.clone(),
        })
    }
}

pub fn is_debug_tier(level: Level) -> bool {
    level == Level::DEBUG || level == Level::TRACE
}

/// A ready-to-use logger. Reflects the configuration it was built from,
/// regardless of what the manager does afterwards.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    config: LogConfig,
}

impl Logger {
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the thread's default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this logger the process-wide default. Only the first call in a
    /// process succeeds.
    pub fn install_global(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LogError::GlobalAlreadySet)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("config", &self.config).finish()
    }
}

/// Owns the shared logger configuration and hands out loggers built from it.
///
/// `set_level` and `set_color_encoding` change the shared configuration.
/// `set_mode_label` does not: it builds a one-off logger from a copy, and
/// later loggers go back to plain timestamps.
#[derive(Debug)]
pub struct LogManager {
    config: LogConfig,
    log_file: PathBuf,
}

impl LogManager {
    /// Bootstrap in the working directory with default settings
    pub fn initialize() -> Result<(Self, Logger)> {
        Self::initialize_in(".")
    }

    /// Bootstrap with default settings, placing the log file in `dir`
    pub fn initialize_in(dir: impl AsRef<Path>) -> Result<(Self, Logger)> {
        Self::from_settings(dir, &LogSettings::default())
    }

    pub fn from_settings(dir: impl AsRef<Path>, settings: &LogSettings) -> Result<(Self, Logger)> {
        let dir = dir.as_ref();
        let level = parse_level(&settings.level)?;
        if settings.file_name.trim().is_empty() {
            return Err(LogError::ConfigBuild("empty log file name".to_string()));
        }
        let log_file = dir.join(&settings.file_name);

        ensure_log_file(&log_file)?;

        let mut config = LogConfig::defaults(&log_file);
        config.encoding = Encoding::from_color(settings.color);
        config.outputs = settings.outputs(dir);
        config.apply_level(level);

        let logger = config.build()?;
        Ok((Self { config, log_file }, logger))
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Build a logger from the current configuration without changing it
    pub fn build(&self) -> Result<Logger> {
        self.config.build()
    }

    pub fn set_level(&mut self, level: Level) -> Result<Logger> {
        self.config.apply_level(level);
        self.config.build()
    }

    /// Logger whose timestamps read `💪 BharatVigil(<mode>): <RFC3339> `.
    /// The shared configuration is left untouched.
    pub fn set_mode_label(&self, mode: &str) -> Result<Logger> {
        let mut snapshot = self.config.clone();
        snapshot.time = ModeTime::with_mode(mode);
        snapshot.build()
    }

    pub fn set_color_encoding(&mut self, enabled: bool) -> Result<Logger> {
        self.config.encoding = Encoding::from_color(enabled);
        self.config.build()
    }
}

fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|e| LogError::ConfigBuild(format!("invalid level {:?}: {}", level, e)))
}

/// Create the log file if missing and force its permission bits. Fails
/// without touching permissions when the path is not a regular file.
fn ensure_log_file(path: &Path) -> Result<()> {
    if let Err(e) = fs::metadata(path) {
        if e.kind() != io::ErrorKind::NotFound {
            eprintln!("{} failed to get the log file info: {}", BOOTSTRAP_TAG, e);
            return Err(LogError::io("inspect", path, e));
        }
        File::create(path).map_err(|e| LogError::io("create", path, e))?;
    }

    let metadata = fs::metadata(path).map_err(|e| {
        eprintln!("{} failed to get the log file info: {}", BOOTSTRAP_TAG, e);
        LogError::io("inspect", path, e)
    })?;

    // Never chmod a directory or anything else that isn't the log file
    if !metadata.is_file() {
        return Err(LogError::io(
            "inspect",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    enforce_mode(path, &metadata)
}

#[cfg(unix)]
fn enforce_mode(path: &Path, metadata: &fs::Metadata) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if metadata.permissions().mode() & 0o777 == LOG_FILE_MODE {
        return Ok(());
    }

    fs::set_permissions(path, fs::Permissions::from_mode(LOG_FILE_MODE)).map_err(|e| {
        eprintln!(
            "{} failed to set the log file permission to {:o}: {}",
            BOOTSTRAP_TAG, LOG_FILE_MODE, e
        );
        LogError::io("set permissions on", path, e)
    })
}

#[cfg(not(unix))]
fn enforce_mode(_path: &Path, _metadata: &fs::Metadata) -> Result<()> {
    Ok(())
}

// Convenience logging macros, each taking the logger to emit through
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.in_scope(|| ::tracing::debug!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.in_scope(|| ::tracing::info!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.in_scope(|| ::tracing::warn!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.in_scope(|| ::tracing::error!($($arg)*))
    };
}
