// src/internal/logger/writer.rs

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::fmt::MakeWriter;

use super::error::{LogError, Result};

/// A destination log lines are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl OutputTarget {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    fn open(&self) -> Result<BoxMakeWriter> {
        match self {
            Self::Stdout => Ok(BoxMakeWriter::new(io::stdout)),
            Self::Stderr => Ok(BoxMakeWriter::new(io::stderr)),
            Self::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(LogError::ConfigBuild("empty output path".to_string()));
                }
                let file = open_log_file(path).map_err(|e| {
                    LogError::ConfigBuild(format!("couldn't open sink {}: {}", path.display(), e))
                })?;
                Ok(BoxMakeWriter::new(SharedFileWriter::new(file)))
            }
        }
    }
}

impl FromStr for OutputTarget {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(LogError::ConfigBuild("empty output path".to_string())),
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Open every target and tee them into a single writer
pub(crate) fn make_writer(targets: &[OutputTarget]) -> Result<BoxMakeWriter> {
    let (first, rest) = targets
        .split_first()
        .ok_or_else(|| LogError::ConfigBuild("no output paths configured".to_string()))?;

    rest.iter()
        .try_fold(first.open()?, |acc, target| -> Result<BoxMakeWriter> {
            Ok(BoxMakeWriter::new(acc.and(target.open()?)))
        })
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// File writer shared by every clone handed out to the subscriber
#[derive(Clone)]
pub(crate) struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

impl io::Write for SharedFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
