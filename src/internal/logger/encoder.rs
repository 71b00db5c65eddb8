// src/internal/logger/encoder.rs

use std::backtrace::Backtrace;
use std::fmt;

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Marker written at the start of every record
pub const RECORD_EMOJI: &str = "\u{1F980}";

/// Marker written in front of a mode label
pub const MODE_EMOJI: &str = "\u{1F4AA}";

pub const APP_NAME: &str = "BharatVigil";

/// Which of the two console encoders renders records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "colorConsole")]
    #[default]
    Color,
    #[serde(rename = "nonColorConsole")]
    NonColor,
}

impl Encoding {
    pub fn from_color(enabled: bool) -> Self {
        if enabled {
            Self::Color
        } else {
            Self::NonColor
        }
    }

    pub fn is_color(self) -> bool {
        self == Self::Color
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "colorConsole",
            Self::NonColor => "nonColorConsole",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the call site of a record is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerEncoding {
    #[default]
    Omit,
    /// `dir/file.rs:line`
    Short,
}

/// Timestamp formatter, optionally prefixed by a mode label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeTime {
    mode: Option<String>,
}

impl ModeTime {
    pub fn plain() -> Self {
        Self { mode: None }
    }

    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
        }
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn render<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let stamp = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        match &self.mode {
            Some(mode) => format!("{} {}({}): {} ", MODE_EMOJI, APP_NAME, mode, stamp),
            None => stamp,
        }
    }
}

impl FormatTime for ModeTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.write_str(&self.render(&Local::now()))
    }
}

/// Console encoder: `<emoji> <level> <timestamp> [caller] <message>`
#[derive(Debug, Clone)]
pub struct VigilFormat {
    encoding: Encoding,
    caller: CallerEncoding,
    stacktrace: bool,
    timer: ModeTime,
}

impl VigilFormat {
    pub fn new(encoding: Encoding, timer: ModeTime) -> Self {
        Self {
            encoding,
            caller: CallerEncoding::Omit,
            stacktrace: false,
            timer,
        }
    }

    pub fn with_caller(mut self, caller: CallerEncoding) -> Self {
        self.caller = caller;
        self
    }

    /// Append a captured backtrace to error records
    pub fn with_stacktrace(mut self, enabled: bool) -> Self {
        self.stacktrace = enabled;
        self
    }

    fn write_level(&self, writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
        let label = level_label(level);
        if !self.encoding.is_color() {
            return writer.write_str(label);
        }

        let colored = match *level {
            Level::TRACE => label.cyan(),
            Level::DEBUG => label.magenta(),
            Level::INFO => label.blue(),
            Level::WARN => label.yellow(),
            Level::ERROR => label.red(),
        };
        write!(writer, "{}", colored)
    }
}

impl<S, N> FormatEvent<S, N> for VigilFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        write!(writer, "{} ", RECORD_EMOJI)?;
        self.write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;
        self.timer.format_time(&mut writer)?;
        writer.write_char(' ')?;

        if self.caller == CallerEncoding::Short {
            if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
                write!(writer, "{} ", short_caller(file, line))?;
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;

        if self.stacktrace && *meta.level() == Level::ERROR {
            write!(writer, "\n{}", Backtrace::force_capture())?;
        }

        writeln!(writer)
    }
}

pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARN",
        Level::ERROR => "ERROR",
    }
}

/// Keep only the last directory and the file name of a source path
pub fn short_caller(file: &str, line: u32) -> String {
    let mut parts = file.rsplit(|c| c == '/' || c == '\\');
    let name = parts.next().unwrap_or(file);
    match parts.next() {
        Some(dir) if !dir.is_empty() => format!("{}/{}:{}", dir, name, line),
        _ => format!("{}:{}", name, line),
    }
}
