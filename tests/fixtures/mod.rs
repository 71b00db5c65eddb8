//! Test fixtures for logger output capture

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use vigil_log::VigilFormat;

/// In-memory writer collecting everything a subscriber writes
#[derive(Clone, Default)]
pub struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a subscriber using `format` and return what it wrote
pub fn capture(format: VigilFormat, level: Level, f: impl FnOnce()) -> String {
    let writer = BufferWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(writer.clone())
        .event_format(format)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    writer.contents()
}

pub fn read_log(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read log file")
}
