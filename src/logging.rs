//! Console Logging
//!
//! Routes `tracing` output to the browser console. Each formatted event is
//! buffered and emitted as one `console` call when the writer is dropped.

use std::io::{self, Write};
use std::str::FromStr;

use tracing::Level;

/// Buffers one formatted event
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
    level: Option<Level>,
}

impl ConsoleWriter {
    fn for_level(level: Level) -> Self {
        Self { buf: Vec::new(), level: Some(level) }
    }

    fn line(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim_end().to_string()
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = self.line();
        if line.is_empty() || !cfg!(target_arch = "wasm32") {
            return;
        }
        let msg = wasm_bindgen::JsValue::from_str(&line);
        match self.level {
            Some(Level::ERROR) => web_sys::console::error_1(&msg),
            Some(Level::WARN) => web_sys::console::warn_1(&msg),
            Some(Level::DEBUG) | Some(Level::TRACE) => web_sys::console::debug_1(&msg),
            _ => web_sys::console::log_1(&msg),
        }
    }
}

struct MakeConsoleWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter::for_level(*meta.level())
    }
}

/// Parse a level name; unknown names fall back to `info`
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::INFO)
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: &str) {
    let result = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
