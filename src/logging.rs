//! `tracing` output routed to the browser console.
//!
//! Events at WARN and above go to `console.warn`, the rest to `console.log`.
//! Off wasm the same lines go to stderr, which keeps test output readable.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(max_level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .with_target(false)
        .without_time()
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(false)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level() <= Level::WARN)
    }
}

/// Buffers one formatted event and emits it when dropped.
pub struct ConsoleWriter {
    buf: Vec<u8>,
    warn: bool,
}

impl ConsoleWriter {
    fn new(warn: bool) -> Self {
        Self {
            buf: Vec::new(),
            warn,
        }
    }

    fn line(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim_end().to_string()
    }
}

impl io::Write for ConsoleWriter {
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
        if line.is_empty() {
            return;
        }
        emit(&line, self.warn);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str, warn: bool) {
    if warn {
        web_sys::console::warn_1(&line.into());
    } else {
        web_sys::console::log_1(&line.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str, _warn: bool) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn writer_collects_one_line() {
        let mut w = ConsoleWriter::new(false);
        w.write_all(b" INFO navigation seq=1\n").unwrap();
        assert_eq!(w.line(), " INFO navigation seq=1");
    }

    #[test]
    fn warn_level_routes_to_warn() {
        let make = ConsoleMakeWriter;
        assert!(!make.make_writer().warn);
    }

    #[test]
    fn init_twice_is_harmless() {
        init(Level::DEBUG);
        init(Level::INFO);
        tracing::info!("logging initialised");
    }
}
