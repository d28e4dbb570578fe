//! Emitting logger: severity gate, encoder and destination fan-out

use super::error::{LoggerError, Result};
use super::fields::{Fields, Value};
use super::log_entry::Record;
use super::log_level::Level;
use super::logger::Logger;
use super::metrics::LoggerMetrics;
use super::options::Options;
use super::output_format::Encoder;
use super::printf::{sprint, sprintf};
use crate::writer::{new_stdout_writer, Destination};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};

const CLOSED_MESSAGE: &str = "tslog: backend logger has been closed";

struct Core {
    encoder: Encoder,
    destinations: Vec<Destination>,
    caller: bool,
}

/// Logger produced by the backend driver.
///
/// Records below the gate are dropped before any formatting. Each record is
/// encoded once and written to every destination with a single locked write.
/// After [`close`](Logger::close) any logging call panics.
pub struct BackendLogger {
    core: RwLock<Option<Core>>,
    gate: AtomicU8,
    metrics: LoggerMetrics,
}

impl BackendLogger {
    /// An unrecognised encoder name selects JSON; an empty destination list
    /// selects standard output.
    pub fn new(options: &Options) -> Self {
        let encoder = Encoder::parse(options.encoder()).unwrap_or_default();

        let destinations = if options.destinations().is_empty() {
            vec![new_stdout_writer()]
        } else {
            options.destinations().to_vec()
        };

        Self {
            core: RwLock::new(Some(Core {
                encoder,
                destinations,
                caller: options.caller(),
            })),
            gate: AtomicU8::new(options.level() as u8),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Change the gate at runtime
    pub fn set_level(&self, level: Level) {
        self.gate.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::try_from(self.gate.load(Ordering::Relaxed)).unwrap_or(Level::None)
    }

    /// True if a record at `level` passes the gate. A `None` gate passes nothing.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        let gate = self.gate.load(Ordering::Relaxed);
        gate != Level::None as u8 && level as u8 >= gate
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Destinations records are written to, after the stdout fallback.
    /// Panics if the logger has been closed.
    pub fn destinations(&self) -> Vec<Destination> {
        self.core().destinations.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.core.read().is_none()
    }

    /// Flush every destination
    pub fn flush(&self) -> Result<()> {
        let core = self.core();
        flush_all(&core.destinations)
    }

    fn core(&self) -> MappedRwLockReadGuard<'_, Core> {
        match RwLockReadGuard::try_map(self.core.read(), Option::as_ref) {
            Ok(core) => core,
            Err(_) => panic!("{}", CLOSED_MESSAGE),
        }
    }

    /// The message is rendered before the core lock is taken, so operand
    /// `Display` impls may log through this logger.
    #[track_caller]
    fn log<'m, F>(&self, level: Level, render: F, fields: Option<&Fields>)
    where
        F: FnOnce() -> Cow<'m, str>,
    {
        if self.is_closed() {
            panic!("{}", CLOSED_MESSAGE);
        }
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let message = render();
        let mut record = Record::new(level, &message).with_fields(fields);
        if level >= Level::Error {
            record = record.with_stacktrace(Backtrace::force_capture().to_string());
        }

        let core = self.core();
        if core.caller {
            record = record.with_caller(Location::caller());
        }

        let mut buf = Vec::with_capacity(256);
        if let Err(e) = core.encoder.encode(&record, &mut buf) {
            eprintln!("[tslog ERROR] Failed to encode record: {}", e);
            self.metrics.record_write_error();
            return;
        }

        let mut failed = false;
        for destination in &core.destinations {
            if let Err(e) = destination.write_record(&buf) {
                eprintln!(
                    "[tslog ERROR] Failed to write to destination '{}': {}",
                    destination.name(),
                    e
                );
                failed = true;
            }
        }

        if failed {
            self.metrics.record_write_error();
        } else {
            self.metrics.record_written();
        }
    }
}

fn flush_all(destinations: &[Destination]) -> Result<()> {
    let mut first_error = None;
    for destination in destinations {
        if let Err(e) = destination.flush() {
            eprintln!(
                "[tslog WARN] Failed to flush destination '{}': {}",
                destination.name(),
                e
            );
            first_error.get_or_insert_with(|| {
                LoggerError::io_operation(
                    "flushing destination",
                    destination.name().to_string(),
                    e,
                )
            });
        }
    }
    first_error.map_or(Ok(()), Err)
}

impl Logger for BackendLogger {
    fn debug(&self, args: &[Value<'_>]) {
        self.log(Level::Debug, || Cow::Owned(sprint(args)), None);
    }

    fn info(&self, args: &[Value<'_>]) {
        self.log(Level::Info, || Cow::Owned(sprint(args)), None);
    }

    fn warn(&self, args: &[Value<'_>]) {
        self.log(Level::Warn, || Cow::Owned(sprint(args)), None);
    }

    fn error(&self, args: &[Value<'_>]) {
        self.log(Level::Error, || Cow::Owned(sprint(args)), None);
    }

    fn debugf(&self, format: &str, args: &[Value<'_>]) {
        self.log(Level::Debug, || Cow::Owned(sprintf(format, args)), None);
    }

    fn infof(&self, format: &str, args: &[Value<'_>]) {
        self.log(Level::Info, || Cow::Owned(sprintf(format, args)), None);
    }

    fn warnf(&self, format: &str, args: &[Value<'_>]) {
        self.log(Level::Warn, || Cow::Owned(sprintf(format, args)), None);
    }

    fn errorf(&self, format: &str, args: &[Value<'_>]) {
        self.log(Level::Error, || Cow::Owned(sprintf(format, args)), None);
    }

    fn debugt(&self, msg: &str, fields: Option<&Fields>) {
        self.log(Level::Debug, || Cow::Borrowed(msg), fields);
    }

    fn infot(&self, msg: &str, fields: Option<&Fields>) {
        self.log(Level::Info, || Cow::Borrowed(msg), fields);
    }

    fn warnt(&self, msg: &str, fields: Option<&Fields>) {
        self.log(Level::Warn, || Cow::Borrowed(msg), fields);
    }

    fn errort(&self, msg: &str, fields: Option<&Fields>) {
        self.log(Level::Error, || Cow::Borrowed(msg), fields);
    }

    /// Flush all destinations and mark the logger closed. Later calls are no-ops.
    fn close(&self) -> Result<()> {
        let core = self.core.write().take();
        match core {
            Some(core) => flush_all(&core.destinations),
            None => Ok(()),
        }
    }
}

impl Drop for BackendLogger {
    fn drop(&mut self) {
        if let Some(core) = self.core.get_mut().as_ref() {
            let _ = flush_all(&core.destinations);
        }
    }
}
