//! Process-wide default logger and the package-level logging functions
//!
//! The default is created on first use with debug level, console encoder,
//! standard output and no caller capture. It can be swapped at any time;
//! each package-level call resolves the current default when it runs.

use super::fields::{Fields, Value};
use super::log_level::Level;
use super::logger::Logger;
use super::options::{new_logger, with_caller, with_destinations, with_encoder, with_level};
use super::output_format::Encoder;
use crate::writer::new_stdout_writer;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT_LOGGER: Lazy<RwLock<Arc<dyn Logger>>> =
    Lazy::new(|| RwLock::new(bootstrap_logger()));

fn bootstrap_logger() -> Arc<dyn Logger> {
    new_logger([
        with_level(Level::Debug),
        with_destinations(&[new_stdout_writer()]),
        with_encoder(Encoder::Console),
        with_caller(false),
    ])
}

/// The current default logger
pub fn default_logger() -> Arc<dyn Logger> {
    Arc::clone(&DEFAULT_LOGGER.read())
}

/// Replace the default logger. `None` leaves the current one in place.
///
/// ```
/// use tslog::prelude::*;
/// use std::sync::Arc;
///
/// set_default_logger(Arc::new(NoopLogger) as Arc<dyn Logger>);
/// set_default_logger(None);
/// tslog::infot("discarded", None);
/// ```
pub fn set_default_logger(logger: impl Into<Option<Arc<dyn Logger>>>) {
    if let Some(logger) = logger.into() {
        *DEFAULT_LOGGER.write() = logger;
    }
}

#[track_caller]
pub fn debug(args: &[Value<'_>]) {
    default_logger().debug(args)
}

#[track_caller]
pub fn info(args: &[Value<'_>]) {
    default_logger().info(args)
}

#[track_caller]
pub fn warn(args: &[Value<'_>]) {
    default_logger().warn(args)
}

#[track_caller]
pub fn error(args: &[Value<'_>]) {
    default_logger().error(args)
}

#[track_caller]
pub fn debugf(format: &str, args: &[Value<'_>]) {
    default_logger().debugf(format, args)
}

#[track_caller]
pub fn infof(format: &str, args: &[Value<'_>]) {
    default_logger().infof(format, args)
}

#[track_caller]
pub fn warnf(format: &str, args: &[Value<'_>]) {
    default_logger().warnf(format, args)
}

#[track_caller]
pub fn errorf(format: &str, args: &[Value<'_>]) {
    default_logger().errorf(format, args)
}

#[track_caller]
pub fn debugt(msg: &str, fields: Option<&Fields>) {
    default_logger().debugt(msg, fields)
}

#[track_caller]
pub fn infot(msg: &str, fields: Option<&Fields>) {
    default_logger().infot(msg, fields)
}

#[track_caller]
pub fn warnt(msg: &str, fields: Option<&Fields>) {
    default_logger().warnt(msg, fields)
}

#[track_caller]
pub fn errort(msg: &str, fields: Option<&Fields>) {
    default_logger().errort(msg, fields)
}
