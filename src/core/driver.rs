//! Drivers turn [`Options`] into a concrete [`Logger`]

use super::backend::BackendLogger;
use super::logger::Logger;
use super::noop::NoopLogger;
use super::options::Options;
use std::fmt;
use std::sync::Arc;

type Factory = dyn Fn(&Options) -> Arc<dyn Logger> + Send + Sync;

/// Named logger factory.
///
/// ```
/// use tslog::prelude::*;
/// use std::sync::Arc;
///
/// // A driver that ignores its options
/// let silent = Driver::new("silent", |_: &Options| Arc::new(NoopLogger) as Arc<dyn Logger>);
/// assert_eq!(silent.name(), "silent");
/// ```
#[derive(Clone)]
pub struct Driver {
    name: &'static str,
    factory: Arc<Factory>,
}

impl Driver {
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn(&Options) -> Arc<dyn Logger> + Send + Sync + 'static,
    {
        Self {
            name,
            factory: Arc::new(factory),
        }
    }

    /// Emitting driver backed by [`BackendLogger`]
    pub fn backend() -> Self {
        Self::new("backend", backend_driver)
    }

    /// Driver whose loggers discard everything
    pub fn noop() -> Self {
        Self::new("noop", noop_driver)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn create(&self, options: &Options) -> Arc<dyn Logger> {
        (self.factory)(options)
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver").field("name", &self.name).finish()
    }
}

pub fn backend_driver(options: &Options) -> Arc<dyn Logger> {
    Arc::new(BackendLogger::new(options))
}

pub fn noop_driver(_options: &Options) -> Arc<dyn Logger> {
    Arc::new(NoopLogger)
}
