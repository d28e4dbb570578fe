//! Logger configuration
//!
//! An [`Options`] record starts from [`Options::default`] and is mutated by
//! an ordered list of option functions. If the result does not validate, the
//! whole record is replaced with the defaults, so logger construction never
//! fails.

use super::driver::Driver;
use super::error::{LoggerError, Result};
use super::log_level::Level;
use super::logger::Logger;
use super::output_format::Encoder;
use crate::writer::Destination;
use std::sync::Arc;

/// A single configuration step applied to [`Options`]
pub type FuncOption = Box<dyn FnOnce(&mut Options) + Send>;

/// Configuration consumed by a [`Driver`]
#[derive(Debug, Clone)]
pub struct Options {
    level: Level,
    destinations: Vec<Destination>,
    encoder: String,
    caller: bool,
    driver: Option<Driver>,
}

impl Default for Options {
    /// Debug level, JSON encoder, caller off, backend driver, no destinations
    fn default() -> Self {
        Self {
            level: Level::Debug,
            destinations: Vec::new(),
            encoder: Encoder::Json.as_str().to_string(),
            caller: false,
            driver: Some(Driver::backend()),
        }
    }
}

impl Options {
    /// Apply `options` in order to the defaults, skipping `None` entries.
    ///
    /// Falls back to [`Options::default`] as a whole when the result fails
    /// [`validate`](Options::validate).
    ///
    /// ```
    /// use tslog::prelude::*;
    /// use tslog::writer::MemoryWriter;
    ///
    /// let memory = MemoryWriter::new();
    /// let options = Options::build([
    ///     Some(with_level(Level::Warn)),
    ///     None,
    ///     Some(with_destinations(&[memory.destination()])),
    /// ]);
    /// assert_eq!(options.level(), Level::Warn);
    ///
    /// // No destinations: invalid, so every setting reverts
    /// let options = Options::build([with_level(Level::Warn)]);
    /// assert_eq!(options.level(), Level::Debug);
    /// ```
    pub fn build<I>(options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<FuncOption>>,
    {
        let mut built = Self::default();
        for option in options.into_iter().filter_map(Into::into) {
            option(&mut built);
        }

        match built.validate() {
            Ok(()) => built,
            Err(_) => Self::default(),
        }
    }

    /// A driver is set, the encoder name is recognised and there is at
    /// least one destination.
    pub fn validate(&self) -> Result<()> {
        if self.driver.is_none() {
            return Err(LoggerError::config("Options", "driver cannot be unset"));
        }
        if Encoder::parse(&self.encoder).is_none() {
            return Err(LoggerError::config(
                "Options",
                format!(
                    "encoder must be either {:?} or {:?}, got {:?}",
                    Encoder::Json.as_str(),
                    Encoder::Console.as_str(),
                    self.encoder
                ),
            ));
        }
        if self.destinations.is_empty() {
            return Err(LoggerError::config(
                "Options",
                "at least one destination must be specified",
            ));
        }
        Ok(())
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Encoder name as configured, which may be unrecognised
    pub fn encoder(&self) -> &str {
        &self.encoder
    }

    pub fn caller(&self) -> bool {
        self.caller
    }

    pub fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    /// Build a logger with the configured driver (the backend one if unset)
    pub fn create_logger(&self) -> Arc<dyn Logger> {
        match self.driver {
            Some(ref driver) => driver.create(self),
            None => Driver::backend().create(self),
        }
    }
}

/// Minimum level emitted
pub fn with_level(level: Level) -> FuncOption {
    Box::new(move |options: &mut Options| options.level = level)
}

/// Replace the destination list with a copy of `destinations`
pub fn with_destinations(destinations: &[Destination]) -> FuncOption {
    let destinations = destinations.to_vec();
    Box::new(move |options: &mut Options| options.destinations = destinations)
}

/// Record the `file:line` of each call site
pub fn with_caller(caller: bool) -> FuncOption {
    Box::new(move |options: &mut Options| options.caller = caller)
}

/// Encoder by name: `"json"` or `"console"`, or an [`Encoder`] value
pub fn with_encoder(encoder: impl AsRef<str>) -> FuncOption {
    let encoder = encoder.as_ref().to_string();
    Box::new(move |options: &mut Options| options.encoder = encoder)
}

/// Driver used to build the logger; `None` makes the options invalid
pub fn with_driver(driver: impl Into<Option<Driver>>) -> FuncOption {
    let driver = driver.into();
    Box::new(move |options: &mut Options| options.driver = driver)
}

/// Build a logger from option functions.
///
/// Never fails: invalid options fall back to the defaults, which log JSON to
/// standard output at debug level.
///
/// ```
/// use tslog::prelude::*;
/// use tslog::writer::MemoryWriter;
///
/// let memory = MemoryWriter::new();
/// let logger = new_logger([
///     with_level(Level::Info),
///     with_encoder(Encoder::Console),
///     with_destinations(&[memory.destination()]),
/// ]);
/// logger.debugt("dropped", None);
/// logger.infot("kept", None);
///
/// assert_eq!(memory.lines().len(), 1);
/// ```
pub fn new_logger<I>(options: I) -> Arc<dyn Logger>
where
    I: IntoIterator,
    I::Item: Into<Option<FuncOption>>,
{
    Options::build(options).create_logger()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::MemoryWriter;

    fn no_options() -> Vec<FuncOption> {
        Vec::new()
    }

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.level(), Level::Debug);
        assert_eq!(options.encoder(), "json");
        assert!(!options.caller());
        assert_eq!(options.driver().map(Driver::name), Some("backend"));
        assert!(options.destinations().is_empty());
    }

    #[test]
    fn test_build_applies_in_order() {
        let memory = MemoryWriter::new();
        let options = Options::build([
            with_level(Level::Info),
            with_level(Level::Error),
            with_caller(true),
            with_encoder("console"),
            with_destinations(&[memory.destination()]),
        ]);

        assert_eq!(options.level(), Level::Error);
        assert!(options.caller());
        assert_eq!(options.encoder(), "console");
        assert_eq!(options.destinations().len(), 1);
    }

    #[test]
    fn test_build_skips_none() {
        let memory = MemoryWriter::new();
        let options = Options::build([
            None,
            Some(with_destinations(&[memory.destination()])),
            None,
            Some(with_level(Level::Warn)),
        ]);
        assert_eq!(options.level(), Level::Warn);
    }

    #[test]
    fn test_invalid_encoder_falls_back() {
        let memory = MemoryWriter::new();
        let options = Options::build([
            with_level(Level::Error),
            with_encoder("xml"),
            with_destinations(&[memory.destination()]),
        ]);

        assert_eq!(options.encoder(), "json");
        assert_eq!(options.level(), Level::Debug);
        assert!(options.destinations().is_empty());
    }

    #[test]
    fn test_unset_driver_falls_back() {
        let memory = MemoryWriter::new();
        let options = Options::build([
            with_driver(None),
            with_destinations(&[memory.destination()]),
        ]);
        assert_eq!(options.driver().map(Driver::name), Some("backend"));
        assert!(options.destinations().is_empty());
    }

    #[test]
    fn test_empty_options_are_defaults() {
        let options = Options::build(no_options());
        assert_eq!(options.level(), Level::Debug);
        assert_eq!(options.encoder(), "json");
    }

    #[test]
    fn test_destinations_are_copied() {
        let first = MemoryWriter::new();
        let second = MemoryWriter::new();
        let mut list = vec![first.destination()];

        let option = with_destinations(&list);
        list[0] = second.destination();
        list.push(second.destination());

        let options = Options::build([option]);
        assert_eq!(options.destinations().len(), 1);

        let logger = options.create_logger();
        logger.infot("copied", None);
        assert!(first.contents().contains("copied"));
        assert!(second.is_empty());
    }

    #[test]
    fn test_destinations_replace() {
        let first = MemoryWriter::new();
        let second = MemoryWriter::new();
        let options = Options::build([
            with_destinations(&[first.destination()]),
            with_destinations(&[second.destination()]),
        ]);
        assert_eq!(options.destinations().len(), 1);
    }

    #[test]
    fn test_validate_messages() {
        let options = Options::default();
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("destination"));
    }
}
