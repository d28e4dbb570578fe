//! # tslog
//!
//! A thin logging facade: a stable [`Logger`] trait for leveled logging in
//! print, printf and structured styles, decoupled from the emitting backend
//! by a pluggable [`Driver`].
//!
//! ## Features
//!
//! - **Pluggable drivers**: the emitting backend, a zero-cost no-op, or your own
//! - **Two encoders**: JSON lines and a human-readable console format
//! - **Writers**: stdout, stderr and a size-rotating file with retention and gzip
//! - **Default logger**: process-wide instance behind package-level functions
//!
//! ## Example
//!
//! ```
//! use tslog::prelude::*;
//! use tslog::writer::MemoryWriter;
//! use tslog::{fields, infof};
//!
//! let memory = MemoryWriter::new();
//! let logger = new_logger([
//!     with_level(Level::Info),
//!     with_destinations(&[memory.destination()]),
//! ]);
//!
//! infof!(logger, "processed %d items", 7);
//! logger.infot("user logged in", Some(&fields! { "user_id" => 42 }));
//!
//! assert_eq!(memory.lines().len(), 2);
//! ```

pub mod core;
pub mod macros;
pub mod writer;

pub mod prelude {
    pub use crate::core::{
        default_logger, new_logger, parse_level, set_default_logger, with_caller,
        with_destinations, with_driver, with_encoder, with_level, BackendLogger, Driver,
        Encoder, Fields, FuncOption, Level, Logger, LoggerError, NoopLogger, Options, Result,
        Value,
    };
    pub use crate::writer::{
        must_new_rotating_file_writer, new_rotating_file_writer, new_stderr_writer,
        new_stdout_writer, Destination, RotatingFileConfig,
    };
}

pub use self::core::{
    backend_driver, debug, debugf, debugt, default_logger, error, errorf, errort, info, infof,
    infot, new_logger, noop_driver, parse_level, set_default_logger, sprint, sprintf, warn,
    warnf, warnt, with_caller, with_destinations, with_driver, with_encoder, with_level,
    BackendLogger, Driver, Encoder, Fields, FuncOption, Level, Logger, LoggerError,
    LoggerMetrics, NoopLogger, Options, OutputSettings, Record, Result, Settings, Value,
};
pub use writer::{
    must_new_rotating_file_writer, new_rotating_file_writer, new_stderr_writer,
    new_stdout_writer, Destination, MemoryWriter, RotatingFileConfig, RotatingFileWriter,
};
