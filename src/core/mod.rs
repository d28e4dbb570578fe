//! Core logger types and traits

pub mod backend;
pub mod default_logger;
pub mod driver;
pub mod error;
pub mod fields;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod noop;
pub mod options;
pub mod output_format;
pub mod printf;
pub mod settings;

pub use backend::BackendLogger;
pub use default_logger::{
    debug, debugf, debugt, default_logger, error, errorf, errort, info, infof, infot,
    set_default_logger, warn, warnf, warnt,
};
pub use driver::{backend_driver, noop_driver, Driver};
pub use error::{LoggerError, Result};
pub use fields::{Fields, Value};
pub use log_entry::Record;
pub use log_level::{parse_level, Level};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use noop::NoopLogger;
pub use options::{
    new_logger, with_caller, with_destinations, with_driver, with_encoder, with_level,
    FuncOption, Options,
};
pub use output_format::Encoder;
pub use printf::{sprint, sprintf};
pub use settings::{OutputSettings, Settings};
