//! Serializable logger settings
//!
//! ```
//! use tslog::Settings;
//!
//! let settings = Settings::from_json(r#"{
//!     "level": "info",
//!     "encoder": "console",
//!     "outputs": [{ "type": "stderr" }]
//! }"#).unwrap();
//!
//! let logger = settings.build().unwrap();
//! logger.debugt("below the gate", None);
//! ```

use super::error::Result;
use super::log_level::Level;
use super::logger::Logger;
use super::options::{
    new_logger, with_caller, with_destinations, with_encoder, with_level, FuncOption,
};
use super::output_format::Encoder;
use crate::writer::{
    new_rotating_file_writer, new_stderr_writer, new_stdout_writer, Destination,
    RotatingFileConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One output of a [`Settings`] record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputSettings {
    Stdout,
    Stderr,
    File(RotatingFileConfig),
}

impl OutputSettings {
    pub fn open(&self) -> Result<Destination> {
        match self {
            OutputSettings::Stdout => Ok(new_stdout_writer()),
            OutputSettings::Stderr => Ok(new_stderr_writer()),
            OutputSettings::File(config) => new_rotating_file_writer(config.clone()),
        }
    }
}

/// Logger settings as found in a configuration file.
///
/// Missing keys take the defaults: debug level, JSON encoder, caller off,
/// standard output. Level names are parsed leniently; an unknown encoder
/// name is kept so that the built logger falls back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: Level,
    pub encoder: String,
    pub caller: bool,
    pub outputs: Vec<OutputSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            encoder: Encoder::Json.as_str().to_string(),
            caller: false,
            outputs: vec![OutputSettings::Stdout],
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Open every output and turn the settings into option functions
    ///
    /// # Errors
    ///
    /// Returns error if a file output cannot be opened
    pub fn into_options(self) -> Result<Vec<FuncOption>> {
        let destinations = self
            .outputs
            .iter()
            .map(OutputSettings::open)
            .collect::<Result<Vec<_>>>()?;

        Ok(vec![
            with_level(self.level),
            with_encoder(self.encoder),
            with_caller(self.caller),
            with_destinations(&destinations),
        ])
    }

    pub fn build(self) -> Result<Arc<dyn Logger>> {
        Ok(new_logger(self.into_options()?))
    }
}
