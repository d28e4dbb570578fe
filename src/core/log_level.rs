//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Levels are ordered from least to most severe. `None` sorts below every
/// other level and means "disabled": a logger configured with it emits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    None = 0,
    #[default]
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

const LEVEL_NAMES: [(&str, Level); 5] = [
    ("none", Level::None),
    ("debug", Level::Debug),
    ("info", Level::Info),
    ("warn", Level::Warn),
    ("error", Level::Error),
];

impl Level {
    /// Lenient parse: trims, ignores case, and maps anything unknown to `None`.
    ///
    /// ```
    /// use tslog::Level;
    ///
    /// assert_eq!(Level::parse("  INFO "), Level::Info);
    /// assert_eq!(Level::parse("verbose"), Level::None);
    /// ```
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_ascii_lowercase();
        LEVEL_NAMES
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, level)| *level)
            .unwrap_or(Level::None)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        *self != Level::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Upper-case name used by the encoders
    pub fn as_capital_str(&self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Render an arbitrary ordinal, falling back to `Level(<n>)` for values
    /// outside the known range.
    pub fn ordinal_name(ordinal: u8) -> String {
        match Level::try_from(ordinal) {
            Ok(level) => level.as_str().to_string(),
            Err(_) => format!("Level({})", ordinal),
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::None => White,
            Level::Debug => Magenta,
            Level::Info => Blue,
            Level::Warn => Yellow,
            Level::Error => Red,
        }
    }
}

/// Free-function form of [`Level::parse`].
pub fn parse_level(text: &str) -> Level {
    Level::parse(text)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse, unlike [`Level::parse`] an unknown name is an error.
impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        LEVEL_NAMES
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, level)| *level)
            .ok_or_else(|| LoggerError::invalid_level(format!("'{}'", s)))
    }
}

impl TryFrom<u8> for Level {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        match value {
            0 => Ok(Level::None),
            1 => Ok(Level::Debug),
            2 => Ok(Level::Info),
            3 => Ok(Level::Warn),
            4 => Ok(Level::Error),
            n => Err(LoggerError::invalid_level(format!("Level({})", n))),
        }
    }
}

// Configuration files get the same leniency as `parse`.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(Level::parse(&text))
    }
}
