//! Output encoders for log records
//!
//! Two encoders are provided:
//! - Json: one JSON object per line
//! - Console: tab-separated human-readable line

use super::error::Result;
use super::log_entry::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Timestamp layout shared by both encoders (RFC 3339, local offset)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Output encoder for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoder {
    /// Machine-readable JSON lines (default)
    ///
    /// Example: `{"level":"INFO","timestamp":"2025-01-08T10:30:45.120+00:00","msg":"Request processed"}`
    #[default]
    Json,

    /// Human-readable console format
    ///
    /// Example: `2025-01-08T10:30:45.120+00:00	INFO	Request processed`
    Console,
}

impl Encoder {
    /// Look up an encoder by its exact name (`"json"` or `"console"`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Encoder::Json),
            "console" => Some(Encoder::Console),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoder::Json => "json",
            Encoder::Console => "console",
        }
    }

    /// Encode a record as one newline-terminated line
    pub fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            Encoder::Json => encode_json(record, buf),
            Encoder::Console => encode_console(record, buf),
        }
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Encoder {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Written key by key so the line keeps a stable, readable order.
fn encode_json(record: &Record<'_>, buf: &mut Vec<u8>) -> Result<()> {
    buf.extend_from_slice(b"{\"level\":");
    serde_json::to_writer(&mut *buf, record.level.as_capital_str())?;

    buf.extend_from_slice(b",\"timestamp\":");
    let timestamp = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
    serde_json::to_writer(&mut *buf, &timestamp)?;

    if let Some(caller) = record.caller_string() {
        buf.extend_from_slice(b",\"caller\":");
        serde_json::to_writer(&mut *buf, &caller)?;
    }

    buf.extend_from_slice(b",\"msg\":");
    serde_json::to_writer(&mut *buf, record.message)?;

    if let Some(fields) = record.fields {
        for (key, value) in fields.iter() {
            buf.push(b',');
            serde_json::to_writer(&mut *buf, key)?;
            buf.push(b':');
            serde_json::to_writer(&mut *buf, value)?;
        }
    }

    if let Some(ref stacktrace) = record.stacktrace {
        buf.extend_from_slice(b",\"stacktrace\":");
        serde_json::to_writer(&mut *buf, stacktrace)?;
    }

    buf.extend_from_slice(b"}\n");
    Ok(())
}

fn encode_console(record: &Record<'_>, buf: &mut Vec<u8>) -> Result<()> {
    write!(buf, "{}\t", record.timestamp.format(TIMESTAMP_FORMAT))?;
    write_level(record, buf)?;

    if let Some(caller) = record.caller_string() {
        write!(buf, "\t{}", caller)?;
    }

    write!(buf, "\t{}", record.sanitized_message())?;

    if let Some(fields) = record.fields {
        buf.push(b'\t');
        serde_json::to_writer(&mut *buf, fields)?;
    }
    buf.push(b'\n');

    if let Some(ref stacktrace) = record.stacktrace {
        buf.extend_from_slice(stacktrace.trim_end().as_bytes());
        buf.push(b'\n');
    }
    Ok(())
}

#[cfg(feature = "console")]
fn write_level(record: &Record<'_>, buf: &mut Vec<u8>) -> Result<()> {
    use colored::Colorize;

    let name = record.level.as_capital_str().color(record.level.color_code());
    write!(buf, "{}", name)?;
    Ok(())
}

#[cfg(not(feature = "console"))]
fn write_level(record: &Record<'_>, buf: &mut Vec<u8>) -> Result<()> {
    buf.extend_from_slice(record.level.as_capital_str().as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, Level};

    fn encode(encoder: Encoder, record: &Record<'_>) -> String {
        let mut buf = Vec::new();
        encoder.encode(record, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Encoder::parse("json"), Some(Encoder::Json));
        assert_eq!(Encoder::parse("console"), Some(Encoder::Console));
        assert_eq!(Encoder::parse("JSON"), None);
        assert_eq!(Encoder::parse("xml"), None);
        assert_eq!(Encoder::default(), Encoder::Json);
    }

    #[test]
    fn test_json_format() {
        let record = Record::new(Level::Error, "Error occurred");
        let line = encode(Encoder::Json, &record);
        assert!(line.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["msg"], "Error occurred");
        assert!(parsed["timestamp"].is_string());
        assert!(parsed.get("caller").is_none());
    }

    #[test]
    fn test_json_key_order() {
        let record = Record::new(Level::Info, "ordered");
        let line = encode(Encoder::Json, &record);
        let level = line.find("\"level\"").unwrap();
        let ts = line.find("\"timestamp\"").unwrap();
        let msg = line.find("\"msg\"").unwrap();
        assert!(level < ts && ts < msg);
    }

    #[test]
    fn test_json_format_with_fields() {
        let fields = Fields::new()
            .with_field("request_id", "abc-123")
            .with_field("latency_ms", 42);
        let record = Record::new(Level::Info, "Request completed").with_fields(Some(&fields));
        let line = encode(Encoder::Json, &record);

        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
    }

    #[test]
    fn test_json_escapes_message() {
        let record = Record::new(Level::Warn, "quote \" and\nnewline");
        let line = encode(Encoder::Json, &record);
        assert_eq!(line.lines().count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["msg"], "quote \" and\nnewline");
    }

    #[test]
    fn test_json_stacktrace() {
        let record = Record::new(Level::Error, "boom").with_stacktrace("frame 0\nframe 1".into());
        let line = encode(Encoder::Json, &record);
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["stacktrace"], "frame 0\nframe 1");
    }

    #[test]
    fn test_console_format() {
        let record = Record::new(Level::Warn, "Warning message");
        let line = encode(Encoder::Console, &record);
        assert!(line.contains("WARN"));
        assert!(line.contains("\tWarning message\n"));
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn test_console_format_with_fields_and_caller() {
        let fields = Fields::new().with_field("user", "alice");
        let record = Record::new(Level::Debug, "Debug info")
            .with_fields(Some(&fields))
            .with_caller(std::panic::Location::caller());
        let line = encode(Encoder::Console, &record);

        assert!(line.contains(file!()));
        assert!(line.contains(r#"{"user":"alice"}"#));
    }

    #[test]
    fn test_console_sanitizes_message() {
        let record = Record::new(Level::Info, "forged\nINFO fake");
        let line = encode(Encoder::Console, &record);
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("forged\\nINFO fake"));
    }
}
