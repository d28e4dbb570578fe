//! Log record structure

use super::fields::Fields;
use super::log_level::Level;
use chrono::{DateTime, Local};
use std::panic::Location;

/// A single record on its way from a `Logger` method to the encoder.
///
/// Records borrow the call-site data; nothing is copied until encoding.
#[derive(Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub timestamp: DateTime<Local>,
    pub caller: Option<&'static Location<'static>>,
    pub fields: Option<&'a Fields>,
    pub stacktrace: Option<String>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
            caller: None,
            fields: None,
            stacktrace: None,
        }
    }

    pub fn with_caller(mut self, caller: &'static Location<'static>) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Attach fields; an empty map is treated as absent
    pub fn with_fields(mut self, fields: Option<&'a Fields>) -> Self {
        self.fields = fields.filter(|f| !f.is_empty());
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: String) -> Self {
        self.stacktrace = Some(stacktrace);
        self
    }

    /// `file:line` of the call site, if captured
    pub fn caller_string(&self) -> Option<String> {
        self.caller
            .map(|location| format!("{}:{}", location.file(), location.line()))
    }

    /// Escape line breaks and tabs so that a message cannot forge extra records
    pub fn sanitized_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_dropped() {
        let fields = Fields::new();
        let record = Record::new(Level::Info, "hello").with_fields(Some(&fields));
        assert!(record.fields.is_none());
    }

    #[test]
    fn test_caller_string() {
        let record = Record::new(Level::Debug, "x").with_caller(Location::caller());
        let caller = record.caller_string().unwrap();
        assert!(caller.starts_with(file!()));
    }

    #[test]
    fn test_sanitized_message() {
        let record = Record::new(Level::Warn, "line1\nline2\tend");
        assert_eq!(record.sanitized_message(), "line1\\nline2\\tend");
    }
}
