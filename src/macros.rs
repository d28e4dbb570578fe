//! Logging macros for building argument lists and fields.
//!
//! The `Logger` methods take their operands as `&[Value]`; these macros
//! build that slice (and `Fields` maps) from ordinary Rust expressions.
//!
//! # Examples
//!
//! ```
//! use tslog::prelude::*;
//! use tslog::{fields, info, infof, values};
//!
//! let logger = NoopLogger;
//!
//! // Print-style
//! info!(logger, "Server started on port ", 8080);
//!
//! // printf-style
//! infof!(logger, "listening on %s:%d", "0.0.0.0", 8080);
//!
//! // Structured
//! logger.infot("user logged in", Some(&fields! { "user_id" => 42, "admin" => false }));
//!
//! // Plain argument lists for the package-level functions
//! tslog::debugf("retry %d of %d", &values![1, 3]);
//! ```

/// Build an array of [`Value`](crate::Value)s.
///
/// ```
/// use tslog::{values, Value};
///
/// let args = values!["id", 7, true];
/// assert_eq!(args[1], Value::Int(7));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        []
    };
    ($($arg:expr),+ $(,)?) => {
        [$($crate::Value::from($arg)),+]
    };
}

/// Build a [`Fields`](crate::Fields) map.
///
/// ```
/// use tslog::fields;
///
/// let fields = fields! { "request_id" => "abc-123", "attempt" => 2 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert($key, $value);)+
        fields
    }};
}

/// Log operands at debug level, print-style.
///
/// ```
/// # use tslog::prelude::*;
/// # let logger = NoopLogger;
/// use tslog::debug;
/// debug!(logger, "Counter value: ", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.debug(&$crate::values![$($arg),+])
    };
}

/// Log operands at info level, print-style.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.info(&$crate::values![$($arg),+])
    };
}

/// Log operands at warn level, print-style.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.warn(&$crate::values![$($arg),+])
    };
}

/// Log operands at error level, print-style.
///
/// ```
/// # use tslog::prelude::*;
/// # let logger = NoopLogger;
/// use tslog::error;
/// error!(logger, "Failed to connect to database");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.error(&$crate::values![$($arg),+])
    };
}

/// Log a printf-style message at debug level.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.debugf($format, &$crate::values![$($arg),*])
    };
}

/// Log a printf-style message at info level.
///
/// ```
/// # use tslog::prelude::*;
/// # let logger = NoopLogger;
/// use tslog::infof;
/// infof!(logger, "Processing %d items", 100);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.infof($format, &$crate::values![$($arg),*])
    };
}

/// Log a printf-style message at warn level.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.warnf($format, &$crate::values![$($arg),*])
    };
}

/// Log a printf-style message at error level.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.errorf($format, &$crate::values![$($arg),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::writer::MemoryWriter;
    use crate::{new_logger, with_destinations, Logger, Value};
    use std::sync::Arc;

    fn capture() -> (Arc<dyn Logger>, MemoryWriter) {
        let memory = MemoryWriter::new();
        let logger = new_logger([with_destinations(&[memory.destination()])]);
        (logger, memory)
    }

    #[test]
    fn test_values_macro() {
        let empty: [Value<'_>; 0] = values![];
        assert!(empty.is_empty());

        let args = values!["a", 1, 2.5, false];
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], Value::from("a"));
        assert_eq!(args[3], Value::Bool(false));
    }

    #[test]
    fn test_fields_macro() {
        let fields = fields! { "k" => "v", "n" => 3 };
        assert_eq!(fields.get("n"), Some(&Value::Int(3)));
        assert!(fields!().is_empty());
    }

    #[test]
    fn test_print_macros() {
        let (logger, memory) = capture();
        debug!(logger, "debug ", 1);
        info!(logger, "info ", 2);
        warn!(logger, "warn ", 3);
        error!(logger, "error ", 4);

        let content = memory.contents();
        for expected in ["debug 1", "info 2", "warn 3", "error 4"] {
            assert!(content.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_printf_macros() {
        let (logger, memory) = capture();
        debugf!(logger, "no args");
        infof!(logger, "count=%d", 7);
        warnf!(logger, "%s/%s", "a", "b");
        errorf!(logger, "%.1f%%", 99.5);

        let content = memory.contents();
        assert!(content.contains("no args"));
        assert!(content.contains("count=7"));
        assert!(content.contains("a/b"));
        assert!(content.contains("99.5%"));
        assert_eq!(memory.lines().len(), 4);
    }
}
