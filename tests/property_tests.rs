//! Property-based tests for tslog using proptest

use proptest::prelude::*;
use tslog::prelude::*;
use tslog::writer::MemoryWriter;
use tslog::{sprint, sprintf, Record};

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::None),
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
    ]
}

fn any_value() -> impl Strategy<Value = Value<'static>> {
    prop_oneof![
        ".*".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Parsing ignores case and surrounding whitespace
    #[test]
    fn test_parse_level_case_and_whitespace(
        level in any_level(),
        upper in proptest::collection::vec(any::<bool>(), 5),
        left in "[ \t\n]{0,3}",
        right in "[ \t\n]{0,3}",
    ) {
        let mixed: String = level
            .as_str()
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        let input = format!("{}{}{}", left, mixed, right);
        prop_assert_eq!(parse_level(&input), level);
    }

    /// Anything that is not a level name parses to None
    #[test]
    fn test_parse_level_unknown_is_none(text in "[a-z]{1,10}") {
        let known = ["none", "debug", "info", "warn", "error"];
        prop_assume!(!known.contains(&text.as_str()));
        prop_assert_eq!(parse_level(&text), Level::None);
        prop_assert!(!parse_level(&text).is_enabled());
    }

    /// Level ordering matches the ordinal
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, (a as u8) < (b as u8));
        prop_assert_eq!(a.is_enabled(), a != Level::None);
    }

    /// Display is the parse inverse
    #[test]
    fn test_level_display_roundtrip(level in any_level()) {
        prop_assert_eq!(parse_level(&level.to_string()), level);
    }

    /// Ordinals outside the range use the generic name
    #[test]
    fn test_ordinal_fallback(ordinal in 5u8..) {
        prop_assert_eq!(Level::ordinal_name(ordinal), format!("Level({})", ordinal));
        prop_assert!(Level::try_from(ordinal).is_err());
    }
}

// ============================================================================
// Message Rendering Tests
// ============================================================================

proptest! {
    /// sprintf never panics, whatever the format and operands
    #[test]
    fn test_sprintf_never_panics(
        format in ".{0,40}",
        args in proptest::collection::vec(any_value(), 0..6),
    ) {
        let _ = sprintf(&format, &args);
    }

    /// Formats made of directives and noise never panic either
    #[test]
    fn test_sprintf_directive_soup(
        format in "(%[-+# 0]{0,2}[0-9]{0,3}(\\.[0-9]{0,2})?[a-zA-Z%]?|[a-z ]){0,12}",
        args in proptest::collection::vec(any_value(), 0..6),
    ) {
        let _ = sprintf(&format, &args);
    }

    /// A format without directives is copied, surplus operands are reported
    #[test]
    fn test_sprintf_plain_text(text in "[a-zA-Z0-9 ]*", n in any::<i64>()) {
        prop_assert_eq!(sprintf(&text, &[]), text.clone());
        prop_assert_eq!(sprintf(&text, &[Value::from(n)]), format!("{}%!(EXTRA i64={})", text, n));
    }

    /// %d renders integers like Display
    #[test]
    fn test_sprintf_integers(n in any::<i64>()) {
        prop_assert_eq!(sprintf("count=%d", &[Value::from(n)]), format!("count={}", n));
    }

    /// Adjacent strings are concatenated without separators
    #[test]
    fn test_sprint_strings(a in "[a-z]*", b in "[a-z]*") {
        prop_assert_eq!(sprint(&[Value::from(a.as_str()), Value::from(b.as_str())]), format!("{}{}", a, b));
    }

    /// Adjacent non-strings are separated by one space
    #[test]
    fn test_sprint_numbers(a in any::<i64>(), b in any::<u64>()) {
        prop_assert_eq!(sprint(&[Value::from(a), Value::from(b)]), format!("{} {}", a, b));
    }
}

// ============================================================================
// Record and Encoding Tests
// ============================================================================

proptest! {
    /// Console messages never contain raw line breaks or tabs
    #[test]
    fn test_console_message_sanitized(message in ".*") {
        let record = Record::new(Level::Info, &message);
        let sanitized = record.sanitized_message();
        prop_assert!(!sanitized.contains('\n'));
        prop_assert!(!sanitized.contains('\r'));
        prop_assert!(!sanitized.contains('\t'));
    }

    /// Every emitted JSON record is one parseable line carrying the message
    #[test]
    fn test_json_line_roundtrip(message in ".*", key in "[a-z_]{1,8}", value in any::<i64>()) {
        prop_assume!(!["level", "timestamp", "msg", "caller", "stacktrace"].contains(&key.as_str()));

        let memory = MemoryWriter::new();
        let logger = new_logger([with_destinations(&[memory.destination()])]);
        let fields = Fields::new().with_field(key.clone(), value);
        logger.infot(&message, Some(&fields));

        let lines = memory.lines();
        prop_assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(parsed["msg"].as_str(), Some(message.as_str()));
        prop_assert_eq!(parsed[key.as_str()].as_i64(), Some(value));
    }

    /// The gate admits exactly the levels at or above it
    #[test]
    fn test_gate(gate in any_level(), level in any_level()) {
        prop_assume!(level != Level::None);

        let memory = MemoryWriter::new();
        let logger = new_logger([with_level(gate), with_destinations(&[memory.destination()])]);
        match level {
            Level::Debug => logger.debugt("m", None),
            Level::Info => logger.infot("m", None),
            Level::Warn => logger.warnt("m", None),
            _ => logger.errort("m", None),
        }

        let expected = gate.is_enabled() && level >= gate;
        prop_assert_eq!(!memory.is_empty(), expected);
    }
}
