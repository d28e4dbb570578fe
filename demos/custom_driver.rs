//! Custom driver example
//!
//! Demonstrates plugging a different logger implementation in through a
//! driver, and loading logger settings from JSON.
//!
//! Run with: cargo run --example custom_driver

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tslog::prelude::*;
use tslog::{sprint, sprintf, values, Settings};

/// Counts records per level and prints them with a prefix
#[derive(Default)]
struct CountingLogger {
    prefix: String,
    counts: [AtomicU64; 4],
}

impl CountingLogger {
    fn emit(&self, level: Level, message: &str) {
        self.counts[level as usize - 1].fetch_add(1, Ordering::Relaxed);
        println!("{} [{}] {}", self.prefix, level, message);
    }

    fn report(&self) {
        for (level, count) in [Level::Debug, Level::Info, Level::Warn, Level::Error]
            .iter()
            .zip(&self.counts)
        {
            println!("   {:<5} {}", level, count.load(Ordering::Relaxed));
        }
    }
}

impl Logger for CountingLogger {
    fn debug(&self, args: &[Value<'_>]) {
        self.emit(Level::Debug, &sprint(args));
    }
    fn info(&self, args: &[Value<'_>]) {
        self.emit(Level::Info, &sprint(args));
    }
    fn warn(&self, args: &[Value<'_>]) {
        self.emit(Level::Warn, &sprint(args));
    }
    fn error(&self, args: &[Value<'_>]) {
        self.emit(Level::Error, &sprint(args));
    }

    fn debugf(&self, format: &str, args: &[Value<'_>]) {
        self.emit(Level::Debug, &sprintf(format, args));
    }
    fn infof(&self, format: &str, args: &[Value<'_>]) {
        self.emit(Level::Info, &sprintf(format, args));
    }
    fn warnf(&self, format: &str, args: &[Value<'_>]) {
        self.emit(Level::Warn, &sprintf(format, args));
    }
    fn errorf(&self, format: &str, args: &[Value<'_>]) {
        self.emit(Level::Error, &sprintf(format, args));
    }

    fn debugt(&self, msg: &str, fields: Option<&Fields>) {
        self.emit(Level::Debug, &with_fields(msg, fields));
    }
    fn infot(&self, msg: &str, fields: Option<&Fields>) {
        self.emit(Level::Info, &with_fields(msg, fields));
    }
    fn warnt(&self, msg: &str, fields: Option<&Fields>) {
        self.emit(Level::Warn, &with_fields(msg, fields));
    }
    fn errort(&self, msg: &str, fields: Option<&Fields>) {
        self.emit(Level::Error, &with_fields(msg, fields));
    }
}

fn with_fields(msg: &str, fields: Option<&Fields>) -> String {
    match fields {
        Some(fields) if !fields.is_empty() => format!("{} {}", msg, fields),
        _ => msg.to_string(),
    }
}

fn main() -> Result<()> {
    println!("=== tslog - Custom Driver Example ===\n");

    println!("1. A driver building a counting logger:");
    let counting = Arc::new(CountingLogger {
        prefix: ">>".to_string(),
        ..CountingLogger::default()
    });
    let shared = Arc::clone(&counting);
    let driver = Driver::new("counting", move |_: &Options| shared.clone() as Arc<dyn Logger>);

    let logger = new_logger([with_driver(driver), with_destinations(&[new_stdout_writer()])]);
    logger.info(&values!["hello from ", "a custom driver"]);
    logger.warnf("%d retries left", &values![2]);
    logger.errort("gave up", Some(&Fields::new().with_field("attempts", 3)));
    counting.report();

    println!("\n2. Logger from JSON settings:");
    let settings = Settings::from_json(
        r#"{
            "level": "info",
            "encoder": "console",
            "caller": true,
            "outputs": [{ "type": "stdout" }]
        }"#,
    )?;
    let logger = settings.build()?;
    logger.debug(&values!["hidden by the gate"]);
    logger.infof("loaded settings for %s", &values!["custom_driver"]);
    logger.close()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
