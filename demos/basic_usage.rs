//! Basic logger usage example
//!
//! Demonstrates the default logger, a custom logger and the three logging styles.
//!
//! Run with: cargo run --example basic_usage

use std::sync::Arc;
use tslog::prelude::*;
use tslog::{fields, infof, values, warn};

fn main() -> Result<()> {
    println!("=== tslog - Basic Usage Example ===\n");

    // The default logger writes console lines to stdout at debug level
    println!("1. Package-level functions:");
    tslog::debug(&values!["This is a debug message"]);
    tslog::info(&values!["Server started on port ", 8080]);
    tslog::warnf("Disk usage at %d%%", &values![91]);
    tslog::errort("Request failed", Some(&fields! { "status" => 503, "retry" => true }));

    // A custom logger: JSON lines, info and above, with call sites
    println!("\n2. Custom JSON logger (info and above, caller on):");
    let logger = new_logger([
        with_level(Level::Info),
        with_encoder(Encoder::Json),
        with_caller(true),
        with_destinations(&[new_stdout_writer()]),
    ]);
    logger.debug(&values!["Debug message (hidden)"]);
    infof!(logger, "Processing %d items", 100);
    warn!(logger, "Cache miss for key ", "user:42");
    logger.infot("user logged in", Some(&fields! { "user_id" => 42, "ip" => "192.168.1.1" }));

    // Swap the default; package-level calls follow it
    println!("\n3. Replacing the default logger:");
    set_default_logger(Arc::clone(&logger));
    tslog::info(&values!["Now routed through the JSON logger"]);

    // Levels can come from configuration text
    println!("\n4. Parsing levels:");
    for text in ["debug", " WARN ", "verbose"] {
        let level = parse_level(text);
        println!("   {:?} -> {} (enabled: {})", text, level, level.is_enabled());
    }

    logger.close()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
