//! File logging example
//!
//! Demonstrates logging to the console and a rotating file simultaneously.
//!
//! Run with: cargo run --example file_logging

use tslog::prelude::*;
use tslog::values;

fn main() -> Result<()> {
    println!("=== tslog - File Logging Example ===\n");

    let file = new_rotating_file_writer(
        RotatingFileConfig::new("logs/application.log")
            .with_max_rotated_size(1)
            .with_max_retain_days(3)
            .with_max_retain_files(5)
            .with_local_time(true)
            .with_compress(true),
    )?;

    let logger = new_logger([
        with_level(Level::Debug),
        with_encoder(Encoder::Console),
        with_destinations(&[new_stdout_writer(), file]),
    ]);

    println!("1. Logging to both console and file:");
    logger.info(&values!["Application started"]);
    logger.debug(&values!["Loading configuration..."]);
    logger.warn(&values!["Using default settings for some options"]);
    logger.error(&values!["Failed to load optional plugin"]);

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.infof("Processing item %d/5", &values![i]);
        if i == 3 {
            logger.warnf("Item %d took longer than expected", &values![i]);
        }
    }

    logger.info(&values!["All operations completed"]);

    // Flush the file before exiting
    logger.close()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'logs/application.log' for the full log output");

    Ok(())
}
