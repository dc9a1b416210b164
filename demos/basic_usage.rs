//! Basic logger usage example
//!
//! Demonstrates console logging, fields, lazy messages and level overrides.
//!
//! Run with: cargo run --example basic_usage

use rust_field_logger::prelude::*;
use rust_field_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Field Logger - Basic Usage Example ===\n");

    // Console handler on stderr, debug and up
    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .handler(HandlerKind::default())
        .fields(fields!("app" => "myapp"))
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");
    logger.success("Deployed successfully");
    logger.wait("Ready to deploy");

    println!("\n2. Logging with fields:");
    logger.info(("Deploying", fields!("env" => "prod", "replicas" => 3)));
    info!(logger, "Listening on port {}", 8080; "tls" => true);
    warn!(logger, "Retry {} of {}", 1, 3);

    println!("\n3. Lazy messages:");
    logger.debug_with(|| format!("built only when needed: {}", 6 * 7));

    println!("\n4. Child logger and temporary level:");
    let quiet = logger.copy_with(fields!("component" => "db"), |config| {
        config.level = LogLevel::Warn
    })?;
    quiet.info("Info message (hidden)");
    quiet.log_at(LogLevel::Debug, || quiet.info("Info message (visible inside log_at)"))?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
