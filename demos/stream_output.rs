//! Stream output example
//!
//! Demonstrates text and JSON stream handlers, metadata prefixes, byte and
//! depth budgets, and writing to several outputs at once.
//!
//! Run with: cargo run --example stream_output

use rust_field_logger::prelude::*;
use std::fs::File;

fn main() -> Result<()> {
    println!("=== Rust Field Logger - Stream Output Example ===\n");

    println!("1. Text with metadata:");
    let text = Logger::builder()
        .handler(HandlerKind::Stream)
        .output(Output::stdout())
        .metadata(MetadataKey::All)
        .build()?;
    text.info(("Deploying", fields!("app" => "myapp", "env" => "prod")));

    println!("\n2. JSON:");
    let json = Logger::builder()
        .formatter(OutputFormat::Json)
        .handler(HandlerKind::Stream)
        .output(Output::stdout())
        .build()?;
    json.info(("Request processed", fields!("user" => "alice", "latency_ms" => 12)));

    println!("\n3. Byte and depth budgets:");
    let bounded = Logger::builder()
        .max_bytes(40)
        .max_depth(2)
        .handler(HandlerKind::Stream)
        .output(Output::stdout())
        .build()?;
    bounded.info((
        "Big payload",
        fields!(
            "nested" => fields!("a" => fields!("b" => 1)),
            "list" => vec![1, 2, 3],
            "tail" => "dropped"
        ),
    ));

    println!("\n4. Several outputs and per-handler levels:");
    let path = std::env::temp_dir().join("rust_field_logger_demo.log");
    let file = File::create(&path)?;
    let fanout = Logger::builder()
        .handler(
            HandlerSpec::new(HandlerKind::Stream)
                .with_output(Output::stdout())
                .with_output(Output::new("file", file)),
        )
        .handler(
            HandlerSpec::new(HandlerKind::Stream)
                .with_level(LogLevel::Error)
                .with_formatter(OutputFormat::Json)
                .with_output(Output::stderr()),
        )
        .build()?;
    fanout.info("written to stdout and the file");
    fanout.error("also written to stderr as JSON");
    fanout.flush()?;
    println!("   file contents: {:?}", std::fs::read_to_string(&path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
