//! Redaction example
//!
//! Demonstrates masking fields by key, dotted path, regex and predicate, and
//! masking message text and error backtraces.
//!
//! Run with: cargo run --example redaction

use rust_field_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Field Logger - Redaction Example ===\n");

    let logger = Logger::builder()
        .handler(HandlerKind::Stream)
        .output(Output::stdout())
        .filter_data("password")
        .filter_data("card.number")
        .filter_data(FilterRule::regex("^api_"))
        .filter_data(FilterRule::predicate(|path: &[String]| {
            path.first().is_some_and(|root| root == "session")
        }))
        .filter_message("s3cr3t")
        .filter_message(MessageRule::regex(r"\d{4}-\d{4}").with_mask("####"))
        .build()?;

    println!("1. Field masking:");
    logger.info((
        "User signed in",
        fields!(
            "user" => "alice",
            "password" => "hunter2",
            "api_key" => "abc123",
            "card" => fields!("number" => "4111-1111", "brand" => "visa"),
            "session" => fields!("id" => "f00d", "ttl" => 3600)
        ),
    ));

    println!("\n2. Message masking:");
    logger.warn("Password s3cr3t was sent in clear text");
    logger.warn("Card 4111-1111 declined");

    println!("\n3. Errors keep their kind, lose their secrets:");
    let error = CapturedError::new("AuthError", "token s3cr3t expired")
        .with_backtrace(["auth/s3cr3t.rs:10", "main.rs:3"]);
    logger.error(("Request failed", error.clone()));
    println!("   original error untouched: {}", error);

    println!("\n4. Masking with a DataFilter directly:");
    let filter = DataFilter::with_mask(vec!["token".into()], "<redacted>")?;
    let masked = filter.filter(&fields!("token" => "xyz", "user" => "bob"));
    println!("   {}", masked);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
