//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Match on the different error kinds
//! - Read the structured API error and its request id
//! - Inspect the raw body when a response cannot be decoded
//! - Cancel requests with a `CancellationToken`
//!
//! Run with: `TEMP_MAIL_API_KEY=... cargo run --example error_handling`

use std::time::Duration;
use tempmail::{CancellationToken, Client, Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("tempmail=info")
        .init();

    let api_key = std::env::var("TEMP_MAIL_API_KEY").unwrap_or_default();
    let client = Client::builder(api_key)
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("=== Example 1: API Errors ===");
    match client.get_message("nonexistent").await {
        Ok(response) => println!("Unexpected success: {:?}", response.data),
        Err(Error::Api(err)) => {
            println!("API Error!");
            println!("  Status: {}", err.status());
            println!("  Type: {}", err.error.error_type);
            println!("  Code: {}", err.error.code);
            println!("  Detail: {}", err.error.detail);
            println!("  Request id: {}", err.meta.request_id);
            println!("  Message: {}", err);
            println!("  Full message: {}", err.full_message());
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Undecodable Responses ===");
    let bad_origin = Client::builder("unused")
        .base_url("https://example.com")
        .build()?;
    match bad_origin.list_domains().await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Decode {
            status,
            raw_body,
            source,
        }) => {
            println!("Decode failed!");
            println!("  Status: {}", status);
            println!("  Serde error: {}", source);
            println!(
                "  Raw body (first 200 chars): {}",
                raw_body.chars().take(200).collect::<String>()
            );
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Cancellation ===");
    let token = CancellationToken::new();
    let cancellable = client.with_cancellation(token.clone());

    let request = tokio::spawn(async move { cancellable.list_domains().await });
    token.cancel();

    match request.await? {
        Ok(_) => println!("Finished before it was cancelled"),
        Err(e) if e.is_cancelled() => println!("Cancelled in flight: {}", e),
        Err(Error::Construction(msg)) => println!("Never sent: {}", msg),
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
