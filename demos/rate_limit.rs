//! Example demonstrating rate limit inspection.
//!
//! Every response carries the `X-Ratelimit-*` snapshot in `Response::rate`.
//! The dedicated endpoint returns the same counters in its body.
//!
//! Run with: `TEMP_MAIL_API_KEY=... cargo run --example rate_limit`

use std::time::SystemTime;
use tempmail::{Client, Error, Rate};

fn describe(rate: &Rate) {
    println!("  Limit: {}", rate.limit);
    println!("  Used: {}", rate.used);
    println!("  Remaining: {}", rate.remaining);

    match rate.reset.map(|reset| reset.duration_since(SystemTime::now())) {
        Some(Ok(wait)) => println!("  Resets in: {:?}", wait),
        Some(Err(_)) => println!("  Reset time has passed"),
        None => println!("  Reset time unknown"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("tempmail=debug,rate_limit=info")
        .init();

    let api_key = std::env::var("TEMP_MAIL_API_KEY").unwrap_or_default();
    let client = Client::new(api_key);

    println!("=== Rate Limit Endpoint ===");
    let response = client.rate_limit().await?;
    describe(&response);
    println!();

    println!("=== Rate Limit Headers ===");
    let domains = client.list_domains().await?;
    println!("Fetched {} domains", domains.len());
    describe(&domains.rate);

    if domains.rate.remaining == 0 {
        println!("Out of requests, wait for the reset before calling again");
    }

    Ok(())
}
