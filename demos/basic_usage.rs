//! Basic example walking through the lifecycle of a disposable address.
//!
//! This example shows how to:
//! - Create a client from an API key
//! - List the available domains
//! - Create an address and read its inbox
//! - Fetch a message, its raw source and its attachments
//! - Delete the address again
//!
//! Run with: `TEMP_MAIL_API_KEY=... cargo run --example basic_usage`

use tempmail::{Client, CreateEmailOptions, DomainType, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("tempmail=debug,basic_usage=info")
        .init();

    let api_key = std::env::var("TEMP_MAIL_API_KEY").unwrap_or_default();
    let client = Client::new(api_key);

    println!("=== Domains ===");
    let domains = client.list_domains().await?;
    for domain in domains.iter() {
        println!("{} ({:?})", domain.name, domain.domain_type);
    }
    println!();

    println!("=== Create Email ===");
    let options = CreateEmailOptions::default().domain_type(DomainType::Public);
    let created = client.create_email(options).await?;
    println!("Address: {}", created.email);
    println!("Expires in: {:?}", created.ttl);
    println!("Status code: {}", created.status);
    println!();

    println!("=== Inbox ===");
    let messages = client.list_email_messages(&created.email).await?;
    if messages.is_empty() {
        println!("No messages yet, send something to {}", created.email);
    }

    for message in messages.iter() {
        let received = message
            .created_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string());
        println!("[{}] {} -> {}", received, message.from, message.to);
        println!("Subject: {}", message.subject);

        let source = client.get_message_source(&message.id).await?;
        println!("Raw source: {} bytes", source.len());

        for attachment in &message.attachments {
            let content = client.download_attachment(&attachment.id).await?;
            println!("Attachment {}: {} bytes", attachment.name, content.len());
        }
    }
    println!();

    println!("=== Cleanup ===");
    let deleted = client.delete_email(&created.email).await?;
    println!("Deleted {} (status {})", created.email, deleted.status);
    println!("Requests remaining: {}", deleted.rate.remaining);

    Ok(())
}
