//! # tempmail - A typed client for the Temp Mail API
//!
//! `tempmail` wraps the [Temp Mail](https://temp-mail.io) disposable email
//! REST API. It builds requests against the API origin, authenticates them
//! with your API key, serializes bodies as JSON, and decodes responses into
//! typed models. Non-2xx responses become a structured [`ApiError`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use tempmail::{Client, CreateEmailOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tempmail::Error> {
//!     let client = Client::new("YOUR_API_KEY");
//!
//!     // Create a random address
//!     let email = client.create_email(CreateEmailOptions::default()).await?;
//!     println!("Created {} for {:?}", email.email, email.ttl);
//!
//!     // Poll the inbox
//!     let messages = client.list_email_messages(&email.email).await?;
//!     for message in messages.iter() {
//!         println!("{}: {}", message.from, message.subject);
//!     }
//!
//!     // Every response carries the rate limit snapshot
//!     println!("{} requests left", messages.rate.remaining);
//!
//!     client.delete_email(&email.email).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed endpoints** - addresses, domains, messages, attachments and rate limits
//! - **Structured errors** - the API's error envelope is decoded into [`ApiError`],
//!   with a short and a full rendering
//! - **Rate limit metadata** - every [`Response`] carries a [`Rate`] snapshot
//! - **Pluggable transport** - swap the default `reqwest` transport for anything
//!   implementing [`transport::Transport`]
//! - **Cancellation** - bind a client to a `CancellationToken` with
//!   [`Client::with_cancellation`]
//!
//! The client never retries. Every error is returned to the caller as is.
//!
//! ## Error Handling
//!
//! ```no_run
//! use tempmail::{Client, Error};
//!
//! # async fn example() {
//! let client = Client::new("YOUR_API_KEY");
//!
//! match client.download_attachment("01JE97K1PBYVGKY0PVE3KXSBF9").await {
//!     Ok(content) => println!("{} bytes", content.len()),
//!     Err(Error::Api(err)) => eprintln!("{}", err.full_message()),
//!     Err(e) => eprintln!("Request failed: {}", e),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests and responses are reported through `tracing` at `debug` level.
//! Install a subscriber (for instance `tracing-subscriber` with
//! `RUST_LOG=tempmail=debug`) to see them.

pub mod api;
mod client;
mod error;
pub mod rate_limit;
mod request;
mod response;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use api::{Attachment, CreateEmailOptions, CreatedEmail, Domain, DomainType, Message};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HEADER_API_KEY};
pub use error::{ApiError, Error, ErrorDetails, ErrorMeta, Result};
pub use rate_limit::Rate;
pub use request::Request;
pub use response::Response;
pub use tokio_util::sync::CancellationToken;
