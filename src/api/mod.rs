//! Endpoint wrappers.
//!
//! Each wrapper is a thin `impl Client` method that builds one request and
//! runs it through the checked dispatcher. Models returned by the endpoints
//! live next to the method that returns them.

mod attachments;
mod domains;
mod emails;
mod messages;
mod rate_limit;

pub use domains::{Domain, DomainType};
pub use emails::{CreateEmailOptions, CreatedEmail};
pub use messages::{Attachment, Message};
