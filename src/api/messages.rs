use crate::{Client, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::Deserialize;

/// An email message received by a disposable address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Unique identifier of the message.
    pub id: String,

    /// Sender address.
    pub from: String,

    /// Recipient address.
    pub to: String,

    /// CC recipients.
    #[serde(default)]
    pub cc: Vec<String>,

    /// Subject line.
    #[serde(default)]
    pub subject: String,

    /// Plain text body.
    #[serde(default)]
    pub body_text: String,

    /// HTML body.
    #[serde(default)]
    pub body_html: String,

    /// When the message was received, if the API reported it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Attachment metadata; download the content with
    /// [`Client::download_attachment`].
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Metadata of a message attachment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// Unique identifier of the attachment.
    pub id: String,

    /// File name, e.g. `image.png`.
    pub name: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

#[derive(Deserialize)]
struct MessageSourceBody {
    data: String,
}

impl Client {
    /// Fetches a message by id.
    pub async fn get_message(&self, message_id: &str) -> Result<Response<Message>> {
        let request = self.request(Method::GET, &format!("/v1/messages/{}", message_id))?;
        self.send_json(request).await
    }

    /// Fetches the raw source (headers and MIME body) of a message.
    pub async fn get_message_source(&self, message_id: &str) -> Result<Response<String>> {
        let request =
            self.request(Method::GET, &format!("/v1/messages/{}/source", message_id))?;
        let response = self.send_json::<MessageSourceBody>(request).await?;
        Ok(response.map(|body| body.data))
    }

    /// Deletes a message by id.
    pub async fn delete_message(&self, message_id: &str) -> Result<Response> {
        let request = self.request(Method::DELETE, &format!("/v1/messages/{}", message_id))?;
        self.send(request).await
    }
}
