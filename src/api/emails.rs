use crate::api::{DomainType, Message};
use crate::{Client, Response, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for [`Client::create_email`].
///
/// Every field is optional; leaving all of them unset creates a random
/// address on a public domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateEmailOptions {
    /// Address to create. A random one is generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Category of domain to create the address on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,

    /// Domain to create the address on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl CreateEmailOptions {
    /// Requests a specific address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Requests a domain category.
    pub fn domain_type(mut self, domain_type: DomainType) -> Self {
        self.domain_type = Some(domain_type);
        self
    }

    /// Requests a specific domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// A newly created address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEmail {
    /// The address that was created.
    pub email: String,

    /// How long the address stays alive.
    pub ttl: Duration,
}

#[derive(Deserialize)]
struct CreateEmailBody {
    email: String,
    #[serde(default)]
    ttl: u64,
}

#[derive(Deserialize)]
struct ListMessagesBody {
    #[serde(default)]
    messages: Vec<Message>,
}

impl Client {
    /// Creates a disposable address.
    ///
    /// Call this before polling for messages with
    /// [`Client::list_email_messages`].
    pub async fn create_email(&self, options: CreateEmailOptions) -> Result<Response<CreatedEmail>> {
        let request = self.json_request(Method::POST, "/v1/emails", &options)?;
        let response = self.send_json::<CreateEmailBody>(request).await?;
        Ok(response.map(|body| CreatedEmail {
            email: body.email,
            ttl: Duration::from_secs(body.ttl),
        }))
    }

    /// Deletes an address and its messages.
    pub async fn delete_email(&self, email: &str) -> Result<Response> {
        let request = self.request(Method::DELETE, &format!("/v1/emails/{}", email))?;
        self.send(request).await
    }

    /// Lists the messages received by an address.
    pub async fn list_email_messages(&self, email: &str) -> Result<Response<Vec<Message>>> {
        let request = self.request(Method::GET, &format!("/v1/emails/{}/messages", email))?;
        let response = self.send_json::<ListMessagesBody>(request).await?;
        Ok(response.map(|body| body.messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Attachment;
    use crate::test_support::{fake_client, FakeTransport, ERROR_RESPONSE};
    use crate::Error;
    use chrono::{TimeZone, Utc};

    const CREATE_EMAIL: &str = r#"{"email":"test@example.com","ttl":3600}"#;

    const LIST_EMAIL_MESSAGES: &str = r#"{
      "messages": [
        {
          "id": "01JE97FT950QRPDYGDXJ4R43QR",
          "from": "admin@example.com",
          "to": "user@example.com",
          "cc": ["another_user@example.com"],
          "subject": "Your account has been created",
          "body_text": "Welcome to our service! Your account has been created successfully.",
          "body_html": "<p>Welcome to our service! Your account has been created successfully.</p>",
          "created_at": "2022-01-31T22:00:00Z",
          "attachments": [
            {"id": "01JE97K1PBYVGKY0PVE3KXSBF9", "name": "invoice.pdf", "size": 5120}
          ]
        }
      ]
    }"#;

    fn sent_body(transport: &FakeTransport) -> serde_json::Value {
        let request = transport.last_request().unwrap();
        serde_json::from_slice(request.body().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_email_with_empty_options() {
        let transport = FakeTransport::new(200, CREATE_EMAIL);
        let client = fake_client(transport.clone());

        let response = client
            .create_email(CreateEmailOptions::default())
            .await
            .unwrap();

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(
            response.data,
            CreatedEmail {
                email: "test@example.com".to_string(),
                ttl: Duration::from_secs(3600),
            }
        );

        let request = transport.last_request().unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/v1/emails");
        assert_eq!(sent_body(&transport), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_create_email_with_custom_options() {
        let transport = FakeTransport::new(200, CREATE_EMAIL);
        let client = fake_client(transport.clone());

        let options = CreateEmailOptions::default()
            .email("custom@example.com")
            .domain_type(DomainType::Public)
            .domain("example.com");
        let response = client.create_email(options).await.unwrap();

        assert!(!response.email.is_empty());
        assert!(!response.ttl.is_zero());
        assert_eq!(
            sent_body(&transport),
            serde_json::json!({
                "email": "custom@example.com",
                "domain_type": "public",
                "domain": "example.com"
            })
        );
    }

    #[tokio::test]
    async fn test_create_email_only_domain() {
        let transport = FakeTransport::new(200, CREATE_EMAIL);
        let client = fake_client(transport.clone());

        client
            .create_email(CreateEmailOptions::default().domain("example.com"))
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport),
            serde_json::json!({"domain": "example.com"})
        );
    }

    #[tokio::test]
    async fn test_create_email_error() {
        let client = fake_client(FakeTransport::new(400, ERROR_RESPONSE));

        let err = client
            .create_email(CreateEmailOptions::default().email("invalid"))
            .await
            .unwrap_err();
        let api_error = err.api_error().unwrap();
        assert_eq!(api_error.error.error_type, "request_error");
        assert_eq!(api_error.error.code, "not_found");
    }

    #[tokio::test]
    async fn test_delete_email() {
        let transport = FakeTransport::new(200, "");
        let client = fake_client(transport.clone());

        let response = client.delete_email("user@example.com").await.unwrap();
        assert_eq!(response.status.as_u16(), 200);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.url().path(), "/v1/emails/user@example.com");
    }

    #[tokio::test]
    async fn test_delete_email_error() {
        let client = fake_client(FakeTransport::new(404, ERROR_RESPONSE));

        let err = client.delete_email("user@example.com").await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    }

    #[tokio::test]
    async fn test_list_email_messages() {
        let transport = FakeTransport::new(200, LIST_EMAIL_MESSAGES);
        let client = fake_client(transport.clone());

        let response = client
            .list_email_messages("user@example.com")
            .await
            .unwrap();

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.len(), 1);
        assert_eq!(
            response[0],
            Message {
                id: "01JE97FT950QRPDYGDXJ4R43QR".to_string(),
                from: "admin@example.com".to_string(),
                to: "user@example.com".to_string(),
                cc: vec!["another_user@example.com".to_string()],
                subject: "Your account has been created".to_string(),
                body_text: "Welcome to our service! Your account has been created successfully."
                    .to_string(),
                body_html:
                    "<p>Welcome to our service! Your account has been created successfully.</p>"
                        .to_string(),
                created_at: Some(Utc.with_ymd_and_hms(2022, 1, 31, 22, 0, 0).unwrap()),
                attachments: vec![Attachment {
                    id: "01JE97K1PBYVGKY0PVE3KXSBF9".to_string(),
                    name: "invoice.pdf".to_string(),
                    size: 5120,
                }],
            }
        );

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url().path(),
            "/v1/emails/user@example.com/messages"
        );
    }

    #[tokio::test]
    async fn test_list_email_messages_missing_timestamps() {
        let body = r#"{
          "messages": [
            {"id": "a", "from": "x@example.com", "to": "user@example.com", "created_at": null},
            {"id": "b", "from": "y@example.com", "to": "user@example.com"},
            {"id": "c", "from": "z@example.com", "to": "user@example.com", "created_at": "2022-01-31T22:00:00Z"}
          ]
        }"#;
        let client = fake_client(FakeTransport::new(200, body));

        let messages = client
            .list_email_messages("user@example.com")
            .await
            .unwrap()
            .into_data();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].created_at, None);
        assert_eq!(messages[1].created_at, None);
        assert_eq!(
            messages[2].created_at,
            Some(Utc.with_ymd_and_hms(2022, 1, 31, 22, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_list_email_messages_empty_inbox() {
        let client = fake_client(FakeTransport::new(200, r#"{"messages":[]}"#));

        let response = client
            .list_email_messages("user@example.com")
            .await
            .unwrap();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_list_email_messages_error() {
        let client = fake_client(FakeTransport::new(400, ERROR_RESPONSE));

        let err = client
            .list_email_messages("nonexistent@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }
}
