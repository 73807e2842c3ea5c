//! Temp Mail API client: request construction and response dispatch.
//!
//! The [`Client`] type is the main entry point. Endpoint wrappers live in
//! [`crate::api`]; they all go through [`Client::request`] /
//! [`Client::json_request`] and the checked [`Client::send`] /
//! [`Client::send_json`].

use crate::{
    error::ApiError,
    request::Request,
    response::Response,
    transport::{Body, BoxError, Cancelled, ReqwestTransport, Transport},
    Error, Result,
};
use bytes::Bytes;
use http::{
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
    HeaderMap, HeaderValue, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.temp-mail.io";

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "x-api-key";

/// Client identification sent as `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("tempmail-rs/", env!("CARGO_PKG_VERSION"));

/// An async client for the Temp Mail API.
///
/// Configuration is fixed at construction and shared between clones, so a
/// client can be cloned freely and used from many tasks at once.
///
/// # Examples
///
/// ```no_run
/// use tempmail::{Client, CreateEmailOptions};
///
/// # async fn example() -> Result<(), tempmail::Error> {
/// let client = Client::new("YOUR_API_KEY");
///
/// let email = client.create_email(CreateEmailOptions::default()).await?;
/// println!("Created {} (valid for {:?})", email.email, email.ttl);
///
/// let messages = client.list_email_messages(&email.email).await?;
/// println!("{} messages, {} requests left", messages.len(), messages.rate.remaining);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
    cancellation: Option<CancellationToken>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    api_key: String,
    base_url: String,
    user_agent: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("user_agent", &self.inner.user_agent)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client with the default base URL and a fresh `reqwest` transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_parts(
            Arc::new(ReqwestTransport::default()),
            api_key.into(),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_USER_AGENT.to_string(),
        )
    }

    /// Creates a `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), tempmail::Error> {
    /// let client = tempmail::Client::builder("YOUR_API_KEY")
    ///     .timeout(Duration::from_secs(10))
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    fn from_parts(
        transport: Arc<dyn Transport>,
        api_key: String,
        base_url: String,
        user_agent: String,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                api_key,
                base_url,
                user_agent,
            }),
            cancellation: None,
        }
    }

    /// Returns a client sharing this configuration whose calls are bound to `token`.
    ///
    /// Calls made after the token is cancelled fail with
    /// [`Error::Construction`] before anything is sent; calls in flight when
    /// it fires fail with an [`Error::Transport`] for which
    /// [`Error::is_cancelled`] returns `true`.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancellation: Some(token),
        }
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds a request without a body.
    ///
    /// `path` is appended verbatim to the base URL, so it must already be
    /// escaped where needed.
    pub fn request(&self, method: Method, path: &str) -> Result<Request> {
        self.build_request(method, path, None)
    }

    /// Builds a request with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `body` cannot be represented as
    /// JSON, plus everything [`Client::request`] can return.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::Method;
    ///
    /// let client = tempmail::Client::new("API_KEY");
    /// let request = client
    ///     .json_request(Method::POST, "/v1/emails", &serde_json::json!({"domain": "example.com"}))
    ///     .unwrap();
    ///
    /// assert_eq!(request.url().as_str(), "https://api.temp-mail.io/v1/emails");
    /// assert_eq!(request.header("x-api-key"), Some("API_KEY"));
    /// ```
    pub fn json_request<B>(&self, method: Method, path: &str, body: &B) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.build_request(method, path, Some(Bytes::from(body)))
    }

    fn build_request(&self, method: Method, path: &str, body: Option<Bytes>) -> Result<Request> {
        if self.is_cancelled() {
            return Err(Error::Construction(Cancelled.to_string()));
        }

        let url = Url::parse(&format!("{}{}", self.inner.base_url, path))
            .map_err(|e| Error::Construction(format!("Invalid URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        let mut api_key = header_value("API key", &self.inner.api_key)?;
        api_key.set_sensitive(true);
        headers.insert(HEADER_API_KEY, api_key);
        headers.insert(USER_AGENT, header_value("user agent", &self.inner.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(Request::new(method, url, headers, body))
    }

    /// Sends a request and returns the unchecked response.
    ///
    /// The status code is not inspected. The caller owns the returned
    /// [`Body`]; it is released when read or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if no response was obtained.
    pub async fn send_raw(&self, request: Request) -> Result<Response<Body>> {
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "Executing HTTP request"
        );

        let response = self
            .cancellable(self.inner.transport.send(request))
            .await
            .map_err(Error::Transport)?;
        let response = Response::from_http(response);

        tracing::debug!(
            status = response.status.as_u16(),
            rate_remaining = response.rate.remaining,
            "Received HTTP response"
        );

        Ok(response)
    }

    /// Sends a request and checks the status, discarding a successful body.
    ///
    /// The returned envelope still carries the status, headers and rate
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for non-2xx responses with a well-formed error
    /// body, [`Error::Decode`] when that body is malformed, and
    /// [`Error::Transport`] for network failures.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let response = self.send_checked(request).await?;
        Ok(response.map(drop))
    }

    /// Sends a request, checks the status, and decodes a successful body as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`Client::send`], plus [`Error::Decode`] when a successful body
    /// is not valid JSON for `T`.
    pub async fn send_json<T>(&self, request: Request) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let (bytes, response) = self.send_bytes(request).await?.into_parts();

        match serde_json::from_slice::<T>(&bytes) {
            Ok(data) => Ok(response.map(|()| data)),
            Err(source) => {
                tracing::debug!(
                    error = %source,
                    status = response.status.as_u16(),
                    "Failed to decode response"
                );

                Err(Error::Decode {
                    status: response.status,
                    raw_body: String::from_utf8_lossy(&bytes).into_owned(),
                    source,
                })
            }
        }
    }

    /// Sends a request, checks the status, and reads a successful body into memory.
    pub(crate) async fn send_bytes(&self, request: Request) -> Result<Response<Bytes>> {
        let (body, response) = self.send_checked(request).await?.into_parts();
        let bytes = self.read_body(body).await?;
        Ok(response.map(|()| bytes))
    }

    async fn send_checked(&self, request: Request) -> Result<Response<Body>> {
        let response = self.send_raw(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let (body, response) = response.into_parts();
        let bytes = self.read_body(body).await?;
        let err = ApiError::decode(response, &bytes)?;

        tracing::debug!(
            status = err.status().as_u16(),
            error_type = %err.error.error_type,
            code = %err.error.code,
            request_id = %err.meta.request_id,
            "API returned an error"
        );

        Err(err.into())
    }

    async fn read_body(&self, body: Body) -> Result<Bytes> {
        self.cancellable(body.bytes())
            .await
            .map_err(Error::Transport)
    }

    async fn cancellable<T, F>(&self, fut: F) -> std::result::Result<T, BoxError>
    where
        F: Future<Output = std::result::Result<T, BoxError>>,
    {
        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(BoxError::from(Cancelled)),
                result = fut => result,
            },
            None => fut.await,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Construction(format!("Invalid {} header value: {}", what, e)))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use tempmail::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), tempmail::Error> {
/// let client = ClientBuilder::new("YOUR_API_KEY")
///     .base_url("https://api.temp-mail.io")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            http_client: None,
            transport: None,
        }
    }

    /// Overrides the base URL, e.g. to point at a mock server.
    ///
    /// A trailing slash is ignored.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a per-request timeout on the default `reqwest` transport.
    ///
    /// Ignored when a custom transport is supplied with [`ClientBuilder::transport`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses an existing `reqwest::Client` for the default transport.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the default transport entirely.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the base URL is not a valid URL.
    pub fn build(self) -> Result<Client> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::Construction(format!("Invalid base URL: {}", e)))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut transport =
                    ReqwestTransport::new(self.http_client.unwrap_or_default());
                if let Some(timeout) = self.timeout {
                    transport = transport.with_timeout(timeout);
                }
                Arc::new(transport)
            }
        };

        Ok(Client::from_parts(
            transport,
            self.api_key,
            base_url,
            self.user_agent,
        ))
    }
}
