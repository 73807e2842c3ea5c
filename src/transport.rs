//! Transport capability the [`Client`](crate::Client) sends requests through.
//!
//! The client never talks to the network directly. It hands a fully built
//! [`Request`] to a [`Transport`] and gets back an [`http::Response`] whose
//! body is a [`Body`] stream. The default implementation is backed by
//! `reqwest`; tests and callers with special needs can plug in their own.

use crate::request::Request;
use bytes::{Bytes, BytesMut};
use futures::{Stream, TryStreamExt};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A boxed, sendable future, used by [`Transport`] so the trait stays object safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type-erased error returned by transports and body streams.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A stream of body chunks, any of which may fail.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// Something that can send a prepared request and return the raw response.
///
/// Implementations own connection handling, TLS, redirects and timeouts.
/// A returned error means the request never produced an HTTP response
/// (DNS failure, refused connection, timeout, ...).
///
/// # Examples
///
/// ```
/// use tempmail::transport::{Body, BoxError, BoxFuture, Transport};
/// use tempmail::Request;
///
/// struct AlwaysOk;
///
/// impl Transport for AlwaysOk {
///     fn send(&self, _request: Request) -> BoxFuture<'_, Result<http::Response<Body>, BoxError>> {
///         Box::pin(async { Ok(http::Response::new(Body::from("{}"))) })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends `request` and resolves to the response head plus a streaming body.
    fn send(&self, request: Request) -> BoxFuture<'_, Result<http::Response<Body>, BoxError>>;
}

/// The body of a response, either already in memory or still streaming.
///
/// A `Body` is consumed by value, so it is released exactly once: either by
/// reading it with [`Body::bytes`] or by dropping it.
pub struct Body {
    inner: BodyInner,
}

enum BodyInner {
    Full(Bytes),
    Stream(BodyStream),
}

impl Body {
    /// An empty body.
    pub fn empty() -> Self {
        Self::from(Bytes::new())
    }

    /// Wraps a chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, BoxError>> + Send + 'static,
    {
        Self {
            inner: BodyInner::Stream(Box::pin(stream)),
        }
    }

    /// Reads the whole body into memory.
    ///
    /// Fails with the first error produced by the underlying stream; a
    /// partially read body is never returned.
    pub async fn bytes(self) -> Result<Bytes, BoxError> {
        match self.inner {
            BodyInner::Full(bytes) => Ok(bytes),
            BodyInner::Stream(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.try_next().await? {
                    buf.extend_from_slice(&chunk);
                }
                Ok(buf.freeze())
            }
        }
    }

    /// Converts the body into a chunk stream.
    pub fn into_stream(self) -> BodyStream {
        match self.inner {
            BodyInner::Full(bytes) => Box::pin(futures::stream::once(async move { Ok(bytes) })),
            BodyInner::Stream(stream) => stream,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            BodyInner::Full(bytes) => f.debug_tuple("Body").field(&bytes.len()).finish(),
            BodyInner::Stream(_) => f.write_str("Body(<stream>)"),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self {
            inner: BodyInner::Full(bytes),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from(Bytes::from_static(text.as_bytes()))
    }
}

/// Error used as the [`Error::Transport`](crate::Error::Transport) source when
/// the client's cancellation token fires while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request cancelled")]
pub struct Cancelled;

/// The default transport, backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest::Client`.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Applies `timeout` to every request sent through this transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<http::Response<Body>, BoxError>> {
        Box::pin(async move {
            let (method, url, headers, body) = request.into_parts();

            let mut builder = self.client.request(method, url).headers(headers);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(body) = body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;

            let status = response.status();
            let headers = response.headers().clone();
            let stream = response
                .bytes_stream()
                .map_err(|e| Box::new(e) as BoxError);

            let mut http_response = http::Response::new(Body::from_stream(stream));
            *http_response.status_mut() = status;
            *http_response.headers_mut() = headers;
            Ok(http_response)
        })
    }
}
