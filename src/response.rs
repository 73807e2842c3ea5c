//! Response envelope carrying status, headers, and rate limit metadata.
//!
//! The [`Response`] type wraps the payload of a call along with the HTTP
//! status, the response headers, and the [`Rate`] snapshot parsed from them.

use crate::rate_limit::Rate;
use crate::transport::Body;
use http::{HeaderMap, StatusCode};

/// A response from the Temp Mail API.
///
/// `T` is the payload: a decoded model for most endpoints, `()` when the
/// endpoint returns nothing useful, or a raw [`Body`] when the caller asked
/// for the unchecked response via [`Client::send_raw`](crate::Client::send_raw).
///
/// `Response<T>` dereferences to `T`, so payload fields can be read directly.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), tempmail::Error> {
/// let client = tempmail::Client::new("YOUR_API_KEY");
///
/// let response = client.list_domains().await?;
/// println!("Status: {}", response.status);
/// println!("Remaining requests: {}", response.rate.remaining);
/// for domain in response.iter() {
///     println!("{} ({:?})", domain.name, domain.domain_type);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T = ()> {
    /// The response payload.
    pub data: T,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Rate limit snapshot.
    ///
    /// Parsed from the `X-Ratelimit-*` headers, except for
    /// [`Client::rate_limit`](crate::Client::rate_limit) where it holds the
    /// counters reported in the body.
    pub rate: Rate,
}

impl<T> Response<T> {
    /// Creates a new `Response`, deriving the rate snapshot from `headers`.
    pub fn new(data: T, status: StatusCode, headers: HeaderMap) -> Self {
        let rate = Rate::from_headers(&headers);
        Self {
            data,
            status,
            headers,
            rate,
        }
    }

    /// Maps the payload to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempmail::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// let response = Response::new(42, StatusCode::OK, HeaderMap::new());
    ///
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
            rate: self.rate,
        }
    }

    /// Splits the response into its payload and a payload-less envelope.
    pub fn into_parts(self) -> (T, Response<()>) {
        let Response {
            data,
            status,
            headers,
            rate,
        } = self;
        (
            data,
            Response {
                data: (),
                status,
                headers,
                rate,
            },
        )
    }

    /// Consumes the response and returns the payload.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Returns `true` if the status code is in `200..300`.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a reference to a header value by name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempmail::Response;
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response = Response::new((), StatusCode::OK, headers);
    /// assert_eq!(response.header("content-type"), Some("application/json"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl Response<Body> {
    pub(crate) fn from_http(response: http::Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        Self::new(body, parts.status, parts.headers)
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
