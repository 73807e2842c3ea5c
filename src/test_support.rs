//! In-memory transport double shared by the unit tests.

use crate::transport::{Body, BoxError, BoxFuture, Transport};
use crate::{Client, Request};
use bytes::Bytes;
use std::sync::{Arc, Mutex};

pub(crate) const ERROR_RESPONSE: &str = r#"{
  "error": {
    "type": "request_error",
    "code": "not_found",
    "detail": "Attachment not found"
  },
  "meta": {
    "request_id": "req_123456789"
  }
}"#;

#[derive(Debug, Clone)]
enum BodyMode {
    Full,
    FailMidStream(String),
    Pending,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<Request>,
    send_error: Option<String>,
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
    body_mode: BodyMode,
}

/// Records every request and answers with a canned response.
#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                send_error: None,
                status,
                headers: Vec::new(),
                body: body.into(),
                body_mode: BodyMode::Full,
            })),
        }
    }

    /// A transport whose `send` always fails with `message`.
    pub(crate) fn failing(message: impl Into<String>) -> Self {
        let transport = Self::new(200, "");
        transport.state.lock().unwrap().send_error = Some(message.into());
        transport
    }

    pub(crate) fn with_header(self, name: &str, value: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .headers
            .push((name.to_string(), value.to_string()));
        self
    }

    /// The body yields one chunk and then fails with `message`.
    pub(crate) fn with_failing_body(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().body_mode = BodyMode::FailMidStream(message.into());
        self
    }

    /// The body never yields.
    pub(crate) fn with_pending_body(self) -> Self {
        self.state.lock().unwrap().body_mode = BodyMode::Pending;
        self
    }

    pub(crate) fn last_request(&self) -> Option<Request> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<http::Response<Body>, BoxError>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);

            if let Some(message) = &state.send_error {
                return Err(message.clone().into());
            }

            let body = match &state.body_mode {
                BodyMode::Full => Body::from(state.body.clone()),
                BodyMode::FailMidStream(message) => {
                    let chunks: Vec<Result<Bytes, BoxError>> = vec![
                        Ok(Bytes::from_static(b"partial")),
                        Err(message.clone().into()),
                    ];
                    Body::from_stream(futures::stream::iter(chunks))
                }
                BodyMode::Pending => Body::from_stream(futures::stream::pending()),
            };

            let mut builder = http::Response::builder().status(state.status);
            for (name, value) in &state.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            Ok(builder.body(body)?)
        })
    }
}

/// A client with the default base URL and API key `API_KEY`, backed by `transport`.
pub(crate) fn fake_client(transport: FakeTransport) -> Client {
    Client::builder("API_KEY")
        .transport(transport)
        .build()
        .unwrap()
}
