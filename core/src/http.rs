//! HTTP transport boundary.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`,
//! hands it to a `Transport`, and parses the `HttpResponse` it gets back, so
//! request construction and response decoding stay deterministic and testable
//! without a network. `UreqTransport` in `transport.rs` is the production
//! implementation; tests supply their own.

use thiserror::Error;

/// A fully-built GET request against the Todoist API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Remote method name, kept for diagnostics.
    pub method: String,
    /// `<base><method>?<query>`, already encoded.
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport could not complete the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

/// Performs the actual network call.
///
/// Implementations return whatever status the server answered with; the
/// client decides what counts as failure. No retries are expected here.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// Execute `request` and return the body of a 2xx response.
///
/// Non-2xx statuses are folded into `TransportFailure` so callers see one
/// failure shape regardless of where the exchange broke.
pub(crate) fn fetch(
    transport: &dyn Transport,
    request: &HttpRequest,
) -> Result<String, TransportFailure> {
    let response = transport.execute(request)?;
    if !response.is_success() {
        return Err(TransportFailure(format!(
            "HTTP {}: {}",
            response.status, response.body
        )));
    }
    Ok(response.body)
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned outcomes in order and records every URL it was asked for.
    #[derive(Default)]
    pub(crate) struct StubTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl StubTransport {
        pub(crate) fn replying(body: &str) -> Self {
            let stub = Self::default();
            stub.push(Ok(HttpResponse::ok(body)));
            stub
        }

        pub(crate) fn failing(reason: &str) -> Self {
            let stub = Self::default();
            stub.push(Err(TransportFailure(reason.to_string())));
            stub
        }

        pub(crate) fn push(&self, reply: Result<HttpResponse, TransportFailure>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub(crate) fn last_url(&self) -> String {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
            self.calls.lock().unwrap().push(request.url.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::ok("null")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stub::StubTransport;
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: "getProjects".to_string(),
            url: "https://todoist.com/API/getProjects?token=t".to_string(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn fetch_returns_body_on_success() {
        let stub = StubTransport::replying("[]");
        assert_eq!(fetch(&stub, &request()).unwrap(), "[]");
    }

    #[test]
    fn fetch_folds_error_status_into_failure() {
        let stub = StubTransport::default();
        stub.push(Ok(HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: "unauthorized".to_string(),
        }));
        let err = fetch(&stub, &request()).unwrap_err();
        assert_eq!(err, TransportFailure("HTTP 401: unauthorized".to_string()));
    }

    #[test]
    fn fetch_passes_transport_failure_through() {
        let stub = StubTransport::failing("connection refused");
        let err = fetch(&stub, &request()).unwrap_err();
        assert_eq!(err.0, "connection refused");
        assert_eq!(stub.call_count(), 1);
    }
}
