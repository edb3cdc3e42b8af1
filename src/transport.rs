//! The boundary between the dispatcher and the HTTP stack.
//!
//! A [`Transport`] sends one [`WireRequest`] and hands back the raw status and body. It owns
//! connection-level concerns (pooling, TLS, timeouts); everything above it is protocol.

use http::{HeaderMap, Method, StatusCode};

/// An encoded request, addressed relative to the gateway base URL.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    /// Operation path, without a leading slash.
    pub path: &'static str,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A raw response. The body is untouched.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        WireResponse {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        WireResponse::new(StatusCode::OK, body)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    /// The gateway answered with something other than `200 OK`. The body is kept verbatim.
    #[error("unexpected HTTP status {status}")]
    Status { status: StatusCode, body: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Sends wire requests to the gateway.
///
/// Implementations must be safe to share between concurrent calls.
pub trait Transport {
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<WireResponse, TransportError>> + Send;
}
