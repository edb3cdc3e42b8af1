use std::time::Duration;

use url::Url;

use crate::{
    config::GatewayConfig,
    transport::{Transport, TransportError, WireRequest, WireResponse},
};

/// A [`Transport`] over HTTPS, backed by a pooled `reqwest::Client`.
///
/// Every request is bounded by the configured timeout; expiry surfaces as
/// [`TransportError::Timeout`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub base_url: Url,
    pub client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(HttpTransport { base_url, client })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, TransportError> {
        HttpTransport::new(config.base_url.clone(), config.timeout)
    }

    /// Use an existing client, e.g. one shared with the rest of the application.
    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        HttpTransport { base_url, client }
    }

    /// `{base_url}/{path}`, regardless of trailing or leading slashes.
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Client(Box::new(err))
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let response = self
            .client
            .request(request.method, self.endpoint(request.path)?)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(WireResponse {
            status,
            body: body.to_vec(),
        })
    }
}
