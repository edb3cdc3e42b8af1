use std::{fmt::Debug, time::Duration};

use bon::Builder;
use url::Url;

/// Protocol version placed in every request header unless overridden.
pub const DEFAULT_VERSION: &str = "2.0";

/// Upper bound for a single gateway round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Static client configuration, shared read-only by every call.
#[derive(Builder, Clone)]
pub struct GatewayConfig {
    /// Gateway base URL, e.g. `https://api.saas.dana.id`. Operation paths are appended to it.
    pub base_url: Url,
    /// Protocol version sent in the request header.
    #[builder(into, default = DEFAULT_VERSION.to_string())]
    pub version: String,
    /// Merchant client id issued by the gateway.
    #[builder(into)]
    pub client_id: String,
    /// Merchant client secret issued by the gateway.
    #[builder(into)]
    pub client_secret: String,
    /// Timeout applied to each transport call.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Emit raw response bodies as `trace` events.
    #[builder(default)]
    pub log_payloads: bool,
}

impl Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("log_payloads", &self.log_payloads)
            .finish()
    }
}
