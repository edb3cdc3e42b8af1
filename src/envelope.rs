//! Request headers and the two envelope conventions.
//!
//! - **Signed**: `{"request":{"head":{..},"body":{..}},"signature":".."}`. The signature covers
//!   the canonical bytes of `request`.
//! - **Legacy**: the bare body, with `Client-Id`, `Request-Time` and `Signature` sent as HTTP
//!   headers. The signature covers the canonical bytes of the body alone.

use chrono::{DateTime, FixedOffset};
use http::{HeaderMap, HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    canonical::canonical_bytes,
    config::GatewayConfig,
    errors::{Error, Result},
    operation::{EnvelopeStyle, Operation},
    signer::KeyMaterial,
    transport::WireRequest,
    types::format_timestamp,
};

pub const HEADER_CLIENT_ID: HeaderName = HeaderName::from_static("client-id");
pub const HEADER_REQUEST_TIME: HeaderName = HeaderName::from_static("request-time");
pub const HEADER_SIGNATURE: HeaderName = HeaderName::from_static("signature");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    pub version: String,
    pub function: String,
    pub client_id: String,
    pub req_time: String,
    /// Fresh per call.
    pub req_msg_id: String,
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<String>,
}

/// The signed part of a request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request<B> {
    pub head: RequestHeader,
    pub body: B,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope<B> {
    pub request: Request<B>,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseHeader {
    pub function: String,
    pub client_id: String,
    pub version: String,
    pub resp_time: String,
    /// Echo of the request's message id.
    pub req_msg_id: String,
}

/// The signed part of a response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<B> {
    pub head: ResponseHeader,
    pub body: B,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<B> {
    pub response: Response<B>,
    pub signature: String,
}

/// A request ready for the transport, with the header it was built from.
#[derive(Debug, Clone)]
pub struct SealedRequest {
    pub header: RequestHeader,
    pub wire: WireRequest,
}

/// Builds headers and envelopes for one client.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeBuilder<'a> {
    pub config: &'a GatewayConfig,
    pub keys: &'a KeyMaterial,
}

impl<'a> EnvelopeBuilder<'a> {
    pub fn new(config: &'a GatewayConfig, keys: &'a KeyMaterial) -> Self {
        EnvelopeBuilder { config, keys }
    }

    /// Header for one call, stamped with `sent_at` and a new message id.
    pub fn header(
        &self,
        function: &str,
        access_token: Option<&str>,
        sent_at: &DateTime<FixedOffset>,
    ) -> RequestHeader {
        RequestHeader {
            version: self.config.version.clone(),
            function: function.to_string(),
            client_id: self.config.client_id.clone(),
            req_time: format_timestamp(sent_at),
            req_msg_id: Uuid::new_v4().to_string(),
            client_secret: self.config.client_secret.clone(),
            access_token: access_token
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            reserve: None,
        }
    }

    /// Wrap, sign and encode `body` the way `operation` expects.
    pub fn seal<B: Serialize>(
        &self,
        operation: Operation,
        body: &B,
        access_token: Option<&str>,
        sent_at: &DateTime<FixedOffset>,
    ) -> Result<SealedRequest> {
        let header = self.header(operation.function(), access_token, sent_at);

        let wire = match operation.envelope_style() {
            EnvelopeStyle::Signed => self.signed(operation, header.clone(), body)?,
            EnvelopeStyle::Legacy => self.legacy(operation, &header, body)?,
        };

        Ok(SealedRequest { header, wire })
    }

    fn signed<B: Serialize>(
        &self,
        operation: Operation,
        head: RequestHeader,
        body: &B,
    ) -> Result<WireRequest> {
        let request = Request { head, body };
        let signature = self.sign(operation, &request)?;
        let envelope = RequestEnvelope { request, signature };

        Ok(WireRequest {
            method: Method::POST,
            path: operation.path(),
            headers: json_headers(),
            body: encode(operation, &envelope)?,
        })
    }

    fn legacy<B: Serialize>(
        &self,
        operation: Operation,
        header: &RequestHeader,
        body: &B,
    ) -> Result<WireRequest> {
        let signature = self.sign(operation, body)?;

        let mut headers = json_headers();
        for (name, value) in [
            (HEADER_CLIENT_ID, header.client_id.as_str()),
            (HEADER_REQUEST_TIME, header.req_time.as_str()),
            (HEADER_SIGNATURE, signature.as_str()),
        ] {
            let value = HeaderValue::from_str(value).map_err(|err| Error::RequestConstruction {
                operation: operation.function(),
                source: err.into(),
            })?;
            headers.insert(name, value);
        }

        Ok(WireRequest {
            method: Method::POST,
            path: operation.path(),
            headers,
            body: encode(operation, body)?,
        })
    }

    fn sign<T: Serialize + ?Sized>(&self, operation: Operation, value: &T) -> Result<String> {
        let canonical = encode(operation, value)?;
        self.keys
            .sign(&canonical)
            .map_err(|source| Error::Signature {
                operation: operation.function(),
                source,
            })
    }
}

fn encode<T: Serialize + ?Sized>(operation: Operation, value: &T) -> Result<Vec<u8>> {
    canonical_bytes(value).map_err(|source| Error::RequestConstruction {
        operation: operation.function(),
        source,
    })
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
