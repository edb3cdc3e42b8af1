//! The gateway dispatcher.
//!
//! [`GatewayClient`] runs each operation as one round trip:
//!
//! 1. **Prepare**: apply the operation's request adjustments (amount conversion).
//! 2. **Seal**: build the header, wrap the body and sign it ([`EnvelopeBuilder`]).
//! 3. **Send**: hand the wire request to the [`Transport`].
//! 4. **Check status**: anything but `200 OK` fails the call before the body is parsed.
//! 5. **Verify**: signed operations check the response signature against the gateway key.
//!    Legacy operations skip this step explicitly.
//! 6. **Project**: map the response body onto the typed result.
//!
//! Failures end the call at the step where they happen. Nothing is retried.

use http::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::value::RawValue;

use crate::{
    canonical::canonical_bytes,
    config::GatewayConfig,
    envelope::{EnvelopeBuilder, Response, ResponseHeader},
    errors::{Error, Result, SignatureError},
    mapping::project,
    operation::{
        ApplyAccessToken, CreateOrder, Endpoint, EnvelopeStyle, InquiryUserInfo, Operation,
        QueryOrder, QueryUserProfile, Refund,
    },
    signer::KeyMaterial,
    transport::{Transport, TransportError, WireResponse},
    types::{
        AnyJson, ApplyTokenRequest, ApplyTokenResponse, InquiryUserInfoRequest,
        InquiryUserInfoResponse, OrderDetail, OrderQueryRequest, OrderRequest, OrderResponse,
        RefundRequest, RefundResponse, UserProfileRequest, UserProfileResponse, now,
    },
};

#[cfg(feature = "http-client")]
use crate::http_client::HttpTransport;

/// Whether a response's signature was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The signature matched the gateway key.
    Verified,
    /// The operation uses the legacy envelope, whose responses are never signed.
    Skipped,
}

/// A typed result of one operation.
#[derive(Debug, Clone)]
pub struct GatewayResponse<T> {
    /// Response head. `None` for legacy operations, which have no head.
    pub head: Option<ResponseHeader>,
    pub body: T,
    pub verification: Verification,
}

impl<T> GatewayResponse<T> {
    pub fn into_body(self) -> T {
        self.body
    }
}

/// Client for the gateway API.
///
/// Configuration and key material are fixed at construction, so one client can serve any
/// number of concurrent calls.
#[derive(Debug, Clone)]
pub struct GatewayClient<T: Transport> {
    config: GatewayConfig,
    keys: KeyMaterial,
    transport: T,
    #[cfg(feature = "tracing")]
    span: tracing::Span,
}

#[cfg(feature = "http-client")]
impl GatewayClient<HttpTransport> {
    /// Client talking HTTPS to `config.base_url`.
    ///
    /// Fails with [`Error::ClientSetup`] when the HTTP client cannot be built.
    pub fn new(config: GatewayConfig, keys: KeyMaterial) -> Result<Self> {
        let transport =
            HttpTransport::from_config(&config).map_err(|source| Error::ClientSetup { source })?;
        Ok(GatewayClient::with_transport(config, keys, transport))
    }
}

impl<T: Transport> GatewayClient<T> {
    pub fn with_transport(config: GatewayConfig, keys: KeyMaterial, transport: T) -> Self {
        GatewayClient {
            #[cfg(feature = "tracing")]
            span: tracing::info_span!("dana_gateway", client_id = %config.client_id),
            config,
            keys,
            transport,
        }
    }

    /// Emit this client's events inside `span` instead of the default one.
    #[cfg(feature = "tracing")]
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn envelopes(&self) -> EnvelopeBuilder<'_> {
        EnvelopeBuilder::new(&self.config, &self.keys)
    }

    pub(crate) fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Create an order. The order amount is sent in minor units.
    pub async fn create_order(
        &self,
        request: &OrderRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<OrderResponse>> {
        self.call::<CreateOrder>(request, access_token).await
    }

    pub async fn query_order(
        &self,
        request: &OrderQueryRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<OrderDetail>> {
        self.call::<QueryOrder>(request, access_token).await
    }

    /// Refund an order. The refund amount is sent in minor units.
    pub async fn refund(
        &self,
        request: &RefundRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<RefundResponse>> {
        self.call::<Refund>(request, access_token).await
    }

    pub async fn apply_access_token(
        &self,
        request: &ApplyTokenRequest,
    ) -> Result<GatewayResponse<ApplyTokenResponse>> {
        self.call::<ApplyAccessToken>(request, None).await
    }

    pub async fn query_user_profile(
        &self,
        request: &UserProfileRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<UserProfileResponse>> {
        self.call::<QueryUserProfile>(request, access_token).await
    }

    /// Look up user info through the legacy API. The response is not signed.
    pub async fn inquiry_user_info(
        &self,
        request: &InquiryUserInfoRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<InquiryUserInfoResponse>> {
        self.call::<InquiryUserInfo>(request, access_token).await
    }

    /// Run any [`Endpoint`] through the full request/response cycle.
    pub async fn call<E: Endpoint>(
        &self,
        request: &E::Request,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<E::Response>> {
        let dispatch = self.dispatch::<E>(request, access_token);

        #[cfg(feature = "tracing")]
        let dispatch = tracing::Instrument::instrument(dispatch, self.span.clone());

        dispatch.await
    }

    async fn dispatch<E: Endpoint>(
        &self,
        request: &E::Request,
        access_token: Option<&str>,
    ) -> Result<GatewayResponse<E::Response>> {
        let operation = E::OPERATION;
        let request = E::prepare(request);
        let sealed = self
            .envelopes()
            .seal(operation, request.as_ref(), access_token, &now())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = operation.function(),
            path = operation.path(),
            req_msg_id = %sealed.header.req_msg_id,
            "Sending gateway request"
        );

        #[cfg(feature = "tracing")]
        let started = std::time::Instant::now();

        let response = self
            .transport
            .send(sealed.wire)
            .await
            .map_err(|source| Error::Transport {
                operation: operation.function(),
                source,
            })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = operation.function(),
            status = %response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Gateway responded"
        );

        self.open(operation, response)
    }

    fn open<R: DeserializeOwned>(
        &self,
        operation: Operation,
        response: WireResponse,
    ) -> Result<GatewayResponse<R>> {
        if response.status != StatusCode::OK {
            return Err(Error::Transport {
                operation: operation.function(),
                source: TransportError::Status {
                    status: response.status,
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                },
            });
        }

        #[cfg(feature = "tracing")]
        if self.config.log_payloads {
            tracing::trace!(
                function = operation.function(),
                body = %String::from_utf8_lossy(&response.body),
                "Gateway response body"
            );
        }

        match operation.envelope_style() {
            EnvelopeStyle::Signed => self.open_signed(operation, &response.body),
            EnvelopeStyle::Legacy => {
                // Legacy responses are unsigned; any `signature` key they carry is ignored.
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    function = operation.function(),
                    "Skipping signature verification for legacy envelope"
                );

                let body: AnyJson = serde_json::from_slice(&response.body)
                    .map_err(|source| Error::Deserialization {
                        operation: operation.function(),
                        source,
                    })?;

                Ok(GatewayResponse {
                    head: None,
                    body: self.project(operation, body)?,
                    verification: Verification::Skipped,
                })
            }
        }
    }

    fn open_signed<R: DeserializeOwned>(
        &self,
        operation: Operation,
        body: &[u8],
    ) -> Result<GatewayResponse<R>> {
        #[derive(Deserialize)]
        struct SignedResponse<'a> {
            #[serde(borrow)]
            response: &'a RawValue,
            #[serde(default)]
            signature: Option<String>,
        }

        let deserialization = |source| Error::Deserialization {
            operation: operation.function(),
            source,
        };

        let envelope: SignedResponse = serde_json::from_slice(body).map_err(deserialization)?;

        // The gateway signs the `response` object exactly as it sent it.
        self.verify(operation, envelope.response.get().as_bytes(), envelope.signature.as_deref())?;

        let response: Response<AnyJson> =
            serde_json::from_str(envelope.response.get()).map_err(deserialization)?;

        Ok(GatewayResponse {
            head: Some(response.head),
            body: self.project(operation, response.body)?,
            verification: Verification::Verified,
        })
    }

    fn verify(&self, operation: Operation, signed: &[u8], signature: Option<&str>) -> Result<()> {
        let result = match signature.filter(|s| !s.is_empty()) {
            Some(signature) => self.keys.verify(signed, signature),
            None => Err(SignatureError::MissingSignature),
        };

        result.map_err(|source| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                function = operation.function(),
                "Response signature verification failed: {source}"
            );

            Error::Signature {
                operation: operation.function(),
                source,
            }
        })
    }

    fn project<R: DeserializeOwned>(&self, operation: Operation, body: AnyJson) -> Result<R> {
        project(body).map_err(|source| Error::StructuralMapping {
            operation: operation.function(),
            source,
        })
    }

    /// Sign the canonical bytes of any value with the merchant key.
    pub fn sign_value<V: Serialize + ?Sized>(
        &self,
        value: &V,
    ) -> std::result::Result<String, SignatureError> {
        self.keys.sign(&canonical_bytes(value)?)
    }

    /// Verify a raw `{"request":..,"signature":..}` envelope sent by the gateway.
    pub fn verify_request(&self, raw: &[u8]) -> std::result::Result<(), SignatureError> {
        verify_signed_request(&self.keys, raw)
    }
}

/// Verify the signature over the verbatim `request` object of a raw envelope.
pub(crate) fn verify_signed_request(
    keys: &KeyMaterial,
    raw: &[u8],
) -> std::result::Result<(), SignatureError> {
    #[derive(Deserialize)]
    struct SignedRequest<'a> {
        #[serde(borrow)]
        request: &'a RawValue,
        #[serde(default)]
        signature: Option<String>,
    }

    let envelope: SignedRequest =
        serde_json::from_slice(raw).map_err(SignatureError::MalformedEnvelope)?;
    let signature = envelope
        .signature
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingSignature)?;

    keys.verify(envelope.request.get().as_bytes(), &signature)
}
