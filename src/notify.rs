//! Inbound payment-finish notifications.
//!
//! When an order completes, the gateway POSTs a signed `{"request":{..},"signature":".."}`
//! envelope to the merchant's notification URL. The merchant verifies it against the gateway
//! key and answers with its own signed `{"response":{..},"signature":".."}` acknowledgement.

use serde::{Deserialize, Serialize};

use crate::{
    canonical::canonical_bytes,
    envelope::{EnvelopeBuilder, Response, ResponseEnvelope, ResponseHeader},
    errors::{Error, Result, SignatureError},
    gateway::{GatewayClient, verify_signed_request},
    mapping::project,
    signer::KeyMaterial,
    transport::Transport,
    types::{Amount, AnyJson, ResultInfo, format_timestamp, now},
};

pub const FUNCTION_FINISH_NOTIFY: &str = "dana.acquiring.order.finishNotify";

/// Head of a gateway-initiated request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotifyHeader {
    pub version: String,
    pub function: String,
    pub client_id: String,
    pub req_time: String,
    pub req_msg_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishNotifyBody {
    pub acquirement_id: String,
    pub merchant_trans_id: String,
    #[serde(default)]
    pub finished_time: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    pub merchant_id: String,
    /// As sent by the gateway, i.e. in minor units.
    pub order_amount: Amount,
    /// e.g. `SUCCESS` or `CLOSED`.
    pub acquirement_status: String,
    #[serde(default)]
    pub extend_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishNotify {
    pub head: NotifyHeader,
    pub body: FinishNotifyBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishNotifyAck {
    pub result_info: ResultInfo,
}

impl FinishNotifyAck {
    /// The acknowledgement the gateway expects when the notification was accepted.
    pub fn success() -> Self {
        FinishNotifyAck {
            result_info: ResultInfo {
                result_status: Some("S".to_string()),
                result_code_id: Some("00000000".to_string()),
                result_code: Some("SUCCESS".to_string()),
                result_msg: Some("success".to_string()),
                result_message: None,
            },
        }
    }
}

/// Verify a raw notification against the gateway key, then decode it.
///
/// Nothing is decoded from an envelope whose signature does not check out.
pub fn verify_finish_notify(keys: &KeyMaterial, raw: &[u8]) -> Result<FinishNotify> {
    verify_signed_request(keys, raw).map_err(|source| match source {
        SignatureError::MalformedEnvelope(source) => Error::Deserialization {
            operation: FUNCTION_FINISH_NOTIFY,
            source,
        },
        source => Error::Signature {
            operation: FUNCTION_FINISH_NOTIFY,
            source,
        },
    })?;

    #[derive(Deserialize)]
    struct Envelope {
        request: AnyJson,
    }

    let envelope: Envelope =
        serde_json::from_slice(raw).map_err(|source| Error::Deserialization {
            operation: FUNCTION_FINISH_NOTIFY,
            source,
        })?;

    project(envelope.request).map_err(|source| Error::StructuralMapping {
        operation: FUNCTION_FINISH_NOTIFY,
        source,
    })
}

/// Encode the signed acknowledgement for `notify`.
///
/// The response head echoes the notification's function and message id.
pub fn finish_notify_ack(
    envelopes: &EnvelopeBuilder<'_>,
    notify: &FinishNotify,
    ack: FinishNotifyAck,
) -> Result<Vec<u8>> {
    let function = if notify.head.function.is_empty() {
        FUNCTION_FINISH_NOTIFY.to_string()
    } else {
        notify.head.function.clone()
    };

    let response = Response {
        head: ResponseHeader {
            function,
            client_id: envelopes.config.client_id.clone(),
            version: envelopes.config.version.clone(),
            resp_time: format_timestamp(&now()),
            req_msg_id: notify.head.req_msg_id.clone(),
        },
        body: ack,
    };

    let construction = |source| Error::RequestConstruction {
        operation: FUNCTION_FINISH_NOTIFY,
        source,
    };

    let signature = envelopes
        .keys
        .sign(&canonical_bytes(&response).map_err(construction)?)
        .map_err(|source| Error::Signature {
            operation: FUNCTION_FINISH_NOTIFY,
            source,
        })?;

    canonical_bytes(&ResponseEnvelope {
        response,
        signature,
    })
    .map_err(construction)
}

impl<T: Transport> GatewayClient<T> {
    /// See [`verify_finish_notify`].
    pub fn verify_finish_notify(&self, raw: &[u8]) -> Result<FinishNotify> {
        let notify = verify_finish_notify(self.keys(), raw);

        #[cfg(feature = "tracing")]
        match &notify {
            Ok(notify) => tracing::info!(
                acquirement_id = %notify.body.acquirement_id,
                status = %notify.body.acquirement_status,
                "Received finish notification"
            ),
            Err(err) => tracing::warn!("Rejected finish notification: {err}"),
        }

        notify
    }

    /// See [`finish_notify_ack`].
    pub fn finish_notify_ack(&self, notify: &FinishNotify, ack: FinishNotifyAck) -> Result<Vec<u8>> {
        finish_notify_ack(&self.envelopes(), notify, ack)
    }
}
