#![allow(dead_code)]

use std::sync::{Mutex, OnceLock};

use dana_kit::{
    GatewayClient, GatewayConfig, KeyMaterial,
    canonical::canonical_bytes,
    transport::{Transport, TransportError, WireRequest, WireResponse},
};
use rsa::{
    RsaPrivateKey,
    pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding},
};
use serde_json::{Value, json};
use url::Url;

pub struct KeyPair {
    pub private_pem: String,
    pub public_pem: String,
}

impl KeyPair {
    fn generate() -> Self {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        KeyPair {
            private_pem: private_key.to_pkcs8_pem(LineEnding::LF).unwrap().to_string(),
            public_pem: private_key
                .to_public_key()
                .to_public_key_pem(LineEnding::LF)
                .unwrap(),
        }
    }
}

pub fn merchant() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(KeyPair::generate)
}

pub fn gateway() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(KeyPair::generate)
}

/// What the merchant holds: its own private key and the gateway's public key.
pub fn client_keys() -> KeyMaterial {
    KeyMaterial::from_pem(&merchant().private_pem, &gateway().public_pem).unwrap()
}

/// What the gateway holds.
pub fn gateway_keys() -> KeyMaterial {
    KeyMaterial::from_pem(&gateway().private_pem, &merchant().public_pem).unwrap()
}

pub fn config(base_url: Url) -> GatewayConfig {
    GatewayConfig::builder()
        .base_url(base_url)
        .client_id("2018122812174155679466")
        .client_secret("client-secret")
        .log_payloads(true)
        .build()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

type Handler = Box<dyn Fn(&WireRequest) -> Result<WireResponse, TransportError> + Send + Sync>;

/// Answers every request with `handler` and records what was sent.
pub struct MockTransport {
    handler: Handler,
    pub requests: Mutex<Vec<WireRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&WireRequest) -> Result<WireResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        MockTransport {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

pub fn client(transport: MockTransport) -> GatewayClient<MockTransport> {
    init_tracing();
    GatewayClient::with_transport(
        config(Url::parse("https://api.sandbox.dana.example").unwrap()),
        client_keys(),
        transport,
    )
}

/// The decoded body of a signed request envelope.
pub fn envelope_of(request: &WireRequest) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

/// A response envelope signed with `keys`, echoing the request's function and message id.
pub fn signed_response_with(keys: &KeyMaterial, request: &WireRequest, body: Value) -> Vec<u8> {
    let head = &envelope_of(request)["request"]["head"];
    let response = json!({
        "head": {
            "function": head["function"],
            "clientId": head["clientId"],
            "version": "2.0",
            "respTime": "2026-10-19T10:00:01+07:00",
            "reqMsgId": head["reqMsgId"]
        },
        "body": body
    });
    let signature = keys.sign(&canonical_bytes(&response).unwrap()).unwrap();

    serde_json::to_vec(&json!({ "response": response, "signature": signature })).unwrap()
}

/// A correctly signed gateway response.
pub fn signed_response(request: &WireRequest, body: Value) -> WireResponse {
    WireResponse::ok(signed_response_with(&gateway_keys(), request, body))
}

pub fn success() -> Value {
    json!({ "resultStatus": "S", "resultCodeId": "00000000", "resultCode": "SUCCESS", "resultMsg": "success" })
}
