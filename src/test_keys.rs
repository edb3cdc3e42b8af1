//! RSA key pairs shared by unit tests. Generated once per test binary.

use std::sync::OnceLock;

use rsa::{
    RsaPrivateKey,
    pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding},
};

use crate::{config::GatewayConfig, signer::KeyMaterial};

pub struct TestKeyPair {
    pub private_key: RsaPrivateKey,
    pub private_pem: String,
    pub public_pem: String,
}

impl TestKeyPair {
    fn generate() -> Self {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let private_pem = private_key.to_pkcs8_pem(LineEnding::LF).unwrap().to_string();
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        TestKeyPair {
            private_key,
            private_pem,
            public_pem,
        }
    }
}

pub fn merchant_pair() -> &'static TestKeyPair {
    static PAIR: OnceLock<TestKeyPair> = OnceLock::new();
    PAIR.get_or_init(TestKeyPair::generate)
}

pub fn gateway_pair() -> &'static TestKeyPair {
    static PAIR: OnceLock<TestKeyPair> = OnceLock::new();
    PAIR.get_or_init(TestKeyPair::generate)
}

/// Merchant signing key plus gateway verification key.
pub fn client_keys() -> KeyMaterial {
    KeyMaterial::from_pem(&merchant_pair().private_pem, &gateway_pair().public_pem).unwrap()
}

/// The gateway's own view: signs with the gateway key, verifies merchant signatures.
pub fn gateway_keys() -> KeyMaterial {
    KeyMaterial::from_pem(&gateway_pair().private_pem, &merchant_pair().public_pem).unwrap()
}

pub fn config() -> GatewayConfig {
    GatewayConfig::builder()
        .base_url(url::Url::parse("https://api.sandbox.dana.example").unwrap())
        .client_id("2018122812174155679466")
        .client_secret("client-secret")
        .build()
}
