//! RSA (PKCS#1 v1.5, SHA-256) signing and verification of canonical bytes.
//!
//! Signatures travel as standard base64 strings.

use std::{fmt::Debug, path::Path};

use base64::{Engine, prelude::BASE64_STANDARD};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs1v15::{Signature, SigningKey, VerifyingKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    signature::{SignatureEncoding, Signer, Verifier},
};
use sha2::Sha256;

use crate::errors::SignatureError;

/// The key pair a client works with.
///
/// - The merchant's private key signs outgoing requests.
/// - The gateway's public key verifies incoming responses.
///
/// Key material is immutable once built. Its `Debug` output never includes key data.
#[derive(Clone)]
pub struct KeyMaterial {
    signing: Option<SigningKey<Sha256>>,
    verifying: VerifyingKey<Sha256>,
}

impl KeyMaterial {
    /// Build key material from PEM text.
    ///
    /// The private key may be PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`); the
    /// public key may be SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`).
    pub fn from_pem(private_key_pem: &str, gateway_public_key_pem: &str) -> Result<Self, SignatureError> {
        Ok(KeyMaterial {
            signing: Some(SigningKey::new(parse_private_key(private_key_pem)?)),
            verifying: VerifyingKey::new(parse_public_key(gateway_public_key_pem)?),
        })
    }

    /// Read both PEM files and build key material from them.
    pub fn from_pem_files(
        private_key_path: impl AsRef<Path>,
        gateway_public_key_path: impl AsRef<Path>,
    ) -> Result<Self, SignatureError> {
        let private_key = std::fs::read_to_string(private_key_path)?;
        let public_key = std::fs::read_to_string(gateway_public_key_path)?;
        Self::from_pem(&private_key, &public_key)
    }

    /// Key material that can verify gateway signatures but cannot sign.
    pub fn verify_only(gateway_public_key_pem: &str) -> Result<Self, SignatureError> {
        Ok(KeyMaterial {
            signing: None,
            verifying: VerifyingKey::new(parse_public_key(gateway_public_key_pem)?),
        })
    }

    pub fn can_sign(&self) -> bool {
        self.signing.is_some()
    }

    /// Sign canonical bytes, returning the base64 signature.
    pub fn sign(&self, canonical: &[u8]) -> Result<String, SignatureError> {
        let key = self
            .signing
            .as_ref()
            .ok_or(SignatureError::MissingPrivateKey)?;
        let signature: Signature = key.try_sign(canonical).map_err(SignatureError::Signing)?;
        Ok(BASE64_STANDARD.encode(signature.to_bytes()))
    }

    /// Verify a base64 signature over canonical bytes against the gateway key.
    pub fn verify(&self, canonical: &[u8], signature: &str) -> Result<(), SignatureError> {
        let raw = BASE64_STANDARD.decode(signature.trim())?;
        let signature = Signature::try_from(raw.as_slice()).map_err(SignatureError::Mismatch)?;
        self.verifying
            .verify(canonical, &signature)
            .map_err(SignatureError::Mismatch)
    }
}

impl Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("signing", &self.signing.as_ref().map(|_| "<redacted>"))
            .field("verifying", &"<redacted>")
            .finish()
    }
}

fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, SignatureError> {
    let pem = pem.trim();
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|pkcs8_err| {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
                SignatureError::MalformedPrivateKey(format!(
                    "not PKCS#8 ({pkcs8_err}) nor PKCS#1 ({pkcs1_err})"
                ))
            })
        })
}

fn parse_public_key(pem: &str) -> Result<RsaPublicKey, SignatureError> {
    let pem = pem.trim();
    RsaPublicKey::from_public_key_pem(pem).or_else(|spki_err| {
        RsaPublicKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
            SignatureError::MalformedPublicKey(format!(
                "not SPKI ({spki_err}) nor PKCS#1 ({pkcs1_err})"
            ))
        })
    })
}
