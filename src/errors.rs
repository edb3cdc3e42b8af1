//! Error types for gateway operations.
//!
//! Each low-level component reports its own error type. The dispatcher lifts
//! them into [`Error`], attaching the function name of the operation that failed.

use crate::{mapping::MappingError, transport::TransportError};

/// Failures while assembling a request, before anything is sent.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// A payload could not be represented as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value could not be placed into an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

/// Failures while signing requests or verifying responses.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("no private key configured for signing")]
    MissingPrivateKey,

    #[error("malformed private key: {0}")]
    MalformedPrivateKey(String),

    #[error("malformed public key: {0}")]
    MalformedPublicKey(String),

    #[error("failed to read key file: {0}")]
    KeyFile(#[from] std::io::Error),

    #[error("signing failed: {0}")]
    Signing(#[source] rsa::signature::Error),

    /// The value to sign has no canonical form.
    #[error("failed to encode signed payload: {0}")]
    Encoding(#[from] ConstructionError),

    /// A signed envelope is not JSON, or lacks its signed object.
    #[error("malformed signed envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// The signature string is not valid base64.
    #[error("signature is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The signature is well formed but does not match the signed bytes.
    #[error("signature does not match: {0}")]
    Mismatch(#[source] rsa::signature::Error),

    /// A signed response arrived without a signature.
    #[error("response carries no signature")]
    MissingSignature,
}

/// Error returned by client construction and every gateway operation.
///
/// `operation` holds the function name of the failed call, e.g. `dana.acquiring.order.query`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP client could not be built. Raised before any operation runs.
    #[error("failed to set up gateway client: {source}")]
    ClientSetup {
        #[source]
        source: TransportError,
    },

    #[error("{operation}: failed to construct request: {source}")]
    RequestConstruction {
        operation: &'static str,
        #[source]
        source: ConstructionError,
    },

    #[error("{operation}: transport failure: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// The response body is not JSON, or not the expected envelope shape.
    #[error("{operation}: malformed response: {source}")]
    Deserialization {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: signature failure: {source}")]
    Signature {
        operation: &'static str,
        #[source]
        source: SignatureError,
    },

    /// The response decoded, but its body does not fit the typed result.
    #[error("{operation}: unexpected response body: {source}")]
    StructuralMapping {
        operation: &'static str,
        #[source]
        source: MappingError,
    },
}

impl Error {
    /// Function name of the operation that failed. `None` for client setup failures.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::ClientSetup { .. } => None,
            Error::RequestConstruction { operation, .. }
            | Error::Transport { operation, .. }
            | Error::Deserialization { operation, .. }
            | Error::Signature { operation, .. }
            | Error::StructuralMapping { operation, .. } => Some(operation),
        }
    }

    pub fn is_signature(&self) -> bool {
        matches!(self, Error::Signature { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::ClientSetup { .. })
    }
}

/// A specialized `Result` type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;
