//! # DANA Kit
//!
//! DANA Kit is a typed client for the DANA payment gateway. It builds signed requests, sends them
//! over HTTPS, verifies the gateway's signed responses and decodes them into typed results.
//!
//! ## Core Components Overview
//!
//! ### Protocol
//!
//! - **[`canonical`]**: The byte form of a payload that signatures are computed over.
//! - **[`signer`]**: RSA / SHA-256 signing with the merchant key and verification with the gateway key.
//! - **[`envelope`]**: Request headers and the two envelope conventions (signed and legacy).
//! - **[`operation`]**: The table of gateway operations and their typed [`Endpoint`](operation::Endpoint) bindings.
//! - **[`mapping`]**: Projection of decoded response bodies into typed results.
//!
//! ### Client
//!
//! - **[`gateway`]**: The [`GatewayClient`] dispatcher, one method per operation.
//! - **[`transport`]**: The [`Transport`](transport::Transport) seam between the dispatcher and HTTP.
//! - **[`http_client`]**: The default `reqwest` transport (feature `http-client`).
//! - **[`notify`]**: Verification of inbound payment notifications and their signed acknowledgements.
//!
//! ### Payloads
//!
//! - **[`types`]**: Request and response schemas, amounts and enumerations.
//! - **[`config`]**: Client configuration.
//! - **[`errors`]**: The error taxonomy shared by all operations.
//!
//! ## Usage
//!
//! ```no_run
//! use dana_kit::{GatewayClient, GatewayConfig, KeyMaterial, types::ApplyTokenRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::builder()
//!     .base_url("https://api.saas.dana.id".parse()?)
//!     .client_id("2018122812174155679466")
//!     .client_secret("client-secret")
//!     .build();
//! let keys = KeyMaterial::from_pem_files("merchant_private.pem", "dana_public.pem")?;
//!
//! let client = GatewayClient::new(config, keys)?;
//! let token = client
//!     .apply_access_token(&ApplyTokenRequest::authorization_code("auth-code"))
//!     .await?
//!     .into_body();
//!
//! println!("{:?}", token.access_token_info);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `http-client` (default): [`http_client::HttpTransport`] and [`GatewayClient::new`].
//! - `tracing` (default): structured events through the `tracing` crate, inside a per-client span.

pub mod canonical;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod gateway;
pub mod mapping;
pub mod notify;
pub mod operation;
pub mod signer;
pub mod transport;
pub mod types;

#[cfg(feature = "http-client")]
pub mod http_client;

#[cfg(test)]
mod test_keys;

pub use config::GatewayConfig;
pub use errors::{Error, Result};
pub use gateway::{GatewayClient, GatewayResponse, Verification};
pub use signer::KeyMaterial;
