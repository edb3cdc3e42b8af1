//! Canonical byte form used as signing and verification input.
//!
//! The canonical form of a value is its compact JSON encoding. Field order follows the
//! declaration order of the payload structs, and every map type used in payloads
//! ([`Record`](crate::types::Record), `serde_json::Map` with `preserve_order`) iterates
//! deterministically, so the same logical value always yields the same bytes.
//!
//! Callers pass the signed sub-object only (`request`, `response` or a bare legacy body),
//! which keeps the signature field itself out of the signed bytes.

use serde::Serialize;

use crate::errors::ConstructionError;

/// Encode `value` into its canonical bytes.
pub fn canonical_bytes<T>(value: &T) -> Result<Vec<u8>, ConstructionError>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_vec(value)?)
}
