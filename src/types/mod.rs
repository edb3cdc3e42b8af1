//! Payload types exchanged with the gateway.
//!
//! The dispatcher treats these as opaque serializable values; they exist so callers get
//! typed requests and results.

mod amount;
mod common;
mod enums;
mod schema;

pub use amount::*;
pub use common::*;
pub use enums::*;
pub use schema::*;
