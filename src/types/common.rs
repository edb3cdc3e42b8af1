//! Miscellaneous common types used throughout the gateway payloads.

use chrono::{DateTime, FixedOffset, Local};

/// Key-value pairs with string keys.
///
/// Ordered, so a record always encodes to the same canonical bytes.
pub type Record<V> = std::collections::BTreeMap<String, V>;

/// Any JSON value. Used for payload parts whose shape is not fixed.
pub type AnyJson = serde_json::Value;

/// Timestamp layout of `reqTime`, `respTime` and the `Request-Time` header.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Format a timestamp in the gateway's layout, e.g. `2026-10-19T13:45:00+07:00`.
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Current local time with its UTC offset.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}
