//! [`Amount`] and [`AmountValue`] as carried in order and refund payloads.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Indonesian Rupiah, the gateway's settlement currency.
pub const CURRENCY_IDR: &str = "IDR";

/// The textual value of an amount.
///
/// The gateway exchanges amounts as decimal strings. Values are never parsed into numbers
/// here, so no rounding can happen on the way through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AmountValue(pub String);

impl AmountValue {
    /// Express the value in the gateway's minor-unit form by appending two zero digits.
    ///
    /// The conversion is purely textual: `"10000"` becomes `"1000000"`.
    pub fn to_minor_units(&self) -> AmountValue {
        AmountValue(format!("{}00", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AmountValue {
    fn from(value: &str) -> Self {
        AmountValue(value.to_string())
    }
}

impl From<String> for AmountValue {
    fn from(value: String) -> Self {
        AmountValue(value)
    }
}

impl From<u64> for AmountValue {
    fn from(value: u64) -> Self {
        AmountValue(value.to_string())
    }
}

impl Display for AmountValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AmountValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AmountValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AmountValue(s))
    }
}

/// A currency and value pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub value: AmountValue,
}

impl Amount {
    pub fn new(currency: impl Into<String>, value: impl Into<AmountValue>) -> Self {
        Amount {
            currency: currency.into(),
            value: value.into(),
        }
    }

    /// An amount in Rupiah.
    pub fn idr(value: impl Into<AmountValue>) -> Self {
        Amount::new(CURRENCY_IDR, value)
    }

    /// Same currency, value converted with [`AmountValue::to_minor_units`].
    pub fn to_minor_units(&self) -> Amount {
        Amount {
            currency: self.currency.clone(),
            value: self.value.to_minor_units(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minor_units_append_two_zeros() {
        assert_eq!(AmountValue::from("10000").to_minor_units().as_str(), "1000000");
        assert_eq!(AmountValue::from("1").to_minor_units().as_str(), "100");
    }

    #[test]
    fn test_minor_units_are_textual() {
        // No numeric interpretation, so decimals pass through untouched.
        assert_eq!(AmountValue::from("10.5").to_minor_units().as_str(), "10.500");
        assert_eq!(AmountValue::from("007").to_minor_units().as_str(), "00700");
    }

    #[test]
    fn test_amount_wire_shape() {
        let amount = Amount::idr(10000u64).to_minor_units();
        assert_eq!(
            serde_json::to_value(&amount).unwrap(),
            json!({ "currency": "IDR", "value": "1000000" })
        );

        let parsed: Amount = serde_json::from_value(json!({ "value": "500" })).unwrap();
        assert_eq!(parsed.currency, "");
        assert_eq!(parsed.value, AmountValue::from("500"));
    }
}
