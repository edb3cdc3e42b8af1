//! Projection of a decoded JSON tree into a typed result.
//!
//! Response bodies are first parsed into [`AnyJson`]. [`project`] then maps that tree onto the
//! target type: unknown fields are ignored, absent optional fields become `None`, and a missing
//! or mistyped required field is reported with the path where it happened.

use serde::de::DeserializeOwned;

use crate::types::AnyJson;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("at `{path}`: {message}")]
pub struct MappingError {
    /// Path to the offending field, `.` for the top level.
    pub path: String,
    pub message: String,
}

pub fn project<T: DeserializeOwned>(value: AnyJson) -> Result<T, MappingError> {
    serde_path_to_error::deserialize(value).map_err(|err| MappingError {
        path: err.path().to_string(),
        message: err.inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::types::{ApplyTokenResponse, OrderDetail, OrderResponse};

    use super::*;

    #[test]
    fn test_project_tolerates_unknown_and_missing_optional_fields() {
        let body: OrderResponse = project(json!({
            "resultInfo": { "resultStatus": "S", "resultCode": "SUCCESS", "futureField": 1 },
            "acquirementId": "20261019111212800110166",
            "somethingNew": { "nested": true }
        }))
        .unwrap();

        assert_eq!(body.result_info.result_status.as_deref(), Some("S"));
        assert_eq!(body.acquirement_id.as_deref(), Some("20261019111212800110166"));
        assert_eq!(body.checkout_url, None);
    }

    #[test]
    fn test_project_reports_missing_required_field() {
        let err = project::<ApplyTokenResponse>(json!({ "accessTokenInfo": {} })).unwrap_err();
        assert_eq!(err.path, ".");
        assert!(err.message.contains("resultInfo"), "{err}");
    }

    #[test]
    fn test_project_reports_nested_path() {
        let err = project::<OrderDetail>(json!({
            "resultInfo": {},
            "statusDetail": { "acquirementStatus": "SUCCESS", "frozen": "no" }
        }))
        .unwrap_err();

        assert_eq!(err.path, "statusDetail.frozen");
    }

    #[test]
    fn test_project_accepts_null_optionals() {
        let body: OrderResponse = project(json!({
            "resultInfo": { "resultMsg": null },
            "checkoutUrl": null
        }))
        .unwrap();

        assert_eq!(body.result_info.result_msg, None);
        assert_eq!(body.checkout_url, None);
    }
}
