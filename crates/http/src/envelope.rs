use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shelf_catalog::{ApiError, ApiResult};

/// Procedure outcome on the wire: `{"val": T}` or `{"err": ApiError}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope<T> {
    Val(T),
    Err(ApiError),
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> ApiResult<T> {
        match self {
            Self::Val(value) => Ok(value),
            Self::Err(error) => Err(error),
        }
    }
}

impl<T> From<ApiResult<T>> for Envelope<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => Self::Val(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_and_failure_are_exclusive_keys() {
        let val = serde_json::to_value(Envelope::Val(3)).unwrap();
        assert_eq!(val, json!({ "val": 3 }));

        let err = serde_json::to_value(Envelope::<u8>::Err(ApiError::TagNotFound { id: 1 })).unwrap();
        assert_eq!(err, json!({ "err": { "kind": "tag_not_found", "id": 1 } }));
    }

    #[test]
    fn unit_value_decodes_from_null() {
        let envelope: Envelope<()> = serde_json::from_value(json!({ "val": null })).unwrap();
        assert_eq!(envelope.into_result(), Ok(()));
    }

    #[test]
    fn both_keys_are_rejected() {
        let raw = json!({ "val": 1, "err": { "kind": "tag_not_found", "id": 1 } });
        assert!(serde_json::from_value::<Envelope<u8>>(raw).is_err());
    }
}
