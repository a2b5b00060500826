//! Error handling for the shelf RPC transport

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shelf_authz::AuthzError;
use shelf_catalog::{schema::ValidationError, ApiError};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::envelope::Envelope;

pub type RpcResult<T> = Result<T, RpcError>;

/// Standard error body for RPC-level failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
    pub message: String,
    pub code: String,
    pub trace_id: String,
    pub timestamp: String,
}

/// Wire wrapper: `{"error": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Failures of an RPC call.
///
/// `Service` carries a backend client failure unchanged; it is an ordinary
/// procedure outcome and travels as `{"err": ...}` with status 200. The
/// remaining variants are failures of the call itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RpcError {
    #[error("bad request: {message}")]
    BadRequest {
        details: Vec<serde_json::Value>,
        message: String,
    },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("{error}")]
    Service {
        #[from]
        error: ApiError,
    },

    /// The RPC server could not be reached or answered garbage
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl RpcError {
    /// Create a bad request error
    pub fn bad_request(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            details,
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Machine-readable code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Service { .. } => "SERVICE_ERROR",
            Self::Transport { .. } => "TRANSPORT_ERROR",
        }
    }

    /// The backend failure, if this is a passed-through service error
    pub fn as_service(&self) -> Option<&ApiError> {
        match self {
            Self::Service { error } => Some(error),
            _ => None,
        }
    }
}

impl From<ValidationError> for RpcError {
    fn from(err: ValidationError) -> Self {
        let details = vec![json!({ "path": err.path, "error": err.message })];
        Self::bad_request(details, format!("invalid input: {err}"))
    }
}

impl From<AuthzError> for RpcError {
    fn from(err: AuthzError) -> Self {
        Self::unauthorized(err.to_string())
    }
}

impl From<ErrorBody> for RpcError {
    fn from(body: ErrorBody) -> Self {
        match body.code.as_str() {
            "BAD_REQUEST" => Self::bad_request(body.details, body.message),
            "UNAUTHORIZED" => Self::unauthorized(body.message),
            "NOT_FOUND" => Self::not_found(body.message),
            _ => Self::transport(body.message),
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, details) = match self {
            RpcError::Service { error } => {
                tracing::debug!(error = %error, "procedure returned service error");
                return Envelope::<()>::Err(error).into_response();
            }
            RpcError::BadRequest { details, message } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            RpcError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message, Vec::new()),
            RpcError::NotFound { message } => (StatusCode::NOT_FOUND, message, Vec::new()),
            RpcError::Transport { message } => (StatusCode::BAD_GATEWAY, message, Vec::new()),
        };

        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();

        tracing::error!(
            error_id = %error_id,
            error_code = %code,
            status_code = %status.as_u16(),
            "Request error"
        );

        // In production, we might want to hide upstream details
        let message = if cfg!(not(debug_assertions)) && status.is_server_error() {
            "An upstream error occurred".to_string()
        } else {
            message
        };

        let body = ErrorResponse {
            error: ErrorBody {
                details,
                message,
                code: code.to_string(),
                trace_id: error_id.to_string(),
                timestamp,
            },
        };

        (status, Json(body)).into_response()
    }
}
