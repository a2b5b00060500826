//! Failure taxonomy of the data-access boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{BookId, TagId, ValidationError};

/// Every backend client failure. Serializable so it can travel unchanged
/// through the RPC layer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    /// Payload failed schema validation
    #[error("validation error at {path}: {message}")]
    Validation { path: String, message: String },

    /// Non-2xx response; the body text is the message
    #[error("{body}")]
    Http { status: u16, body: String },

    #[error("Book not found with id: {book_id}")]
    BookNotFound { book_id: BookId },

    #[error("Specified tag not found with id: {id}")]
    TagNotFound { id: TagId },

    /// The request never produced a response
    #[error("network error: {message}")]
    Transport { message: String },

    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// True for lookups that matched no record, whichever client produced them.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::BookNotFound { .. } | Self::TagNotFound { .. } => true,
            Self::Http { status, .. } => *status == 404,
            _ => false,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            path: err.path,
            message: err.message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Validation {
                path: "$".to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(api) = err.downcast_ref::<ApiError>() {
            return api.clone();
        }
        if let Some(validation) = err.downcast_ref::<ValidationError>() {
            return validation.clone().into();
        }
        match err.downcast::<reqwest::Error>() {
            Ok(transport) => transport.into(),
            Err(other) => Self::Unexpected {
                message: format!("{other:#}"),
            },
        }
    }
}
