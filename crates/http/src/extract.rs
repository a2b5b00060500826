//! Request extractors for RPC handlers.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts, Method},
};
use serde::Deserialize;
use serde_json::Value;
use shelf_authz::Session;
use shelf_catalog::schema::Schema;

use crate::error::RpcError;

/// Validated procedure input.
///
/// Queries carry it as a JSON-encoded `input` query parameter, mutations as
/// the JSON request body. A missing input is treated as `{}`.
#[derive(Debug, Clone)]
pub struct RpcInput<T>(pub T);

#[derive(Debug, Deserialize)]
struct InputParam {
    input: Option<String>,
}

impl<S, T> FromRequest<S> for RpcInput<T>
where
    S: Send + Sync,
    T: Schema + Send,
{
    type Rejection = RpcError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let raw = if req.method() == Method::GET {
            let Query(param) = Query::<InputParam>::try_from_uri(req.uri())
                .map_err(|e| RpcError::bad_request(vec![], e.body_text()))?;
            match param.input {
                Some(text) => parse_json(text.as_bytes())?,
                None => empty_input(),
            }
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| RpcError::bad_request(vec![], e.body_text()))?;
            if body.is_empty() {
                empty_input()
            } else {
                parse_json(&body)?
            }
        };

        Ok(Self(T::parse(&raw)?))
    }
}

fn empty_input() -> Value {
    Value::Object(Default::default())
}

fn parse_json(bytes: &[u8]) -> Result<Value, RpcError> {
    serde_json::from_slice(bytes)
        .map_err(|e| RpcError::bad_request(vec![], format!("input is not valid JSON: {e}")))
}

/// Session from the `authorization` header, if any. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(Session::from_authorization);
        Ok(Self(session))
    }
}
