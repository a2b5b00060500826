//! Helpers for module OpenAPI fragments.

use serde_json::{json, Value};

/// How a procedure is invoked over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    /// `GET` with a JSON-encoded `input` query parameter
    Query,
    /// `POST` with a JSON body
    Mutation,
}

/// Reference to a component schema.
pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Array of a component schema.
pub fn array_of(name: &str) -> Value {
    json!({ "type": "array", "items": schema_ref(name) })
}

/// Path item for one procedure.
pub fn procedure(
    kind: ProcedureKind,
    tag: &str,
    summary: &str,
    input: Option<&str>,
    output: Value,
) -> Value {
    let envelope = json!({
        "type": "object",
        "properties": {
            "val": output,
            "err": schema_ref("ApiError")
        }
    });

    let mut operation = json!({
        "summary": summary,
        "tags": [tag],
        "responses": {
            "200": {
                "description": "Procedure outcome, exactly one of `val` or `err`",
                "content": { "application/json": { "schema": envelope } }
            },
            "400": error_response("Invalid input"),
            "401": error_response("Session required")
        }
    });

    match (kind, input) {
        (ProcedureKind::Query, Some(name)) => {
            operation["parameters"] = json!([{
                "name": "input",
                "in": "query",
                "required": true,
                "content": { "application/json": { "schema": schema_ref(name) } }
            }]);
            json!({ "get": operation })
        }
        (ProcedureKind::Query, None) => json!({ "get": operation }),
        (ProcedureKind::Mutation, input) => {
            if let Some(name) = input {
                operation["requestBody"] = json!({
                    "required": true,
                    "content": { "application/json": { "schema": schema_ref(name) } }
                });
            }
            json!({ "post": operation })
        }
    }
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema_ref("ErrorResponse") }
        }
    })
}
