//! Building blocks for module OpenAPI fragments.

use serde_json::{json, Value};

pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

pub fn array_of(name: &str) -> Value {
    json!({ "type": "array", "items": schema_ref(name) })
}

pub fn nullable(name: &str) -> Value {
    json!({ "oneOf": [schema_ref(name), { "type": "null" }] })
}

pub fn path_id(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

pub fn query(name: &str, schema: Value) -> Value {
    json!({ "name": name, "in": "query", "required": true, "schema": schema })
}

pub fn json_body(name: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref(name) } }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema_ref("ErrorResponse") } }
    })
}

/// An operation answering 200 with `schema`, plus the error responses it can
/// produce.
pub fn operation(
    tag: &str,
    summary: &str,
    parameters: Vec<Value>,
    body: Option<Value>,
    schema: Value,
    errors: &[u16],
) -> Value {
    let mut responses = json!({
        "200": {
            "description": "OK",
            "content": { "application/json": { "schema": schema } }
        },
        "500": error_response("Internal server error")
    });
    for status in errors {
        let description = match status {
            404 => "Not found",
            422 => "Validation failed",
            _ => "Error",
        };
        responses[status.to_string()] = error_response(description);
    }

    let mut operation = json!({
        "summary": summary,
        "tags": [tag],
        "responses": responses
    });
    if !parameters.is_empty() {
        operation["parameters"] = Value::Array(parameters);
    }
    if let Some(body) = body {
        operation["requestBody"] = body;
    }
    operation
}
