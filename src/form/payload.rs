// src/form/payload.rs  —  Request body + JSON validation
use serde::Serialize;
use serde_json::{Map, Value};

use super::Statement;

/// `user` block of the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub name:  String,
    pub email: String,
}

/// Body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub text:            Map<String, Value>,
    pub target_language: String,
    pub user:            User,
}

/// Fold statements into `key1..keyN` in list order.
/// Keys follow position, not the statement's id.
pub fn statements_to_text(statements: &[Statement]) -> Map<String, Value> {
    statements
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("key{}", i + 1), Value::String(s.value.clone())))
        .collect()
}

/// Why the JSON editor's text cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonTextError {
    /// Not JSON at all
    Syntax(String),
    /// Well-formed JSON, but the backend needs a mapping
    NotObject(&'static str),
}

impl JsonTextError {
    /// Short text for the editor's inline warning.
    pub fn inline_message(&self) -> &'static str {
        match self {
            JsonTextError::Syntax(_)    => "Invalid JSON format",
            JsonTextError::NotObject(_) => "Expected a JSON object",
        }
    }
}

impl std::fmt::Display for JsonTextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonTextError::Syntax(e)       => write!(f, "{e}"),
            JsonTextError::NotObject(kind) => write!(f, "expected a JSON object, got {kind}"),
        }
    }
}

/// Parse raw editor text as a JSON object.
pub fn parse_json_text(raw: &str) -> Result<Map<String, Value>, JsonTextError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(JsonTextError::NotObject(kind_of(&other))),
        Err(e) => Err(JsonTextError::Syntax(e.to_string())),
    }
}

/// The reason `raw` cannot be sent, or `None` when it is a JSON object.
pub fn check_json_text(raw: &str) -> Option<JsonTextError> {
    parse_json_text(raw).err()
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "an array",
        Value::Object(_) => "an object",
    }
}
