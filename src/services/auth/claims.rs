use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded payload of a verified bearer token.
///
/// Only `TokenVerifier::verify` produces this from a token, so holding one
/// means the signature (and `exp`/`nbf` when present) checked out.
/// Lives in the request extensions for the duration of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `sub` when it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }
}
