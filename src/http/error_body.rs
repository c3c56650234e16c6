//! Decoding of error response bodies.

use std::fmt;

use serde_json::Value;

/// Human-readable text extracted from a failed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// The body was a JSON object carrying a `message` field.
    Message(String),
    /// Anything else: compact JSON text, or the raw body when it is not JSON.
    Raw(String),
}

impl ErrorBody {
    /// Decode a response body into its most useful textual form.
    pub fn decode(text: &str) -> Self {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(_) => return ErrorBody::Raw(text.to_string()),
        };

        match value.get("message") {
            Some(Value::String(message)) if !message.is_empty() => {
                ErrorBody::Message(message.clone())
            }
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => ErrorBody::Message(n.to_string()),
            Some(Value::Bool(true)) => ErrorBody::Message("true".to_string()),
            // Structured messages keep their JSON text.
            Some(message @ (Value::Array(_) | Value::Object(_))) => {
                ErrorBody::Message(message.to_string())
            }
            _ => ErrorBody::Raw(value.to_string()),
        }
    }

    /// The extracted text.
    pub fn text(&self) -> &str {
        match self {
            ErrorBody::Message(text) | ErrorBody::Raw(text) => text,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
