//! Request body decoding for POST /submit
//!
//! Accepts JSON and `application/x-www-form-urlencoded` bodies. Form keys
//! follow the extended query-string conventions browsers and `qs` use:
//! a repeated key or a bracketed key (`tags[]`, `tags[0]`) becomes a list,
//! a single plain key stays a string.

use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

/// Body encodings the submit handler understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    UrlEncoded,
}

impl BodyKind {
    /// Pick the decoder from the `Content-Type` header
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())?;
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || mime.ends_with("+json") {
            Some(BodyKind::Json)
        } else if mime == "application/x-www-form-urlencoded" {
            Some(BodyKind::UrlEncoded)
        } else {
            None
        }
    }
}

/// Decode a body into a JSON value, `None` when it cannot be read
pub fn decode_body(kind: BodyKind, bytes: &[u8]) -> Option<Value> {
    match kind {
        BodyKind::Json => serde_json::from_slice(bytes).ok(),
        BodyKind::UrlEncoded => Some(form_to_json(bytes)),
    }
}

/// Convert urlencoded pairs to a JSON object of strings and string lists
pub fn form_to_json(bytes: &[u8]) -> Value {
    let mut object = Map::new();

    for (key, value) in url::form_urlencoded::parse(bytes) {
        let (name, bracketed) = match key.find('[') {
            Some(idx) if key.ends_with(']') && idx > 0 => (&key[..idx], true),
            _ => (&*key, false),
        };
        let value = Value::String(value.into_owned());

        match object.get_mut(name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None if bracketed => {
                object.insert(name.to_string(), Value::Array(vec![value]));
            }
            None => {
                object.insert(name.to_string(), value);
            }
        }
    }

    Value::Object(object)
}
