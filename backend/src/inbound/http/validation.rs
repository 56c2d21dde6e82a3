//! Raw request decoding shared by inbound HTTP handlers.
//!
//! Handlers never let Actix extractors reject input: bodies and query strings
//! are turned into `serde_json::Value` here and validated by
//! [`crate::domain::validation`], so every rejection uses the same envelope.

use serde_json::{Map, Number, Value};
use url::form_urlencoded;

use crate::domain::ApiFailure;

const TEXT_PARAMS: [&str; 3] = ["query", "grade", "domain"];
const INTEGER_PARAMS: [&str; 2] = ["limit", "offset"];

/// Decode a JSON request body.
///
/// An empty body decodes to `{}` so missing fields are reported by the
/// validators. Malformed JSON is not a validation issue and surfaces as an
/// unknown failure.
pub(crate) fn json_body(body: &[u8]) -> Result<Value, ApiFailure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiFailure::unknown(format!("malformed JSON body: {err}")))
}

/// Translate a search query string into the JSON shape the validators expect.
///
/// The first occurrence of each key wins. Empty text parameters are dropped
/// and numeric parameters keep only their leading integer.
pub(crate) fn search_query(raw: &str) -> Value {
    let mut params = Map::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        if params.contains_key(key.as_ref()) {
            continue;
        }
        if TEXT_PARAMS.contains(&key.as_ref()) && !value.is_empty() {
            params.insert(key.into_owned(), Value::String(value.into_owned()));
        } else if INTEGER_PARAMS.contains(&key.as_ref()) {
            if let Some(number) = leading_integer(&value) {
                params.insert(key.into_owned(), Value::Number(number));
            }
        }
    }
    Value::Object(params)
}

/// Parse an optional sign followed by leading decimal digits, ignoring any
/// trailing text. Returns `None` when no digits are present.
fn leading_integer(raw: &str) -> Option<Number> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };
    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let digits = unsigned.get(..digit_count).filter(|digits| !digits.is_empty())?;
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_owned()
    };

    match signed.parse::<i64>() {
        Ok(value) => Some(Number::from(value)),
        Err(_) => signed.parse::<f64>().ok().and_then(Number::from_f64),
    }
}
