// src/exec/decode.rs

use serde_json::Value;

use crate::config::validate::parse_account_id;
use crate::errors::InvocationError;
use crate::types::{DecodeMode, RawResult};

/// Decoded stdout plus the reason it was discarded, if it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedOutput {
    pub result: RawResult,
    pub error: Option<String>,
}

/// Decode stdout as a JSON object.
///
/// Whitespace-only stdout is an empty result in both modes. Anything that is
/// not a JSON object is an empty result with `error` set (lenient) or an
/// `InvocationError::Decode` (strict).
pub fn decode_output(stdout: &str, mode: DecodeMode) -> Result<DecodedOutput, InvocationError> {
    if stdout.trim().is_empty() {
        return Ok(DecodedOutput::default());
    }

    let reason = match serde_json::from_str::<Value>(stdout) {
        Ok(Value::Object(map)) => {
            return Ok(DecodedOutput {
                result: map,
                error: None,
            });
        }
        Ok(other) => format!("expected a JSON object, got {}", kind_of(&other)),
        Err(e) => e.to_string(),
    };

    match mode {
        DecodeMode::Lenient => Ok(DecodedOutput {
            result: RawResult::new(),
            error: Some(reason),
        }),
        DecodeMode::Strict => Err(InvocationError::Decode(reason)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extract the account id from an identity response.
///
/// The field may hold a digit string (as `sts get-caller-identity` prints it)
/// or a non-negative JSON integer.
pub fn parse_account(result: &RawResult, field: &str) -> Result<u64, InvocationError> {
    let err = |detail: String| InvocationError::Account {
        field: field.to_string(),
        detail,
    };

    match result.get(field) {
        Some(Value::String(s)) => {
            parse_account_id(s).ok_or_else(|| err(format!("'{s}' is not a numeric account id")))
        }
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| err(format!("{n} is not a non-negative integer"))),
        Some(other) => Err(err(format!("found {}", kind_of(other)))),
        None => Err(err("field is missing".to_string())),
    }
}
