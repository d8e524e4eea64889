//! Built-in stand-in operations.
//!
//! These handlers exist so the dispatcher has something to route to. They
//! compute values from their parameters and nothing else: no model calls, no
//! template storage.

mod prompt;
mod template;
mod usage;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::HandlerError;
use crate::registry::{Completion, OperationRegistry, Params};

pub use prompt::{MAX_PROMPT_CHARS, PROMPT_GENERATE};
pub use template::{TEMPLATE_CREATE, TEMPLATE_RENDER};
pub use usage::USAGE_TRACK;

/// Registers every built-in operation.
pub(crate) fn install(registry: &mut OperationRegistry) {
    registry.insert(PROMPT_GENERATE, Completion::Deferred, prompt::generate);
    registry.insert(TEMPLATE_CREATE, Completion::Deferred, template::create);
    registry.insert(TEMPLATE_RENDER, Completion::Deferred, template::render);
    registry.insert(USAGE_TRACK, Completion::Immediate, usage::track);
}

/// Extracts a non-empty string parameter.
fn required_str<'a>(params: &'a Params, name: &str) -> Result<&'a str, HandlerError> {
    params
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HandlerError::missing_parameter(name))
}

/// Extracts a numeric parameter.
fn required_number(params: &Params, name: &str) -> Result<f64, HandlerError> {
    params
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| HandlerError::missing_parameter(name))
}

/// Current UTC time as an RFC 3339 string at whole-second precision.
fn utc_timestamp() -> Result<String, HandlerError> {
    OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .map_err(|error| HandlerError::internal(error.to_string()))?
        .format(&Rfc3339)
        .map_err(|error| HandlerError::internal(error.to_string()))
}
