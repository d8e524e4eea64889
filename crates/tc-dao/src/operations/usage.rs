//! Usage tracking, the one operation that completes in its immediate reply.

use serde_json::Value;

use crate::error::HandlerError;
use crate::registry::{Params, Payload};

use super::{required_number, required_str, utc_timestamp};

/// Operation name for usage tracking.
pub const USAGE_TRACK: &str = "/usage/track";

/// Acknowledges a usage event for `operation` lasting `duration_ms`.
///
/// The duration is validated first, so a negative duration is reported even
/// when `operation` is also missing.
pub(super) fn track(params: &Params) -> Result<Payload, HandlerError> {
    let duration_ms = required_number(params, "duration_ms")?;
    if duration_ms < 0.0 {
        return Err(HandlerError::rejected("duration_ms must be non-negative"));
    }
    let operation = required_str(params, "operation")?;

    Ok(Payload::from_iter([
        (String::from("tracked"), Value::Bool(true)),
        (String::from("operation"), Value::from(operation)),
        (String::from("timestamp"), Value::from(utc_timestamp()?)),
    ]))
}
