//! Template creation and rendering stand-ins.

use serde_json::Value;

use crate::correlation::{IdSource, RandomIdSource};
use crate::error::HandlerError;
use crate::registry::{Params, Payload};

use super::required_str;

/// Operation name for template creation.
pub const TEMPLATE_CREATE: &str = "/template/create";

/// Operation name for template rendering.
pub const TEMPLATE_RENDER: &str = "/template/render";

fn is_valid_template_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validates a template definition and assigns it an identifier.
pub(super) fn create(params: &Params) -> Result<Payload, HandlerError> {
    let name = required_str(params, "name")?;
    let pattern = required_str(params, "pattern")?;
    let variables = params
        .get("variables")
        .filter(|value| value.is_array())
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));

    if !is_valid_template_name(name) {
        return Err(HandlerError::rejected(
            "Invalid template name: must be alphanumeric with hyphens",
        ));
    }

    let id = RandomIdSource::new().next_id();
    Ok(Payload::from_iter([
        (String::from("id"), Value::from(id.as_str())),
        (String::from("name"), Value::from(name)),
        (String::from("pattern"), Value::from(pattern)),
        (String::from("variables"), variables),
    ]))
}

/// Echoes the supplied values as a rendered template.
pub(super) fn render(params: &Params) -> Result<Payload, HandlerError> {
    let template_id = required_str(params, "template_id")?;
    let values = params
        .get("values")
        .filter(|value| value.is_object())
        .cloned()
        .unwrap_or_else(|| Value::Object(Payload::new()));

    Ok(Payload::from_iter([
        (String::from("template_id"), Value::from(template_id)),
        (
            String::from("rendered"),
            Value::from(format!("Rendered template {template_id} with variables")),
        ),
        (String::from("variables_used"), values),
    ]))
}
