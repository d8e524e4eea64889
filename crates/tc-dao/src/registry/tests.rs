//! Unit tests for operation registration and routing.

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

fn echo(params: &Params) -> Result<Payload, HandlerError> {
    Ok(params.clone())
}

fn always_fails(_params: &Params) -> Result<Payload, HandlerError> {
    Err(HandlerError::rejected("nope"))
}

#[fixture]
fn registry() -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    registry
        .register("/echo", Completion::Deferred, echo)
        .expect("register echo");
    registry
        .register("/fail", Completion::Immediate, always_fails)
        .expect("register fail");
    registry
}

fn params(value: serde_json::Value) -> Params {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[rstest]
fn routes_to_registered_handler(registry: OperationRegistry) {
    let input = params(json!({"text": "hi"}));
    let routed = registry.route("/echo", &input).expect("route echo");
    assert_eq!(routed.completion, Completion::Deferred);
    assert_eq!(routed.result, input);
}

#[rstest]
fn surfaces_handler_errors(registry: OperationRegistry) {
    let error = registry
        .route("/fail", &Params::new())
        .expect_err("handler should fail");
    assert_eq!(error, RouteError::Handler(HandlerError::rejected("nope")));
}

#[rstest]
fn unknown_operation_carries_the_name(registry: OperationRegistry) {
    let error = registry
        .route("/bogus/op", &Params::new())
        .expect_err("unknown operation");
    assert_eq!(error, RouteError::unknown_operation("/bogus/op"));
    assert_eq!(error.to_string(), "Invalid operation: /bogus/op");
}

#[rstest]
fn operation_names_are_case_sensitive(registry: OperationRegistry) {
    assert!(registry.route("/ECHO", &Params::new()).is_err());
}

#[rstest]
#[case::empty("", RegistryError::EmptyName)]
#[case::blank("   ", RegistryError::EmptyName)]
#[case::poll(POLL_OPERATION, RegistryError::Reserved { operation: POLL_OPERATION.to_owned() })]
#[case::duplicate("/echo", RegistryError::Duplicate { operation: "/echo".to_owned() })]
fn rejects_invalid_registrations(
    mut registry: OperationRegistry,
    #[case] name: &str,
    #[case] expected: RegistryError,
) {
    let error = registry
        .register(name, Completion::Deferred, echo)
        .expect_err("registration should fail");
    assert_eq!(error, expected);
    assert_eq!(registry.len(), 2);
}

#[rstest]
fn closures_register_as_handlers(mut registry: OperationRegistry) {
    let greeting = String::from("hello");
    registry
        .register("/greet", Completion::Immediate, move |_: &Params| -> Result<Payload, HandlerError> {
            let mut result = Payload::new();
            result.insert("greeting".to_owned(), json!(greeting));
            Ok(result)
        })
        .expect("register closure");

    let routed = registry.route("/greet", &Params::new()).expect("route");
    assert_eq!(routed.completion, Completion::Immediate);
    assert_eq!(routed.result.get("greeting"), Some(&json!("hello")));
}

#[test]
fn builtin_registry_lists_stand_in_operations() {
    let registry = OperationRegistry::builtin();
    let mut names: Vec<&str> = registry.names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "/prompt/generate",
            "/template/create",
            "/template/render",
            "/usage/track",
        ]
    );
    assert_eq!(registry.completion("/usage/track"), Some(Completion::Immediate));
    assert_eq!(
        registry.completion("/prompt/generate"),
        Some(Completion::Deferred)
    );
    assert!(!registry.contains(POLL_OPERATION));
}

#[test]
fn debug_lists_sorted_names() {
    let rendered = format!("{:?}", OperationRegistry::builtin());
    assert!(rendered.starts_with("OperationRegistry"));
    assert!(rendered.contains("/usage/track"));
}
