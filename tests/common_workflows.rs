//! Integration tests for common Rulegate workflows.
//!
//! These tests verify that the most common use cases work correctly.

use std::sync::Arc;

use rulegate::EMPTY_GROUP;
use rulegate::prelude::*;
use serde_json::json;

fn map(value: serde_json::Value) -> DataMap {
    value.as_object().cloned().unwrap_or_default()
}

fn item_rules() -> RuleTable {
    RuleTable::new().group(
        "save",
        [
            ("name", "required|string"),
            ("int", "required|numeric|min:1|max:10"),
        ],
    )
}

fn item_validator() -> Validator {
    Validator::new(Arc::new(PipeEngine::new())).with_rules(item_rules())
}

// =============================================================================
// Core Validation Workflows
// =============================================================================

#[test]
fn test_validate_and_read_items() {
    let mut validator = item_validator().with_group("save");

    let passed = validator
        .validate(&map(json!({"name": "widget", "int": 5, "stray": true})))
        .unwrap();
    assert!(passed);

    // Only rule-covered fields survive into the store.
    let store = validator.data().unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(validator.item("name").unwrap(), &json!("widget"));
    assert_eq!(validator.item_or("stray", json!(false)).unwrap(), json!(false));
}

#[test]
fn test_validation_failure_reporting() {
    let mut validator = item_validator().with_group("save");

    let passed = validator.validate(&map(json!({"int": "askjask"}))).unwrap();
    assert!(!passed);
    assert_eq!(validator.passed(), Some(false));

    assert!(validator.messages().has("name"));
    assert!(validator.messages().has("int"));
    assert!(validator.failed_rules().get("int").unwrap().contains_key("Numeric"));
    assert!(validator.data().is_err());
}

#[test]
fn test_group_selection_workflows() {
    // The empty sentinel group validates anything.
    let mut anything_goes = item_validator().with_group(EMPTY_GROUP);
    assert!(anything_goes.validate(&map(json!({"whatever": 1}))).unwrap());

    // An unknown group is an error, not a failed validation.
    let mut unknown = item_validator().with_group("bogus");
    assert!(matches!(
        unknown.validate(&map(json!({"int": 5}))),
        Err(ValidatorError::UnknownGroup(_))
    ));
}

#[test]
fn test_template_workflow() {
    let rules = RuleTable::new().group("save", [("int", "required|min:{min}|max:{max}|numeric")]);
    let mut validator = Validator::new(Arc::new(PipeEngine::new()))
        .with_rules(rules)
        .with_group("save");
    validator.add_template_replacements(&[("min", 1), ("max", 10)]);

    assert!(validator.validate(&map(json!({"int": 5}))).unwrap());
    assert!(!validator.validate(&map(json!({"int": 100}))).unwrap());
    assert!(!validator.validate(&map(json!({"int": -100}))).unwrap());
}

#[test]
fn test_snake_case_input_read_back_as_camel() {
    let rules = RuleTable::new().group("save", [("first_name", "required|string")]);
    let mut validator = Validator::new(Arc::new(PipeEngine::new()))
        .with_rules(rules)
        .with_group("save")
        .with_key_case(KeyCase::Camel);

    validator.validate(&map(json!({"first_name": "Ada"}))).unwrap();
    assert_eq!(validator.item("firstName").unwrap(), &json!("Ada"));
}

// =============================================================================
// HTTP Middleware Workflows
// =============================================================================

fn request_factory() -> impl Fn() -> Validator + Send + Sync + 'static {
    || {
        Validator::new(Arc::new(PipeEngine::new())).with_rules(
            RuleTable::new().group("group", [("int", "required|numeric|min:1|max:10")]),
        )
    }
}

fn post_json(body: &str) -> HttpRequest {
    HttpRequest::new("POST", "/items").with_body(body.as_bytes().to_vec())
}

#[tokio::test]
async fn test_api_validation_end_to_end() {
    let mut chain = MiddlewareChain::new();
    chain.use_middleware(ApiValidatorMiddleware::new(
        request_factory(),
        GroupSelect::fixed("group"),
    ));

    let handler: HandlerFn =
        Arc::new(|_req| Box::pin(async { Ok(HttpResponse::ok().with_body(b"handled".to_vec())) }));

    // A valid payload reaches the handler.
    let response = chain
        .apply(post_json(r#"{"int": 5}"#), handler.clone())
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"handled".to_vec());

    // An invalid payload is answered by the middleware.
    let response = chain
        .apply(post_json(r#"{"int": -1}"#), handler)
        .await
        .unwrap();
    assert_eq!(response.status, 422);
    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        r#"{"validationErrors":{"int":{"Min":["1"]}}}"#
    );
}

#[tokio::test]
async fn test_web_validation_end_to_end() {
    let middleware = WebValidatorMiddleware::new(request_factory(), GroupSelect::fixed("group"))
        .redirect("group", "/items/new");

    let req = HttpRequest::new("POST", "/items").with_body(b"int=-1".to_vec());

    let next: Next = Box::new(|_req| Box::pin(async { Ok(HttpResponse::ok()) }));
    let response = middleware.handle(req, next).await.unwrap();
    assert_eq!(response.status, 302);
    assert_eq!(
        response.headers.get("Location"),
        Some(&"/items/new".to_string())
    );

    let cookie = response.headers.get("Set-Cookie").unwrap().clone();
    let follow_up = HttpRequest::new("GET", "/items/new").with_header("Cookie", cookie);

    let errors = take_errors(&follow_up).unwrap();
    assert_eq!(errors.first("int"), Some("int must be at least 1"));
}
