//! Integration tests for common Garavel workflows.
//!
//! These go through the umbrella crate the way an application would.

use garavel::prelude::*;
use garavel::{NormalizeConfig, PipeDetection, SupportError};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_normalize_mixed_list() {
    let normalized = arr::normalize(array!["1", "2.5", "true", "a,b"]);
    assert_eq!(
        normalized,
        array![1.0, 2.5, true, Value::from(array!["a", "b"])]
    );
}

#[test]
fn test_normalize_twice_is_stable() {
    let input = array! {
        "limit" => "50",
        "fields" => "id,name,created_at",
        "include" => Value::from(array!["author|comments", "false"]),
        "sort" => "-created_at",
    };

    let once = arr::normalize(input);
    let twice = arr::normalize(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_pipe_rule_is_configurable() {
    let input = array!["|admin|staff"];

    assert_eq!(arr::normalize(input.clone()), input);

    let config = NormalizeConfig::from_toml_str(r#"pipe_detection = "strict""#).unwrap();
    assert_eq!(config.pipe_detection, PipeDetection::Strict);

    let strict = Normalizer::new(config).normalize(input);
    assert_eq!(strict, array![Value::from(array!["", "admin", "staff"])]);
}

// =============================================================================
// Array and string helpers
// =============================================================================

#[test]
fn test_clean_join_and_pluck() {
    assert_eq!(
        arr::clean(&array![0, "", "x", false, "y"])
            .values()
            .cloned()
            .collect::<Vec<_>>(),
        vec![Value::from("x"), Value::from("y")]
    );

    assert_eq!(arr::join_default(&array!["a", "b", "c"]), "a, b, c");
    assert_eq!(arr::join(&array!["a", "b"], "-"), "a-b");

    let rows = array![
        Value::from(array! { "email" => "a@example.com" }),
        Value::from(array! { "name" => "no email" }),
    ];
    assert!(matches!(
        arr::pluck(&rows, "email"),
        Err(SupportError::MissingField { .. })
    ));
}

#[test]
fn test_string_classification() {
    assert!(!text::parse_bool(&Value::from("false")));
    assert!(!text::parse_bool(&Value::Int(0)));
    assert!(!text::parse_bool(&Value::from("0")));
    assert!(text::parse_bool(&Value::from("true")));
    assert!(text::parse_bool(&Value::from("yes")));

    assert_eq!(text::splitter("a,b|c"), Some(','));
    assert_eq!(text::splitter("a|b"), Some('|'));
    assert_eq!(text::splitter("|leading"), None);
    assert_eq!(text::splitter_with("|leading", PipeDetection::Strict), Some('|'));
}

// =============================================================================
// Facades
// =============================================================================

#[derive(Default)]
struct Mailer {
    sent: AtomicI64,
}

impl Service for Mailer {
    fn methods(&self) -> &'static [&'static str] {
        &["send", "sent"]
    }

    fn call(&self, method: &str, _args: &[Value]) -> Result<Value, FacadeError> {
        match method {
            "send" => Ok(Value::Int(self.sent.fetch_add(1, Ordering::SeqCst) + 1)),
            "sent" => Ok(Value::Int(self.sent.load(Ordering::SeqCst))),
            other => Err(FacadeError::unknown_method("mailer", other)),
        }
    }
}

facade!(struct Mail => Mailer, "app.mailer");

struct Broken;

impl Facade for Broken {
    type Target = Mailer;
}

#[test]
fn test_custom_facade() {
    let first = Mail::instance().unwrap();
    let second = Mail::instance().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    assert!(garavel::registry().has("app.mailer"));
    Mail::call("send", &[]).unwrap();
    assert_eq!(first.sent.load(Ordering::SeqCst), 1);
    assert_eq!(Mail::call("sent", &[]).unwrap(), Value::Int(1));
    assert!(matches!(
        Mail::call("fax", &[]),
        Err(FacadeError::UnknownMethod { .. })
    ));
}

#[test]
fn test_facade_without_accessor() {
    assert!(matches!(
        Broken::instance(),
        Err(FacadeError::UnconfiguredAccessor(_))
    ));
}

#[test]
fn test_request_round_trip() {
    let registry = Registry::new();
    let req = facades::Request::resolve_in(&registry).unwrap();
    req.capture("get", "/orders?status=open,paid&page=3").unwrap();

    let input = Value::from(req.all());
    assert_eq!(
        input.to_json(),
        serde_json::json!({ "status": ["open", "paid"], "page": 3.0 })
    );
}
