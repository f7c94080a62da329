//! Integration tests for the null wrapper.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use intake::{
    as_number, is_array, is_number, is_object, is_string, maybe_as_string, null_or, null_or_as,
    Contract, JsonPath, Processor, Reason,
};
use serde_json::{json, Value};

fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

#[test]
fn test_null_never_reaches_wrapped_validator() {
    let touched = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&touched);
    let processor = null_or(is_string().validator(move |_| {
        flag.store(true, Ordering::SeqCst);
        false
    }));

    assert_eq!(unwrap_success(processor.process_root(&Value::Null)), None);
    assert!(!touched.load(Ordering::SeqCst));
}

#[test]
fn test_non_null_is_delegated_unchanged() {
    let processor = null_or(as_number().min(1.0));
    assert_eq!(unwrap_success(processor.process_root(&json!("3"))), Some(3.0));
    assert_eq!(
        unwrap_failure(processor.process_root(&json!(0))).first().reason,
        Reason::Min
    );
    assert_eq!(
        unwrap_failure(processor.process(None, &JsonPath::root())).first().reason,
        Reason::NotDefined
    );
}

#[test]
fn test_wraps_composites() {
    let processor = is_object(
        Contract::new()
            .field("tags", null_or(is_array(is_string())))
            .field("score", null_or(is_number())),
    );

    let output = unwrap_success(processor.process_root(&json!({ "tags": null, "score": 4 })));
    assert_eq!(Value::Object(output), json!({ "tags": null, "score": 4 }));

    let issues = unwrap_failure(processor.process_root(&json!({ "tags": [1], "score": null })));
    assert_eq!(issues.first().path.to_string(), "tags[0]");
}

#[test]
fn test_default_only_replaces_undefined() {
    let processor = null_or_as(maybe_as_string(), Some("n/a".to_string()));

    assert_eq!(
        unwrap_success(processor.process(None, &JsonPath::root())),
        Some(Some("n/a".to_string()))
    );
    assert_eq!(unwrap_success(processor.process_root(&Value::Null)), None);
    assert_eq!(
        unwrap_success(processor.process_root(&json!(12))),
        Some(Some("12".to_string()))
    );
}
