//! Integration tests for the boundary entry points.

use intake::{
    as_number, check, check_async, is_array, is_object, is_string, Contract, JsonPath, Reason,
};
use serde_json::json;

fn signup() -> intake::ObjectProcessor<intake::Is> {
    is_object(
        Contract::new()
            .field("email", is_string().regex("@").unwrap())
            .field("age", as_number().min(18.0)),
    )
}

#[test]
fn test_check_returns_output() {
    let user = check(&signup(), || json!({ "email": "a@b.c", "age": "40" }), JsonPath::root())
        .unwrap();
    assert_eq!(user["age"], json!(40));
}

#[test]
fn test_check_collects_every_issue() {
    let err = check(&signup(), || json!({ "email": "nope", "age": 3 }), JsonPath::root())
        .unwrap_err();
    assert_eq!(err.issues().len(), 2);
    assert_eq!(err.issues().with_reason(Reason::Regex).len(), 1);
    assert_eq!(err.issues().with_reason(Reason::Min).len(), 1);
}

#[test]
fn test_check_locates_issues_under_start_path() {
    let err = check(
        &is_array(is_string()),
        || json!(["ok", 2]),
        JsonPath::from_field("body").push_field("tags"),
    )
    .unwrap_err();
    assert_eq!(err.issues().first().path.to_string(), "body.tags[1]");
}

#[tokio::test]
async fn test_check_async_awaits_value() {
    let user = check_async(
        &signup(),
        async { json!({ "email": "x@y.z", "age": 18 }) },
        "body",
    )
    .await
    .unwrap();
    assert_eq!(user["email"], json!("x@y.z"));
}

#[tokio::test]
async fn test_check_async_rejects() {
    let fetch = async {
        tokio::task::yield_now().await;
        json!({ "email": "x@y.z" })
    };
    let err = check_async(&signup(), fetch, "body").await.unwrap_err();
    assert_eq!(err.issues().first().reason, Reason::NotDefined);
    assert_eq!(err.issues().first().path.to_string(), "body.age");
}

#[tokio::test]
async fn test_check_async_absent_value() {
    let lookup = async { None::<serde_json::Value> };
    let err = check_async(&signup(), lookup, "body").await.unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues().first().reason, Reason::NotDefined);
    assert_eq!(err.issues().first().path.to_string(), "body");
}
