//! Integration tests for object processing against contracts.

use intake::{
    as_number, as_object, is_array, is_boolean, is_number, is_object, is_string, maybe_as_object,
    maybe_object, maybe_string, Contract, JsonPath, Processor, Reason,
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

fn contract() -> Contract {
    Contract::new()
        .field("a", as_number().min(25.0))
        .field("b", is_string())
}

#[test]
fn test_object_coerces_children() {
    let output = unwrap_success(is_object(contract()).process_root(&json!({ "a": "47", "b": "asd" })));
    assert_eq!(Value::Object(output), json!({ "a": 47, "b": "asd" }));
}

#[test]
fn test_all_missing_properties_are_reported() {
    let issues = unwrap_failure(is_object(contract()).process_root(&json!({})));
    assert_eq!(issues.len(), 2);
    assert_eq!(issues.at_path(&JsonPath::from_field("a"))[0].reason, Reason::NotDefined);
    assert_eq!(issues.at_path(&JsonPath::from_field("b"))[0].reason, Reason::NotDefined);
}

#[test]
fn test_unexpected_property() {
    let input = json!({ "a": 47, "b": "asd", "c": 234 });
    let issues = unwrap_failure(is_object(contract()).process_root(&input));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.first().reason, Reason::UnexpectedProperty);
    assert_eq!(issues.first().path.to_json(), json!(["c"]));
}

#[test]
fn test_strip_extra_properties() {
    let input = json!({ "a": 47, "b": "asd", "c": 234 });
    let processor = is_object(contract()).strip_extra_properties();
    let output = unwrap_success(processor.process_root(&input));
    assert_eq!(Value::Object(output), json!({ "a": 47, "b": "asd" }));
}

#[test]
fn test_nested_path_is_prefixed_twice() {
    let processor = is_object(
        Contract::new().field("o", is_object(Contract::new().field("a", is_number()))),
    );
    let issues = unwrap_failure(processor.process_root(&json!({ "o": {} })));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.first().reason, Reason::NotDefined);
    assert_eq!(issues.first().path.to_json(), json!(["o", "a"]));
}

#[test]
fn test_deep_nesting_collects_everything() {
    let item = is_object(
        Contract::new()
            .field("sku", is_string().min_length(3))
            .field("qty", as_number().min(1.0)),
    );
    let order = is_object(
        Contract::new()
            .field("id", is_string())
            .field("gift", is_boolean())
            .field("items", is_array(item)),
    );

    let input = json!({
        "id": 7,
        "gift": false,
        "items": [
            { "sku": "ABC", "qty": "2" },
            { "sku": "X", "qty": 0 },
            { "qty": 1 }
        ]
    });

    let issues = unwrap_failure(order.process_root(&input));
    let found: Vec<(String, &str)> = issues
        .iter()
        .map(|i| (i.path.to_string(), i.reason.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("id".to_string(), "incorrect-type"),
            ("items[1].sku".to_string(), "min-length"),
            ("items[1].qty".to_string(), "min"),
            ("items[2].sku".to_string(), "not-defined"),
        ]
    );
}

#[test]
fn test_optional_properties_are_not_materialized() {
    let processor = is_object(
        Contract::new()
            .field("name", is_string())
            .field("nickname", maybe_string()),
    );
    let output = unwrap_success(processor.process_root(&json!({ "name": "Ada" })));
    assert_eq!(Value::Object(output), json!({ "name": "Ada" }));
}

#[test]
fn test_wrong_shapes() {
    let issues = unwrap_failure(is_object(contract()).process_root(&json!([1, 2])));
    assert_eq!(issues.first().reason, Reason::IncorrectType);
    assert_eq!(issues.first().info["expectedType"], json!("object"));

    assert_eq!(
        unwrap_success(maybe_object(contract()).process_root(&Value::Null)),
        None
    );
}

#[test]
fn test_as_object_parses_json_text() {
    let processor = as_object(contract());
    let output = unwrap_success(processor.process_root(&json!(r#"{"a": "30", "b": "x"}"#)));
    assert_eq!(Value::Object(output), json!({ "a": 30, "b": "x" }));

    let issues = unwrap_failure(processor.process_root(&json!("[1]")));
    assert_eq!(issues.first().reason, Reason::NoConversion);

    assert_eq!(
        unwrap_success(maybe_as_object(contract()).process_root(&json!("not json"))),
        None
    );
}

#[test]
fn test_any_contract_passes_objects_through() {
    let processor = is_object(Contract::any());
    let input = json!({ "whatever": [1, 2], "else": null });
    assert_eq!(Value::Object(unwrap_success(processor.process_root(&input))), input);
}

#[test]
fn test_validator_runs_after_children() {
    let processor = is_object(
        Contract::new()
            .field("from", as_number())
            .field("to", as_number()),
    )
    .validator(|range| range["from"].as_f64() <= range["to"].as_f64());

    assert!(processor.process_root(&json!({ "from": "1", "to": 5 })).is_success());

    let issues = unwrap_failure(processor.process_root(&json!({ "from": 9, "to": "5" })));
    assert_eq!(issues.first().reason, Reason::Validator);
    assert!(issues.first().path.is_root());
    assert_eq!(issues.first().value, Some(json!({ "from": 9, "to": 5 })));
}
