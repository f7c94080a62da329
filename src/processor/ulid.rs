use serde_json::Value;
use stillwater::Validation;

use crate::path::JsonPath;
use crate::processor::format::ULID_REGEX;
use crate::processor::mode::{Is, Maybe};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

/// A string that already is a canonical ULID. Anything else, including a
/// lowercase ULID, is the wrong type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidKind;

pub type UlidProcessor<M> = Pipeline<UlidKind, M>;

pub fn is_ulid() -> UlidProcessor<Is> {
    pipeline::is(UlidKind)
}

pub fn maybe_ulid() -> UlidProcessor<Maybe> {
    pipeline::maybe(UlidKind)
}

impl Kind for UlidKind {
    type Narrowed = String;
    type Output = String;

    const NAME: &'static str = "ulid";

    fn check(&self, value: &Value) -> Option<String> {
        value
            .as_str()
            .filter(|s| ULID_REGEX.is_match(s))
            .map(str::to_string)
    }

    fn coerce(&self, value: String, _path: &JsonPath) -> ValidationResult<String> {
        Validation::Success(value)
    }

    fn to_value(&self, value: &String) -> Value {
        Value::String(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reason;
    use crate::processor::Processor;
    use serde_json::json;

    #[test]
    fn test_accepts_ulid() {
        let result = is_ulid().process_root(&json!("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert_eq!(result.into_result().ok().as_deref(), Some("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
    }

    #[test]
    fn test_other_strings_are_wrong_type() {
        let issues = is_ulid().process_root(&json!("hello")).into_result().unwrap_err();
        assert_eq!(issues.first().reason, Reason::IncorrectType);
        assert_eq!(issues.first().info["expectedType"], json!("ulid"));
    }

    #[test]
    fn test_maybe_leniency() {
        let processor = maybe_ulid().incorrect_type_to_undefined();
        assert_eq!(processor.process_root(&json!(12)).into_result().ok(), Some(None));
        assert_eq!(processor.process(None, &JsonPath::root()).into_result().ok(), Some(None));
    }
}
