use serde_json::Value;
use stillwater::Validation;

use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanKind;

pub type BooleanProcessor<M> = Pipeline<BooleanKind, M>;

pub fn is_boolean() -> BooleanProcessor<Is> {
    pipeline::is(BooleanKind)
}

pub fn maybe_boolean() -> BooleanProcessor<Maybe> {
    pipeline::maybe(BooleanKind)
}

/// Booleans, `"true"`/`"false"`/`""` and finite numbers (zero is false).
pub fn as_boolean() -> BooleanProcessor<As> {
    pipeline::convert(BooleanKind)
}

pub fn maybe_as_boolean() -> BooleanProcessor<MaybeAs> {
    pipeline::maybe_convert(BooleanKind)
}

impl Kind for BooleanKind {
    type Narrowed = bool;
    type Output = bool;

    const NAME: &'static str = "boolean";

    fn check(&self, value: &Value) -> Option<bool> {
        value.as_bool()
    }

    fn convert(&self, value: &Value) -> Option<bool> {
        match value {
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" | "" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(|f| f != 0.0),
            _ => None,
        }
    }

    fn coerce(&self, value: bool, _path: &JsonPath) -> ValidationResult<bool> {
        Validation::Success(value)
    }

    fn to_value(&self, value: &bool) -> Value {
        Value::Bool(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reason;
    use crate::processor::Processor;
    use serde_json::json;

    #[test]
    fn test_string_forms() {
        let processor = as_boolean();
        assert_eq!(processor.process_root(&json!("true")).into_result().ok(), Some(true));
        assert_eq!(processor.process_root(&json!("false")).into_result().ok(), Some(false));
        assert_eq!(processor.process_root(&json!("")).into_result().ok(), Some(false));
    }

    #[test]
    fn test_numbers() {
        let processor = as_boolean();
        assert_eq!(processor.process_root(&json!(0)).into_result().ok(), Some(false));
        assert_eq!(processor.process_root(&json!(-3)).into_result().ok(), Some(true));
    }

    #[test]
    fn test_other_strings_do_not_convert() {
        let issues = as_boolean().process_root(&json!("yes")).into_result().unwrap_err();
        assert_eq!(issues.first().reason, Reason::NoConversion);

        let lenient = maybe_as_boolean().process_root(&json!("yes"));
        assert_eq!(lenient.into_result().ok(), Some(None));
    }

    #[test]
    fn test_strict_rejects_strings() {
        let issues = is_boolean().process_root(&json!("true")).into_result().unwrap_err();
        assert_eq!(issues.first().reason, Reason::IncorrectType);
        assert_eq!(issues.first().info["expectedType"], json!("boolean"));
    }
}
