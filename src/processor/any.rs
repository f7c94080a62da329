//! Processors that accept any value.

use serde_json::Value;
use stillwater::Validation;

use crate::path::JsonPath;
use crate::processor::mode::Is;
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::{Kind, Processor};
use crate::ValidationResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnyKind;

pub type AnyProcessor = Pipeline<AnyKind, Is>;

/// Any defined, non-null value. Combine with
/// [`validator`](Pipeline::validator) for ad hoc checks.
pub fn is_any() -> AnyProcessor {
    pipeline::is(AnyKind)
}

impl Kind for AnyKind {
    type Narrowed = Value;
    type Output = Value;

    const NAME: &'static str = "any";

    fn check(&self, value: &Value) -> Option<Value> {
        Some(value.clone())
    }

    fn coerce(&self, value: Value, _path: &JsonPath) -> ValidationResult<Value> {
        Validation::Success(value)
    }

    fn to_value(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Passes every input through untouched, absent input included.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

/// Item processor for arrays whose items need no checking.
///
/// ```rust
/// use intake::{is_array, unchecked, Processor};
/// use serde_json::json;
///
/// let items = is_array(unchecked()).max_length(3);
/// assert!(items.process_root(&json!([1, "two", null])).is_success());
/// ```
pub fn unchecked() -> Unchecked {
    Unchecked
}

impl Processor for Unchecked {
    type Output = Option<Value>;

    fn process(&self, value: Option<&Value>, _path: &JsonPath) -> ValidationResult<Option<Value>> {
        Validation::Success(value.cloned())
    }

    fn to_value(&self, output: &Option<Value>) -> Option<Value> {
        output.clone()
    }
}
