//! Closed sets of string or number members, each with a symbolic key.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

#[derive(Debug, Clone)]
pub struct EnumKind {
    entries: Vec<(String, Value)>,
    /// Converting modes only treat members as correctly typed; anything else
    /// has to go through key lookup.
    members_only: bool,
}

pub type EnumProcessor<M> = Pipeline<EnumKind, M>;

impl EnumKind {
    fn new<I, K, V>(entries: I, members_only: bool) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            members_only,
        }
    }

    fn is_member(&self, value: &Value) -> bool {
        self.entries.iter().any(|(_, member)| same_member(member, value))
    }

    fn value_for_key(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, member)| member)
    }
}

/// Numbers compare by value, so `1` and `1.0` are the same member.
fn same_member(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Any string or number; membership is checked during validation.
///
/// ```rust
/// use intake::{is_enum, Processor};
/// use serde_json::json;
///
/// let color = is_enum([("Red", "r"), ("Green", "g")]);
/// assert!(color.process_root(&json!("g")).is_success());
/// assert!(color.process_root(&json!("Green")).is_failure());
/// ```
pub fn is_enum<I, K, V>(entries: I) -> EnumProcessor<Is>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pipeline::is(EnumKind::new(entries, false))
}

pub fn maybe_enum<I, K, V>(entries: I) -> EnumProcessor<Maybe>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pipeline::maybe(EnumKind::new(entries, false))
}

/// Members pass through; member keys convert to their value.
///
/// ```rust
/// use intake::{as_enum, Processor};
/// use serde_json::json;
///
/// let level = as_enum([("Low", 1), ("High", 2)]);
/// assert_eq!(level.process_root(&json!("High")).into_result().unwrap(), json!(2));
/// ```
pub fn as_enum<I, K, V>(entries: I) -> EnumProcessor<As>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pipeline::convert(EnumKind::new(entries, true))
}

/// Like [`as_enum`] but absent input is `None`. Unknown keys are always
/// reported.
pub fn maybe_as_enum<I, K, V>(entries: I) -> EnumProcessor<MaybeAs>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pipeline::maybe_convert(EnumKind::new(entries, true)).strict_parsing()
}

impl Kind for EnumKind {
    type Narrowed = Value;
    type Output = Value;

    const NAME: &'static str = "enum";

    fn check(&self, value: &Value) -> Option<Value> {
        let accepted = if self.members_only {
            self.is_member(value)
        } else {
            value.is_string() || value.is_number()
        };
        accepted.then(|| value.clone())
    }

    fn convert(&self, value: &Value) -> Option<Value> {
        self.value_for_key(value.as_str()?).cloned()
    }

    fn coerce(&self, value: Value, _path: &JsonPath) -> ValidationResult<Value> {
        Validation::Success(value)
    }

    fn validate(&self, value: &Value, path: &JsonPath, issues: &mut Vec<Issue>) {
        if !self.is_member(value) {
            let keys: Vec<Value> = self.entries.iter().map(|(k, _)| Value::from(k.as_str())).collect();
            let values: Vec<Value> = self.entries.iter().map(|(_, v)| v.clone()).collect();
            issues.push(
                Issue::new(path.clone(), Reason::KeyNotFound)
                    .with_value(value.clone())
                    .with_info("validKeys", keys)
                    .with_info("validValues", values),
            );
        }
    }

    fn to_value(&self, value: &Value) -> Value {
        value.clone()
    }
}
