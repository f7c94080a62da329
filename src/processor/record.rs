//! Objects with arbitrary keys and one processor for every value.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::{Kind, Processor};
use crate::ValidationResult;

#[derive(Debug, Clone)]
enum RecordConstraint {
    MinKeys(usize),
    MaxKeys(usize),
    KeyPattern { regex: Regex, pattern_str: String },
}

#[derive(Debug, Clone)]
pub struct RecordKind<P> {
    value: P,
    constraints: Vec<RecordConstraint>,
}

pub type RecordProcessor<P, M> = Pipeline<RecordKind<P>, M>;

/// Objects whose every value passes `value`. Keys keep input order.
///
/// ```rust
/// use intake::{is_number, is_record, Processor, Reason};
/// use serde_json::json;
///
/// let stock = is_record(is_number()).min_keys(2).max_keys(4);
/// assert!(stock.process_root(&json!({ "apples": 3, "pears": 0 })).is_success());
///
/// let issues = stock.process_root(&json!({})).into_result().unwrap_err();
/// assert_eq!(issues.first().reason, Reason::MinKeys);
/// ```
pub fn is_record<P: Processor>(value: P) -> RecordProcessor<P, Is> {
    pipeline::is(RecordKind {
        value,
        constraints: Vec::new(),
    })
}

pub fn maybe_record<P: Processor>(value: P) -> RecordProcessor<P, Maybe> {
    pipeline::maybe(RecordKind {
        value,
        constraints: Vec::new(),
    })
}

/// Also accepts a string holding a JSON object.
pub fn as_record<P: Processor>(value: P) -> RecordProcessor<P, As> {
    pipeline::convert(RecordKind {
        value,
        constraints: Vec::new(),
    })
}

pub fn maybe_as_record<P: Processor>(value: P) -> RecordProcessor<P, MaybeAs> {
    pipeline::maybe_convert(RecordKind {
        value,
        constraints: Vec::new(),
    })
}

impl<P: Processor, M: Mode> Pipeline<RecordKind<P>, M> {
    pub fn min_keys(mut self, min: usize) -> Self {
        self.kind.constraints.push(RecordConstraint::MinKeys(min));
        self
    }

    pub fn max_keys(mut self, max: usize) -> Self {
        self.kind.constraints.push(RecordConstraint::MaxKeys(max));
        self
    }

    /// Every key must match `pattern`; each failing key is reported at its
    /// own path with reason `key-regex`.
    pub fn key_regex(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.kind.constraints.push(RecordConstraint::KeyPattern {
            regex,
            pattern_str: pattern.to_string(),
        });
        Ok(self)
    }
}

impl<P: Processor> Kind for RecordKind<P> {
    type Narrowed = Map<String, Value>;
    type Output = IndexMap<String, P::Output>;

    const NAME: &'static str = "record";

    fn matches(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn check(&self, value: &Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    fn convert(&self, value: &Value) -> Option<Map<String, Value>> {
        match serde_json::from_str(value.as_str()?) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Key rules and values are checked in the same pass.
    fn coerce(
        &self,
        value: Map<String, Value>,
        path: &JsonPath,
    ) -> ValidationResult<IndexMap<String, P::Output>> {
        let mut issues = Vec::new();
        let mut output = IndexMap::with_capacity(value.len());

        let key_count = value.len();
        for constraint in &self.constraints {
            match constraint {
                RecordConstraint::MinKeys(min) if key_count < *min => issues.push(
                    Issue::new(path.clone(), Reason::MinKeys)
                        .with_value(Value::Object(value.clone()))
                        .with_info("min", *min)
                        .with_info("keyCount", key_count),
                ),
                RecordConstraint::MaxKeys(max) if key_count > *max => issues.push(
                    Issue::new(path.clone(), Reason::MaxKeys)
                        .with_value(Value::Object(value.clone()))
                        .with_info("max", *max)
                        .with_info("keyCount", key_count),
                ),
                _ => {}
            }
        }

        for (key, item) in &value {
            let key_path = path.push_field(key.as_str());
            for constraint in &self.constraints {
                if let RecordConstraint::KeyPattern { regex, pattern_str } = constraint {
                    if !regex.is_match(key) {
                        issues.push(
                            Issue::new(key_path.clone(), Reason::KeyRegex)
                                .with_value(Value::from(key.as_str()))
                                .with_info("regex", pattern_str.as_str()),
                        );
                    }
                }
            }
            match self.value.process(Some(item), &key_path) {
                Validation::Success(coerced) => {
                    output.insert(key.clone(), coerced);
                }
                Validation::Failure(errors) => issues.extend(errors),
            }
        }

        Issues::outcome(issues, output)
    }

    fn to_value(&self, value: &IndexMap<String, P::Output>) -> Value {
        Value::Object(
            value
                .iter()
                .filter_map(|(key, item)| Some((key.clone(), self.value.to_value(item)?)))
                .collect(),
        )
    }
}
