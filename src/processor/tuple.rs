//! Fixed-length arrays with one processor per position.

use std::fmt;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::{Kind, ValueProcessor};
use crate::ValidationResult;

pub struct TupleKind {
    items: Vec<Box<dyn ValueProcessor>>,
}

impl fmt::Debug for TupleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleKind")
            .field("arity", &self.items.len())
            .finish()
    }
}

pub type TupleProcessor<M> = Pipeline<TupleKind, M>;

/// Arrays with exactly one element per item processor.
///
/// ```rust
/// use intake::{is_number, is_string, is_tuple, Processor, Reason};
/// use serde_json::json;
///
/// let pair = is_tuple([is_number().boxed(), is_string().boxed()]);
/// assert!(pair.process_root(&json!([2, "x"])).is_success());
///
/// let issues = pair.process_root(&json!([2])).into_result().unwrap_err();
/// assert_eq!(issues.first().reason, Reason::ExpectedItem);
/// assert_eq!(issues.first().path.to_string(), "[1]");
/// ```
pub fn is_tuple(items: impl IntoIterator<Item = Box<dyn ValueProcessor>>) -> TupleProcessor<Is> {
    pipeline::is(TupleKind {
        items: items.into_iter().collect(),
    })
}

pub fn maybe_tuple(
    items: impl IntoIterator<Item = Box<dyn ValueProcessor>>,
) -> TupleProcessor<Maybe> {
    pipeline::maybe(TupleKind {
        items: items.into_iter().collect(),
    })
}

/// Also accepts a string holding a JSON array.
pub fn as_tuple(items: impl IntoIterator<Item = Box<dyn ValueProcessor>>) -> TupleProcessor<As> {
    pipeline::convert(TupleKind {
        items: items.into_iter().collect(),
    })
}

pub fn maybe_as_tuple(
    items: impl IntoIterator<Item = Box<dyn ValueProcessor>>,
) -> TupleProcessor<MaybeAs> {
    pipeline::maybe_convert(TupleKind {
        items: items.into_iter().collect(),
    })
}

impl Kind for TupleKind {
    type Narrowed = Vec<Value>;
    type Output = Vec<Value>;

    const NAME: &'static str = "tuple";

    fn matches(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn check(&self, value: &Value) -> Option<Vec<Value>> {
        value.as_array().cloned()
    }

    fn convert(&self, value: &Value) -> Option<Vec<Value>> {
        match serde_json::from_str(value.as_str()?) {
            Ok(Value::Array(items)) => Some(items),
            _ => None,
        }
    }

    fn coerce(&self, value: Vec<Value>, path: &JsonPath) -> ValidationResult<Vec<Value>> {
        let mut issues = Vec::new();
        let mut output = Vec::with_capacity(self.items.len());

        for (index, processor) in self.items.iter().enumerate() {
            let item_path = path.push_index(index);
            let Some(item) = value.get(index) else {
                issues.push(Issue::new(item_path, Reason::ExpectedItem));
                continue;
            };
            match processor.process_value(Some(item), &item_path) {
                Validation::Success(coerced) => output.push(coerced.unwrap_or(Value::Null)),
                Validation::Failure(errors) => issues.extend(errors),
            }
        }

        issues.extend(
            value
                .iter()
                .enumerate()
                .skip(self.items.len())
                .map(|(index, extra)| {
                    Issue::new(path.push_index(index), Reason::UnexpectedItem)
                        .with_value(extra.clone())
                }),
        );

        Issues::outcome(issues, output)
    }

    fn to_value(&self, value: &Vec<Value>) -> Value {
        Value::Array(value.clone())
    }
}
