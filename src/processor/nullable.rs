//! `null` handling layered over any processor.

use serde_json::Value;
use stillwater::Validation;

use crate::path::JsonPath;
use crate::processor::traits::Processor;
use crate::ValidationResult;

/// Accepts an explicit `null` without consulting the wrapped processor;
/// everything else, absent input included, is delegated unchanged.
///
/// The output is `None` for `null`. With a default (see [`null_or_as`]) an
/// undefined result of the wrapped processor is replaced by the default.
#[derive(Debug, Clone)]
pub struct NullOr<P: Processor> {
    inner: P,
    default: Option<P::Output>,
}

/// ```rust
/// use intake::{is_string, null_or, Processor};
/// use serde_json::{json, Value};
///
/// let name = null_or(is_string().min_length(3));
/// assert_eq!(name.process_root(&Value::Null).into_result().unwrap(), None);
/// assert!(name.process_root(&json!("ab")).is_failure());
/// ```
pub fn null_or<P: Processor>(inner: P) -> NullOr<P> {
    NullOr {
        inner,
        default: None,
    }
}

/// Like [`null_or`], substituting `default` whenever the wrapped processor
/// produces an undefined result.
///
/// ```rust
/// use intake::{maybe_as_number, null_or_as, Processor};
/// use serde_json::json;
///
/// let limit = null_or_as(maybe_as_number(), Some(10.0));
/// assert_eq!(limit.process_root(&json!("abc")).into_result().unwrap(), Some(Some(10.0)));
/// ```
pub fn null_or_as<P: Processor>(inner: P, default: P::Output) -> NullOr<P> {
    NullOr {
        inner,
        default: Some(default),
    }
}

impl<P: Processor> NullOr<P> {
    fn undefined(&self, output: &P::Output) -> bool {
        self.inner.to_value(output).is_none()
    }
}

impl<P: Processor> Processor for NullOr<P> {
    type Output = Option<P::Output>;

    fn process(&self, value: Option<&Value>, path: &JsonPath) -> ValidationResult<Self::Output> {
        if let Some(Value::Null) = value {
            return Validation::Success(None);
        }

        match self.inner.process(value, path) {
            Validation::Success(output) => match &self.default {
                Some(default) if self.undefined(&output) => {
                    Validation::Success(Some(default.clone()))
                }
                _ => Validation::Success(Some(output)),
            },
            Validation::Failure(issues) => Validation::Failure(issues),
        }
    }

    fn to_value(&self, output: &Self::Output) -> Option<Value> {
        match output {
            None => Some(Value::Null),
            Some(inner) => self.inner.to_value(inner),
        }
    }
}
