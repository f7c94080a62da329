//! The processor capability and the typed-value capability behind it.
//!
//! [`Processor`] is what callers use. [`Kind`] is what a concrete value type
//! implements to plug into the shared four-stage pipeline; every `Kind`
//! becomes a family of processors through
//! [`Pipeline`](crate::processor::Pipeline).

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::Issue;
use crate::path::JsonPath;
use crate::ValidationResult;

/// Turns one untyped input value into a typed output, or a list of issues.
///
/// `value` is `None` when the input is absent (a missing property or tuple
/// slot) and `Some(&Value::Null)` when it is an explicit `null`. `path` is the
/// location of `value` inside the top-level input; every issue produced is
/// located at `path` or below it.
///
/// Processors are immutable after construction and hold no per-call state,
/// so a single instance can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use intake::{as_number, JsonPath, Processor};
/// use serde_json::json;
///
/// let port = as_number().min(1.0).max(65535.0);
///
/// let result = port.process(Some(&json!("8080")), &JsonPath::root());
/// assert_eq!(result.into_result().ok(), Some(8080.0));
/// ```
pub trait Processor: Send + Sync {
    /// The typed value produced on success.
    type Output: Clone + Send + Sync;

    fn process(&self, value: Option<&Value>, path: &JsonPath) -> ValidationResult<Self::Output>;

    /// Renders a successful output back into JSON. `None` means the output is
    /// undefined and should be left out of any enclosing object.
    fn to_value(&self, output: &Self::Output) -> Option<Value>;

    /// Processes a top-level value with the root path.
    fn process_root(&self, value: &Value) -> ValidationResult<Self::Output> {
        self.process(Some(value), &JsonPath::root())
    }

    /// Erases the output type so processors of different types can sit side
    /// by side in a contract or tuple.
    fn boxed(self) -> Box<dyn ValueProcessor>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<P: Processor + ?Sized> Processor for Arc<P> {
    type Output = P::Output;

    fn process(&self, value: Option<&Value>, path: &JsonPath) -> ValidationResult<Self::Output> {
        (**self).process(value, path)
    }

    fn to_value(&self, output: &Self::Output) -> Option<Value> {
        (**self).to_value(output)
    }
}

/// Type-erased processor producing JSON.
///
/// Every [`Processor`] is a `ValueProcessor`, so heterogeneous children can be
/// stored as `Box<dyn ValueProcessor>`.
pub trait ValueProcessor: Send + Sync {
    fn process_value(&self, value: Option<&Value>, path: &JsonPath)
        -> ValidationResult<Option<Value>>;
}

impl<P: Processor> ValueProcessor for P {
    fn process_value(
        &self,
        value: Option<&Value>,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        match self.process(value, path) {
            Validation::Success(output) => Validation::Success(self.to_value(&output)),
            Validation::Failure(issues) => Validation::Failure(issues),
        }
    }
}

/// A concrete value type that can be checked, converted, coerced and
/// validated.
///
/// `Narrowed` is the value as accepted by the type check or produced by a
/// conversion; `Output` is the value after domain coercion. They are the same
/// type for leaves. For composites `Narrowed` is the raw container and
/// `Output` the container of typed children.
pub trait Kind: Send + Sync {
    type Narrowed;
    type Output: Clone + Send + Sync;

    /// Type name reported in `incorrect-type` and `no-conversion` issues.
    const NAME: &'static str;

    /// Values treated as absent by the presence gates.
    fn is_empty(&self, value: &Value) -> bool {
        value.is_null()
    }

    fn matches(&self, value: &Value) -> bool {
        self.check(value).is_some()
    }

    /// Narrows an already correctly typed value.
    fn check(&self, value: &Value) -> Option<Self::Narrowed>;

    /// Best-effort conversion of a wrongly typed value.
    fn convert(&self, _value: &Value) -> Option<Self::Narrowed> {
        None
    }

    /// Shape-preserving normalization. Composites process their children here.
    fn coerce(&self, value: Self::Narrowed, path: &JsonPath) -> ValidationResult<Self::Output>;

    /// Domain rules. Pushes every violation; never stops at the first.
    fn validate(&self, _value: &Self::Output, _path: &JsonPath, _issues: &mut Vec<Issue>) {}

    fn to_value(&self, value: &Self::Output) -> Value;
}
