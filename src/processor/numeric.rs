//! Numbers.
//!
//! Numbers are `f64`. Integral results are rendered back to JSON as integers,
//! so `as_number()` on `"47"` yields JSON `47`, not `47.0`.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{Issue, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberConstraint {
    Min(f64),
    Max(f64),
}

#[derive(Debug, Clone, Default)]
pub struct NumberKind {
    coerce_min: Option<f64>,
    coerce_max: Option<f64>,
    constraints: Vec<NumberConstraint>,
}

pub type NumberProcessor<M> = Pipeline<NumberKind, M>;

/// Numbers only.
///
/// ```rust
/// use intake::{is_number, Processor};
/// use serde_json::json;
///
/// assert!(is_number().process_root(&json!(2.5)).is_success());
/// assert!(is_number().process_root(&json!("2.5")).is_failure());
/// ```
pub fn is_number() -> NumberProcessor<Is> {
    pipeline::is(NumberKind::default())
}

pub fn maybe_number() -> NumberProcessor<Maybe> {
    pipeline::maybe(NumberKind::default())
}

/// Numbers, numeric strings and booleans.
///
/// ```rust
/// use intake::{as_number, Processor};
/// use serde_json::json;
///
/// let value = as_number().process_root(&json!(" 42 ")).into_result().unwrap();
/// assert_eq!(value, 42.0);
/// ```
pub fn as_number() -> NumberProcessor<As> {
    pipeline::convert(NumberKind::default())
}

pub fn maybe_as_number() -> NumberProcessor<MaybeAs> {
    pipeline::maybe_convert(NumberKind::default())
}

impl<M: Mode> Pipeline<NumberKind, M> {
    /// Rejects values below `min` with reason `min`.
    pub fn min(mut self, min: f64) -> Self {
        self.kind.constraints.push(NumberConstraint::Min(min));
        self
    }

    /// Rejects values above `max` with reason `max`.
    pub fn max(mut self, max: f64) -> Self {
        self.kind.constraints.push(NumberConstraint::Max(max));
        self
    }

    /// Raises values below `min` to `min` before validation.
    pub fn coerce_min(mut self, min: f64) -> Self {
        self.kind.coerce_min = Some(min);
        self
    }

    /// Lowers values above `max` to `max` before validation.
    pub fn coerce_max(mut self, max: f64) -> Self {
        self.kind.coerce_max = Some(max);
        self
    }
}

impl Kind for NumberKind {
    type Narrowed = f64;
    type Output = f64;

    const NAME: &'static str = "number";

    fn is_empty(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    fn check(&self, value: &Value) -> Option<f64> {
        value.as_f64()
    }

    fn convert(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    fn coerce(&self, mut value: f64, _path: &JsonPath) -> ValidationResult<f64> {
        if let Some(min) = self.coerce_min {
            value = value.max(min);
        }
        if let Some(max) = self.coerce_max {
            value = value.min(max);
        }
        Validation::Success(value)
    }

    fn validate(&self, value: &f64, path: &JsonPath, issues: &mut Vec<Issue>) {
        for constraint in &self.constraints {
            match *constraint {
                NumberConstraint::Min(min) if *value < min => issues.push(
                    Issue::new(path.clone(), Reason::Min)
                        .with_value(number_to_value(*value))
                        .with_info("min", number_to_value(min)),
                ),
                NumberConstraint::Max(max) if *value > max => issues.push(
                    Issue::new(path.clone(), Reason::Max)
                        .with_value(number_to_value(*value))
                        .with_info("max", number_to_value(max)),
                ),
                _ => {}
            }
        }
    }

    fn to_value(&self, value: &f64) -> Value {
        number_to_value(*value)
    }
}

/// JSON integer when `n` is integral and exactly representable, float
/// otherwise. Non-finite numbers have no JSON form and become `null`.
pub(crate) fn number_to_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Processor;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_empty_string_is_absent() {
        let issues = unwrap_failure(is_number().process_root(&json!("")));
        assert_eq!(issues.first().reason, Reason::NotDefined);

        assert_eq!(unwrap_success(maybe_number().process_root(&json!(""))), None);
    }

    #[test]
    fn test_conversion() {
        assert_eq!(unwrap_success(as_number().process_root(&json!("42"))), 42.0);
        assert_eq!(unwrap_success(as_number().process_root(&json!("-1.5e2"))), -150.0);
        assert_eq!(unwrap_success(as_number().process_root(&json!(true))), 1.0);
        assert_eq!(unwrap_success(as_number().process_root(&json!(false))), 0.0);
    }

    #[test]
    fn test_unconvertible() {
        for input in [json!("abc"), json!("NaN"), json!("inf"), json!([1]), json!({})] {
            let issues = unwrap_failure(as_number().process_root(&input));
            let issue = issues.first();
            assert_eq!(issue.reason, Reason::NoConversion);
            assert_eq!(issue.info["toType"], json!("number"));
        }
    }

    #[test]
    fn test_clamping_happens_before_bounds() {
        let clamped = is_number().coerce_min(0.0).coerce_max(10.0).min(0.0).max(10.0);
        assert_eq!(unwrap_success(clamped.process_root(&json!(-4))), 0.0);
        assert_eq!(unwrap_success(clamped.process_root(&json!(99))), 10.0);
        assert_eq!(unwrap_success(clamped.process_root(&json!(3.5))), 3.5);
    }

    #[test]
    fn test_min_and_validator_reported_together() {
        let processor = is_number().min(25.0).validator(|n| *n > 100.0);
        let issues = unwrap_failure(processor.process_root(&json!(2)));
        assert_eq!(issues.len(), 2);
        let issues = issues.into_vec();
        assert_eq!(issues[0].reason, Reason::Min);
        assert_eq!(issues[0].info["min"], json!(25));
        assert_eq!(issues[1].reason, Reason::Validator);
    }

    #[test]
    fn test_to_value_prefers_integers() {
        assert_eq!(number_to_value(47.0), json!(47));
        assert_eq!(number_to_value(-0.5), json!(-0.5));
        assert_eq!(number_to_value(f64::NAN), Value::Null);
    }
}
