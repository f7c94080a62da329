//! Homogeneous arrays.
//!
//! One item processor is applied to every element, each under its own index
//! path. All elements are processed even after one fails, so a single call
//! reports every bad element.

use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::{Kind, Processor};
use crate::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayConstraint {
    MinLength(usize),
    MaxLength(usize),
}

#[derive(Debug, Clone)]
pub struct ArrayKind<P> {
    item: P,
    coerce_max_length: Option<usize>,
    constraints: Vec<ArrayConstraint>,
    parallel: bool,
}

pub type ArrayProcessor<P, M> = Pipeline<ArrayKind<P>, M>;

fn kind<P: Processor>(item: P) -> ArrayKind<P> {
    ArrayKind {
        item,
        coerce_max_length: None,
        constraints: Vec::new(),
        parallel: false,
    }
}

/// Arrays whose every element passes `item`.
///
/// ```rust
/// use intake::{is_array, is_number, Processor, Reason};
/// use serde_json::json;
///
/// let scores = is_array(is_number().min(25.0));
/// let issues = scores.process_root(&json!([87, 2, 45])).into_result().unwrap_err();
///
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues.first().reason, Reason::Min);
/// assert_eq!(issues.first().path.to_string(), "[1]");
/// ```
pub fn is_array<P: Processor>(item: P) -> ArrayProcessor<P, Is> {
    pipeline::is(kind(item))
}

pub fn maybe_array<P: Processor>(item: P) -> ArrayProcessor<P, Maybe> {
    pipeline::maybe(kind(item))
}

/// A lone non-array value is treated as a one-element array.
pub fn as_array<P: Processor>(item: P) -> ArrayProcessor<P, As> {
    pipeline::convert(kind(item))
}

pub fn maybe_as_array<P: Processor>(item: P) -> ArrayProcessor<P, MaybeAs> {
    pipeline::maybe_convert(kind(item))
}

impl<P: Processor, M: Mode> Pipeline<ArrayKind<P>, M> {
    /// Drops elements past `max` before the items are processed.
    pub fn coerce_max_length(mut self, max: usize) -> Self {
        self.kind.coerce_max_length = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.kind.constraints.push(ArrayConstraint::MinLength(min));
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.kind.constraints.push(ArrayConstraint::MaxLength(max));
        self
    }

    /// Processes elements on the rayon thread pool. Outputs and issues keep
    /// element order.
    pub fn parallel(mut self) -> Self {
        self.kind.parallel = true;
        self
    }
}

impl<P: Processor> Kind for ArrayKind<P> {
    type Narrowed = Vec<Value>;
    type Output = Vec<P::Output>;

    const NAME: &'static str = "array";

    fn matches(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn check(&self, value: &Value) -> Option<Vec<Value>> {
        value.as_array().cloned()
    }

    fn convert(&self, value: &Value) -> Option<Vec<Value>> {
        Some(vec![value.clone()])
    }

    fn coerce(&self, mut items: Vec<Value>, path: &JsonPath) -> ValidationResult<Vec<P::Output>> {
        if let Some(max) = self.coerce_max_length {
            items.truncate(max);
        }

        let process = |(index, item): (usize, &Value)| {
            self.item.process(Some(item), &path.push_index(index))
        };
        let results: Vec<ValidationResult<P::Output>> = if self.parallel {
            tracing::trace!(path = %path, items = items.len(), "processing array items in parallel");
            items.par_iter().enumerate().map(process).collect()
        } else {
            items.iter().enumerate().map(process).collect()
        };

        let mut issues = Vec::new();
        let mut output = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Validation::Success(value) => output.push(value),
                Validation::Failure(errors) => issues.extend(errors),
            }
        }
        Issues::outcome(issues, output)
    }

    fn validate(&self, value: &Vec<P::Output>, path: &JsonPath, issues: &mut Vec<Issue>) {
        let length = value.len();
        for constraint in &self.constraints {
            let issue = match *constraint {
                ArrayConstraint::MinLength(min) if length < min => {
                    Issue::new(path.clone(), Reason::MinLength).with_info("min", min)
                }
                ArrayConstraint::MaxLength(max) if length > max => {
                    Issue::new(path.clone(), Reason::MaxLength).with_info("max", max)
                }
                _ => continue,
            };
            issues.push(issue.with_value(self.to_value(value)).with_info("length", length));
        }
    }

    fn to_value(&self, value: &Vec<P::Output>) -> Value {
        Value::Array(
            value
                .iter()
                .map(|item| self.item.to_value(item).unwrap_or(Value::Null))
                .collect(),
        )
    }
}
