//! The ordered stages every pipeline runs.
//!
//! A value passes through, outer to inner:
//!
//! 1. a presence gate ([`Presence`]) deciding what absent input means,
//! 2. a type gate ([`Typing`]) narrowing or converting the value,
//! 3. domain coercion ([`Kind::coerce`]),
//! 4. validation ([`Kind::validate`] plus the custom validator).
//!
//! Each gate receives the rest of the chain as `next` and either answers on
//! its own or delegates. The first failure ends the chain.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::path::JsonPath;
use crate::processor::options::CommonOptions;
use crate::processor::traits::Kind;
use crate::ValidationResult;

/// Outcome of a stage: `Success(None)` is an undefined result.
pub(crate) type Step<T> = ValidationResult<Option<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    Required,
    Optional { wrong_type_to_none: bool },
}

impl Presence {
    pub(crate) fn apply<K, F>(
        self,
        kind: &K,
        options: &CommonOptions<K>,
        value: Option<&Value>,
        path: &JsonPath,
        next: F,
    ) -> Step<K::Output>
    where
        K: Kind,
        F: FnOnce(&Value) -> Step<K::Output>,
    {
        let present = match value {
            Some(v) if !kind.is_empty(v) => v,
            absent => {
                if let Some(default) = &options.default {
                    return Validation::Success(Some(default.clone()));
                }
                return match self {
                    Presence::Required => Validation::Failure(Issues::single(
                        Issue::new(path.clone(), Reason::NotDefined).with_value(absent.cloned()),
                    )),
                    Presence::Optional { .. } => Validation::Success(None),
                };
            }
        };

        match self {
            Presence::Optional {
                wrong_type_to_none: true,
            } if !kind.matches(present) => Validation::Success(None),
            _ => next(present),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Typing {
    Is,
    As { failure_to_none: bool },
}

impl Typing {
    pub(crate) fn apply<K, F>(
        self,
        kind: &K,
        options: &CommonOptions<K>,
        value: &Value,
        path: &JsonPath,
        next: F,
    ) -> Step<K::Output>
    where
        K: Kind,
        F: FnOnce(K::Narrowed) -> Step<K::Output>,
    {
        if let Some(narrowed) = kind.check(value) {
            return next(narrowed);
        }

        match self {
            Typing::Is => Validation::Failure(Issues::single(
                Issue::new(path.clone(), Reason::IncorrectType)
                    .with_value(value.clone())
                    .with_info("expectedType", K::NAME),
            )),
            Typing::As { failure_to_none } => {
                let converted = options
                    .converter
                    .as_ref()
                    .and_then(|c| c.convert(value))
                    .or_else(|| kind.convert(value));

                match (converted, &options.default) {
                    (Some(narrowed), _) => next(narrowed),
                    (None, Some(default)) => Validation::Success(Some(default.clone())),
                    (None, None) if failure_to_none => Validation::Success(None),
                    (None, None) => Validation::Failure(Issues::single(
                        Issue::new(path.clone(), Reason::NoConversion)
                            .with_value(value.clone())
                            .with_info("toType", K::NAME),
                    )),
                }
            }
        }
    }
}

/// Coercion followed by validation. Validation collects every violation,
/// including the custom validator's, before reporting.
pub(crate) fn coerce_and_validate<K: Kind>(
    kind: &K,
    options: &CommonOptions<K>,
    narrowed: K::Narrowed,
    path: &JsonPath,
) -> Step<K::Output> {
    let value = match kind.coerce(narrowed, path) {
        Validation::Success(value) => value,
        Validation::Failure(issues) => return Validation::Failure(issues),
    };

    let mut issues = Vec::new();
    kind.validate(&value, path, &mut issues);

    if let Some(validator) = &options.validator {
        if !validator.accepts(&value) {
            issues.push(
                Issue::new(path.clone(), Reason::Validator).with_value(kind.to_value(&value)),
            );
        }
    }

    Issues::outcome(issues, Some(value))
}
