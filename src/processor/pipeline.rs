//! Assembles the stages for a [`Kind`] in one of the four modes.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Converting, Is, Maybe, MaybeAs, Mode, Optional};
use crate::processor::options::{CommonOptions, Converter, Validator};
use crate::processor::stages::{coerce_and_validate, Presence, Typing};
use crate::processor::traits::{Kind, Processor};
use crate::ValidationResult;

/// A [`Kind`] wired into the presence, type, coercion and validation stages
/// for mode `M`.
///
/// Built through the `is_*`, `maybe_*`, `as_*` and `maybe_as_*` factory
/// functions. Kind-specific builder methods (bounds, regexes, ...) live next
/// to each kind; the ones here are shared by all kinds and gated by mode.
pub struct Pipeline<K: Kind, M: Mode> {
    pub(crate) kind: K,
    pub(crate) options: CommonOptions<K>,
    mode: PhantomData<M>,
}

impl<K: Kind, M: Mode> Pipeline<K, M> {
    pub(crate) fn new(kind: K) -> Self {
        Self {
            kind,
            options: CommonOptions::default(),
            mode: PhantomData,
        }
    }

    /// Appends a custom predicate to the validation stage. A rejected value
    /// is reported with reason `validator`.
    ///
    /// ```rust
    /// use intake::{is_number, Processor};
    /// use serde_json::json;
    ///
    /// let even = is_number().validator(|n| n % 2.0 == 0.0);
    /// assert!(even.process_root(&json!(4)).is_success());
    /// assert!(even.process_root(&json!(5)).is_failure());
    /// ```
    pub fn validator<F>(self, check: F) -> Self
    where
        F: Fn(&K::Output) -> bool + Send + Sync + 'static,
    {
        self.validator_with(Value::Null, move |value, _| check(value))
    }

    /// Like [`validator`](Self::validator), also passing `options` to every
    /// call.
    pub fn validator_with<F>(mut self, options: Value, check: F) -> Self
    where
        F: Fn(&K::Output, &Value) -> bool + Send + Sync + 'static,
    {
        self.options.validator = Some(Validator::new(options, check));
        self
    }

    fn presence(&self) -> Presence {
        if M::OPTIONAL {
            Presence::Optional {
                wrong_type_to_none: self.options.incorrect_type_to_undefined,
            }
        } else {
            Presence::Required
        }
    }

    fn typing(&self) -> Typing {
        if M::CONVERTS {
            Typing::As {
                failure_to_none: M::OPTIONAL && !self.options.strict_parsing,
            }
        } else {
            Typing::Is
        }
    }
}

impl<K: Kind, M: Converting> Pipeline<K, M> {
    /// Value produced when the input is absent or cannot be converted. It is
    /// returned as given, without coercion or validation.
    pub fn default(mut self, value: K::Output) -> Self {
        self.options.default = Some(value);
        self
    }

    /// Custom conversion tried before the built-in one.
    pub fn converter<F>(self, convert: F) -> Self
    where
        F: Fn(&Value) -> Option<K::Narrowed> + Send + Sync + 'static,
    {
        self.converter_with(Value::Null, move |value, _| convert(value))
    }

    pub fn converter_with<F>(mut self, options: Value, convert: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<K::Narrowed> + Send + Sync + 'static,
    {
        self.options.converter = Some(Converter::new(options, convert));
        self
    }
}

impl<K: Kind, M: Optional> Pipeline<K, M> {
    /// Non-empty input of the wrong type yields `None` instead of an issue.
    pub fn incorrect_type_to_undefined(mut self) -> Self {
        self.options.incorrect_type_to_undefined = true;
        self
    }
}

impl<K: Kind> Pipeline<K, MaybeAs> {
    /// Report failed conversions as `no-conversion` instead of yielding
    /// `None`.
    pub fn strict_parsing(mut self) -> Self {
        self.options.strict_parsing = true;
        self
    }
}

impl<K: Kind, M: Mode> Processor for Pipeline<K, M> {
    type Output = M::Output<K::Output>;

    fn process(&self, value: Option<&Value>, path: &JsonPath) -> ValidationResult<Self::Output> {
        let kind = &self.kind;
        let options = &self.options;
        let typing = self.typing();

        let step = self.presence().apply(kind, options, value, path, |present| {
            typing.apply(kind, options, present, path, |narrowed| {
                coerce_and_validate(kind, options, narrowed, path)
            })
        });

        match step {
            Validation::Success(output) => match M::wrap(output) {
                Some(output) => Validation::Success(output),
                // A required mode cannot hand out undefined.
                None => Validation::Failure(Issues::single(
                    Issue::new(path.clone(), Reason::NotDefined).with_value(value.cloned()),
                )),
            },
            Validation::Failure(issues) => Validation::Failure(issues),
        }
    }

    fn to_value(&self, output: &Self::Output) -> Option<Value> {
        M::inner(output).map(|value| self.kind.to_value(value))
    }
}

impl<K: Kind + Clone, M: Mode> Clone for Pipeline<K, M> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            options: self.options.clone(),
            mode: PhantomData,
        }
    }
}

impl<K: Kind + fmt::Debug, M: Mode> fmt::Debug for Pipeline<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("kind", &self.kind)
            .field("mode", &std::any::type_name::<M>())
            .finish_non_exhaustive()
    }
}

/// Builds the four processors of one kind.
pub(crate) fn is<K: Kind>(kind: K) -> Pipeline<K, Is> {
    Pipeline::new(kind)
}

pub(crate) fn maybe<K: Kind>(kind: K) -> Pipeline<K, Maybe> {
    Pipeline::new(kind)
}

pub(crate) fn convert<K: Kind>(kind: K) -> Pipeline<K, As> {
    Pipeline::new(kind)
}

pub(crate) fn maybe_convert<K: Kind>(kind: K) -> Pipeline<K, MaybeAs> {
    Pipeline::new(kind)
}
