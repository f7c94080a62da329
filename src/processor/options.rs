//! Option groups shared by every pipeline.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::processor::traits::Kind;

type ValidatorFn<T> = dyn Fn(&T, &Value) -> bool + Send + Sync;
type ConverterFn<N> = dyn Fn(&Value, &Value) -> Option<N> + Send + Sync;

/// A custom predicate run in the validation stage, together with the opaque
/// options handed to it on every call.
pub struct Validator<T> {
    check: Arc<ValidatorFn<T>>,
    options: Value,
}

impl<T> Validator<T> {
    pub(crate) fn new<F>(options: Value, check: F) -> Self
    where
        F: Fn(&T, &Value) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            options,
        }
    }

    pub(crate) fn accepts(&self, value: &T) -> bool {
        (self.check)(value, &self.options)
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            options: self.options.clone(),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A custom conversion tried before the built-in one.
pub struct Converter<N> {
    convert: Arc<ConverterFn<N>>,
    options: Value,
}

impl<N> Converter<N> {
    pub(crate) fn new<F>(options: Value, convert: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<N> + Send + Sync + 'static,
    {
        Self {
            convert: Arc::new(convert),
            options,
        }
    }

    pub(crate) fn convert(&self, value: &Value) -> Option<N> {
        (self.convert)(value, &self.options)
    }
}

impl<N> Clone for Converter<N> {
    fn clone(&self) -> Self {
        Self {
            convert: Arc::clone(&self.convert),
            options: self.options.clone(),
        }
    }
}

impl<N> fmt::Debug for Converter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Options common to every kind. Which of them a caller can set depends on
/// the processing mode.
pub struct CommonOptions<K: Kind> {
    /// Returned as-is when input is absent or conversion fails.
    pub(crate) default: Option<K::Output>,
    pub(crate) validator: Option<Validator<K::Output>>,
    pub(crate) converter: Option<Converter<K::Narrowed>>,
    /// Maybe modes: wrongly typed input becomes `None`.
    pub(crate) incorrect_type_to_undefined: bool,
    /// `MaybeAs`: a failed conversion is an issue, not `None`.
    pub(crate) strict_parsing: bool,
}

impl<K: Kind> Default for CommonOptions<K> {
    fn default() -> Self {
        Self {
            default: None,
            validator: None,
            converter: None,
            incorrect_type_to_undefined: false,
            strict_parsing: false,
        }
    }
}

impl<K: Kind> Clone for CommonOptions<K> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
            validator: self.validator.clone(),
            converter: self.converter.clone(),
            incorrect_type_to_undefined: self.incorrect_type_to_undefined,
            strict_parsing: self.strict_parsing,
        }
    }
}
