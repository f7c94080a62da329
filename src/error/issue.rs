//! Issue records and their non-empty collection.
//!
//! [`Issue`] describes one rejected value. [`Issues`] is the failure side of
//! every [`ValidationResult`](crate::ValidationResult) and always holds at
//! least one issue.

use std::fmt::{self, Display};

use serde_json::{Map, Value};
use stillwater::prelude::*;
use stillwater::Validation;

use crate::path::JsonPath;
use crate::ValidationResult;

/// Machine-readable tag naming why a value was rejected.
///
/// The string form returned by [`Reason::as_str`] is stable and meant for
/// downstream consumers (error UIs, API responses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NotDefined,
    IncorrectType,
    NoConversion,
    Validator,
    MinLength,
    MaxLength,
    Min,
    Max,
    MinKeys,
    MaxKeys,
    KeyRegex,
    KeyNotFound,
    UnexpectedProperty,
    UnexpectedItem,
    ExpectedItem,
    MaxFuture,
    MaxPast,
    InvalidProtocol,
    Regex,
    Format,
}

/// Coarse grouping of [`Reason`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Value absent or of the wrong runtime type.
    Shape,
    /// Value could not be converted into the target type.
    Conversion,
    /// Right type, but a domain rule is violated.
    Validation,
    /// Composite shape mismatch (extra or missing members).
    Structural,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::NotDefined => "not-defined",
            Reason::IncorrectType => "incorrect-type",
            Reason::NoConversion => "no-conversion",
            Reason::Validator => "validator",
            Reason::MinLength => "min-length",
            Reason::MaxLength => "max-length",
            Reason::Min => "min",
            Reason::Max => "max",
            Reason::MinKeys => "min-keys",
            Reason::MaxKeys => "max-keys",
            Reason::KeyRegex => "key-regex",
            Reason::KeyNotFound => "key-not-found",
            Reason::UnexpectedProperty => "unexpected-property",
            Reason::UnexpectedItem => "unexpected-item",
            Reason::ExpectedItem => "expected-item",
            Reason::MaxFuture => "max-future",
            Reason::MaxPast => "max-past",
            Reason::InvalidProtocol => "invalid-protocol",
            Reason::Regex => "regex",
            Reason::Format => "format",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Reason::NotDefined | Reason::IncorrectType => Category::Shape,
            Reason::NoConversion => Category::Conversion,
            Reason::UnexpectedProperty | Reason::UnexpectedItem | Reason::ExpectedItem => {
                Category::Structural
            }
            _ => Category::Validation,
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected value.
///
/// # Example
///
/// ```rust
/// use intake::{Issue, JsonPath, Reason};
/// use serde_json::json;
///
/// let issue = Issue::new(JsonPath::from_field("age"), Reason::Min)
///     .with_value(json!(3))
///     .with_info("min", json!(18));
///
/// assert_eq!(issue.reason.as_str(), "min");
/// assert_eq!(issue.info["min"], json!(18));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Location of the offending value.
    pub path: JsonPath,
    /// The offending value, `None` when it was absent.
    pub value: Option<Value>,
    pub reason: Reason,
    /// Reason-specific detail such as `{ "min": 18 }`.
    pub info: Map<String, Value>,
}

impl Issue {
    pub fn new(path: JsonPath, reason: Reason) -> Self {
        Self {
            path,
            value: None,
            reason,
            info: Map::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Option<Value>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }

    /// Returns a copy of this issue located under `parent`.
    ///
    /// ```rust
    /// use intake::{Issue, JsonPath, Reason};
    ///
    /// let issue = Issue::new(JsonPath::from_field("a"), Reason::NotDefined);
    /// let nested = issue.nest(&JsonPath::from_field("o"));
    /// assert_eq!(nested.path.to_string(), "o.a");
    /// assert_eq!(issue.path.to_string(), "a");
    /// ```
    pub fn nest(&self, parent: &JsonPath) -> Self {
        Self {
            path: parent.join(&self.path),
            ..self.clone()
        }
    }

    /// Renders the issue as `{ path, reason, value?, info? }`.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("path".to_string(), self.path.to_json());
        out.insert("reason".to_string(), Value::from(self.reason.as_str()));
        if let Some(value) = &self.value {
            out.insert("value".to_string(), value.clone());
        }
        if !self.info.is_empty() {
            out.insert("info".to_string(), Value::Object(self.info.clone()));
        }
        Value::Object(out)
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.reason)?;
        } else {
            write!(f, "{}: {}", self.path, self.reason)?;
        }
        if !self.info.is_empty() {
            write!(f, " {}", Value::Object(self.info.clone()))?;
        }
        if let Some(value) = &self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty, ordered collection of [`Issue`]s.
///
/// Issues from sibling values are merged with [`Semigroup::combine`], which
/// keeps them in the order they were produced.
///
/// ```rust
/// use intake::{Issue, Issues, JsonPath, Reason};
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::new(JsonPath::from_field("a"), Reason::NotDefined));
/// let b = Issues::single(Issue::new(JsonPath::from_field("b"), Reason::NotDefined));
///
/// let both = a.combine(b);
/// assert_eq!(both.len(), 2);
/// assert_eq!(both.first().path.to_string(), "a");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Returns `None` when `issues` is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self)
    }

    /// Success with `value` when `issues` is empty, failure otherwise.
    pub fn outcome<T>(issues: Vec<Issue>, value: T) -> ValidationResult<T> {
        match Self::from_vec(issues) {
            Some(issues) => Validation::Failure(issues),
            None => Validation::Success(value),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    pub fn at_path(&self, path: &JsonPath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    pub fn with_reason(&self, reason: Reason) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.reason == reason).collect()
    }

    /// Re-bases every issue under `parent`.
    pub fn nest(&self, parent: &JsonPath) -> Self {
        let nested = self.0.iter().map(|i| i.nest(parent)).collect::<Vec<_>>();
        match NonEmptyVec::from_vec(nested) {
            Some(issues) => Self(issues),
            None => self.clone(),
        }
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }

    /// Renders all issues as a JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.iter().map(Issue::to_json).collect())
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
