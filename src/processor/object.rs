//! Objects checked against a fixed contract.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::{Kind, Processor, ValueProcessor};
use crate::ValidationResult;

/// Property names mapped to the processor for each property, in declaration
/// order.
///
/// ```rust
/// use intake::{as_number, is_object, is_string, Contract, Processor};
/// use serde_json::json;
///
/// let person = is_object(
///     Contract::new()
///         .field("name", is_string().min_length(1))
///         .field("age", as_number().min(0.0)),
/// );
///
/// let person_json = person.process_root(&json!({ "name": "Ada", "age": "36" }));
/// assert_eq!(person_json.into_result().unwrap()["age"], json!(36));
/// ```
#[derive(Clone)]
pub struct Contract {
    fields: Option<IndexMap<String, Arc<dyn ValueProcessor>>>,
}

impl Contract {
    /// A contract with no properties yet; every property on the input must
    /// be declared with [`field`](Self::field).
    pub fn new() -> Self {
        Self {
            fields: Some(IndexMap::new()),
        }
    }

    /// No contract at all: any object is accepted as-is.
    pub fn any() -> Self {
        Self { fields: None }
    }

    pub fn field<P>(mut self, name: impl Into<String>, processor: P) -> Self
    where
        P: Processor + 'static,
    {
        self.fields
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), Arc::new(processor));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.as_ref().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Contract {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fields {
            Some(fields) => f.debug_set().entries(fields.keys()).finish(),
            None => f.write_str("any"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectKind {
    contract: Contract,
    strip_extra_properties: bool,
}

pub type ObjectProcessor<M> = Pipeline<ObjectKind, M>;

fn kind(contract: Contract) -> ObjectKind {
    ObjectKind {
        contract,
        strip_extra_properties: false,
    }
}

pub fn is_object(contract: Contract) -> ObjectProcessor<Is> {
    pipeline::is(kind(contract))
}

pub fn maybe_object(contract: Contract) -> ObjectProcessor<Maybe> {
    pipeline::maybe(kind(contract))
}

/// Also accepts a string holding a JSON object.
pub fn as_object(contract: Contract) -> ObjectProcessor<As> {
    pipeline::convert(kind(contract))
}

pub fn maybe_as_object(contract: Contract) -> ObjectProcessor<MaybeAs> {
    pipeline::maybe_convert(kind(contract))
}

impl<M: Mode> Pipeline<ObjectKind, M> {
    /// Drop properties missing from the contract instead of reporting
    /// `unexpected-property`.
    pub fn strip_extra_properties(mut self) -> Self {
        self.kind.strip_extra_properties = true;
        self
    }
}

impl Kind for ObjectKind {
    type Narrowed = Map<String, Value>;
    type Output = Map<String, Value>;

    const NAME: &'static str = "object";

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

    fn coerce(
        &self,
        mut value: Map<String, Value>,
        path: &JsonPath,
    ) -> ValidationResult<Map<String, Value>> {
        let Some(fields) = &self.contract.fields else {
            return Validation::Success(value);
        };

        let mut issues = Vec::new();

        if self.strip_extra_properties {
            value.retain(|key, _| fields.contains_key(key));
        } else {
            issues.extend(
                value
                    .iter()
                    .filter(|(key, _)| !fields.contains_key(*key))
                    .map(|(key, extra)| {
                        Issue::new(path.push_field(key.as_str()), Reason::UnexpectedProperty)
                            .with_value(extra.clone())
                    }),
            );
        }

        let mut output = Map::new();
        for (name, processor) in fields {
            let field_path = path.push_field(name.as_str());
            match processor.process_value(value.get(name), &field_path) {
                Validation::Success(Some(coerced)) => {
                    output.insert(name.clone(), coerced);
                }
                Validation::Success(None) => {}
                Validation::Failure(errors) => issues.extend(errors),
            }
        }

        Issues::outcome(issues, output)
    }

    fn to_value(&self, value: &Map<String, Value>) -> Value {
        Value::Object(value.clone())
    }
}
