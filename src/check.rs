//! Boundary entry points turning a processor outcome into a `Result`.

use std::future::Future;

use serde_json::Value;
use stillwater::Validation;

use crate::error::ValidationError;
use crate::path::JsonPath;
use crate::processor::Processor;
use crate::ValidationResult;

/// Runs `processor` on the value produced by `value`, located at `path`.
///
/// The value is produced lazily so that building it (reading a request body,
/// parsing a file) happens only when the check actually runs. The provider
/// may return a plain [`Value`] or an `Option<Value>`, where `None` is an
/// absent value. Every issue in the returned error is located at `path` or
/// below it.
///
/// ```rust
/// use intake::{as_number, check, is_object, Contract, JsonPath, Reason};
/// use serde_json::json;
///
/// let query = is_object(Contract::new().field("page", as_number().min(1.0)));
///
/// let page = check(&query, || json!({ "page": "3" }), JsonPath::root()).unwrap();
/// assert_eq!(page["page"], json!(3));
///
/// let err = check(&query, || json!({ "page": 0 }), "query").unwrap_err();
/// assert_eq!(err.issues().first().reason, Reason::Min);
/// assert_eq!(err.issues().first().path.to_string(), "query.page");
/// ```
pub fn check<P, F, V>(
    processor: &P,
    value: F,
    path: impl Into<JsonPath>,
) -> Result<P::Output, ValidationError>
where
    P: Processor + ?Sized,
    F: FnOnce() -> V,
    V: Into<Option<Value>>,
{
    let path = path.into();
    let value: Option<Value> = value().into();
    finish(processor.process(value.as_ref(), &path), &path)
}

/// Like [`check`], awaiting the value first.
pub async fn check_async<P, F, V>(
    processor: &P,
    value: F,
    path: impl Into<JsonPath>,
) -> Result<P::Output, ValidationError>
where
    P: Processor + ?Sized,
    F: Future<Output = V>,
    V: Into<Option<Value>>,
{
    let path = path.into();
    let value: Option<Value> = value.await.into();
    finish(processor.process(value.as_ref(), &path), &path)
}

fn finish<T>(result: ValidationResult<T>, path: &JsonPath) -> Result<T, ValidationError> {
    match result {
        Validation::Success(output) => {
            tracing::trace!(path = %path, "input accepted");
            Ok(output)
        }
        Validation::Failure(issues) => {
            tracing::debug!(
                path = %path,
                issues = issues.len(),
                first = %issues.first(),
                "input rejected"
            );
            Err(ValidationError::new(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reason;
    use crate::processor::{as_number, is_number, maybe_number};
    use serde_json::json;

    #[test]
    fn test_value_is_built_once() {
        let mut calls = 0;
        let output = check(
            &as_number(),
            || {
                calls += 1;
                json!("12")
            },
            JsonPath::root(),
        );
        assert_eq!(output.unwrap(), 12.0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_issues_are_located_under_path() {
        let err = check(&is_number(), || json!("x"), "body").unwrap_err();
        assert_eq!(err.issues().len(), 1);
        let issue = err.issues().first();
        assert_eq!(issue.reason, Reason::IncorrectType);
        assert_eq!(issue.path.to_string(), "body");
    }

    #[test]
    fn test_absent_value() {
        let err = check(&is_number(), || None::<Value>, "limit").unwrap_err();
        let issue = err.issues().first();
        assert_eq!(issue.reason, Reason::NotDefined);
        assert_eq!(issue.path.to_string(), "limit");

        let output = check(&maybe_number(), || None::<Value>, "limit").unwrap();
        assert_eq!(output, None);

        let output = check(&maybe_number(), || Some(json!(5)), "limit").unwrap();
        assert_eq!(output, Some(5.0));
    }
}
