//! Absolute URLs.
//!
//! JSON has no URL type, so the typed form is a string that is already in
//! canonical serialization (`https://example.com/`, with the trailing slash).
//! Any other parseable string needs conversion.

use serde_json::Value;
use stillwater::Validation;
use url::Url;

use crate::error::{Issue, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

#[derive(Debug, Clone, Default)]
pub struct UrlKind {
    set_protocol: Option<String>,
    protocol: Option<String>,
}

pub type UrlProcessor<M> = Pipeline<UrlKind, M>;

pub fn is_url() -> UrlProcessor<Is> {
    pipeline::is(UrlKind::default())
}

pub fn maybe_url() -> UrlProcessor<Maybe> {
    pipeline::maybe(UrlKind::default())
}

/// Any string the WHATWG URL parser accepts.
///
/// ```rust
/// use intake::{as_url, Processor};
/// use serde_json::json;
///
/// let url = as_url().process_root(&json!("HTTPS://Example.com")).into_result().unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn as_url() -> UrlProcessor<As> {
    pipeline::convert(UrlKind::default())
}

pub fn maybe_as_url() -> UrlProcessor<MaybeAs> {
    pipeline::maybe_convert(UrlKind::default())
}

impl<M: Mode> Pipeline<UrlKind, M> {
    /// Replaces the scheme before validation. Scheme changes the URL
    /// standard forbids (e.g. `https` to `mailto`) leave the URL unchanged.
    pub fn set_protocol(mut self, scheme: impl Into<String>) -> Self {
        self.kind.set_protocol = Some(scheme.into());
        self
    }

    /// Requires the given scheme; a trailing `:` is ignored on both sides.
    pub fn protocol(mut self, scheme: impl Into<String>) -> Self {
        self.kind.protocol = Some(scheme.into());
        self
    }
}

fn bare_scheme(scheme: &str) -> &str {
    scheme.trim_end().trim_end_matches(':')
}

impl Kind for UrlKind {
    type Narrowed = Url;
    type Output = Url;

    const NAME: &'static str = "url";

    fn check(&self, value: &Value) -> Option<Url> {
        let text = value.as_str()?;
        Url::parse(text).ok().filter(|url| url.as_str() == text)
    }

    fn convert(&self, value: &Value) -> Option<Url> {
        Url::parse(value.as_str()?.trim()).ok()
    }

    fn coerce(&self, mut value: Url, _path: &JsonPath) -> ValidationResult<Url> {
        if let Some(scheme) = &self.set_protocol {
            // Unchanged on rejection.
            if value.set_scheme(bare_scheme(scheme)).is_err() {
                tracing::trace!(
                    url = %value,
                    scheme = %scheme,
                    "scheme change refused, keeping original"
                );
            }
        }
        Validation::Success(value)
    }

    fn validate(&self, value: &Url, path: &JsonPath, issues: &mut Vec<Issue>) {
        if let Some(expected) = &self.protocol {
            if value.scheme() != bare_scheme(expected) {
                issues.push(
                    Issue::new(path.clone(), Reason::InvalidProtocol)
                        .with_value(Value::from(value.as_str()))
                        .with_info("expectedProtocol", expected.as_str()),
                );
            }
        }
    }

    fn to_value(&self, value: &Url) -> Value {
        Value::String(value.as_str().to_string())
    }
}
