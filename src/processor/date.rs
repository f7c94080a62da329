//! Points in time, normalized to UTC.
//!
//! The typed form is an RFC 3339 string such as `2024-05-01T12:00:00Z`.
//! Conversion additionally accepts epoch milliseconds, plain ISO dates and
//! ISO date-times without an offset (both read as UTC).

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Reason};
use crate::path::JsonPath;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Years an RFC 3339 timestamp can spell with four digits.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateConstraint {
    MaxFuture(Duration),
    MaxPast(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct DateKind {
    constraints: Vec<DateConstraint>,
}

pub type DateProcessor<M> = Pipeline<DateKind, M>;

pub fn is_date() -> DateProcessor<Is> {
    pipeline::is(DateKind::default())
}

pub fn maybe_date() -> DateProcessor<Maybe> {
    pipeline::maybe(DateKind::default())
}

/// RFC 3339 strings, epoch milliseconds and offset-less ISO dates.
///
/// ```rust
/// use intake::{as_date, Processor};
/// use serde_json::json;
///
/// let at = as_date().process_root(&json!(0)).into_result().unwrap();
/// assert_eq!(at.to_rfc3339(), "1970-01-01T00:00:00+00:00");
/// ```
pub fn as_date() -> DateProcessor<As> {
    pipeline::convert(DateKind::default())
}

pub fn maybe_as_date() -> DateProcessor<MaybeAs> {
    pipeline::maybe_convert(DateKind::default())
}

impl<M: Mode> Pipeline<DateKind, M> {
    /// Rejects instants later than now plus `window` with reason `max-future`.
    pub fn max_future(mut self, window: Duration) -> Self {
        self.kind.constraints.push(DateConstraint::MaxFuture(window));
        self
    }

    /// Rejects instants earlier than now minus `window` with reason
    /// `max-past`.
    pub fn max_past(mut self, window: Duration) -> Self {
        self.kind.constraints.push(DateConstraint::MaxPast(window));
        self
    }
}

impl Kind for DateKind {
    type Narrowed = DateTime<Utc>;
    type Output = DateTime<Utc>;

    const NAME: &'static str = "date";

    fn check(&self, value: &Value) -> Option<DateTime<Utc>> {
        let text = value.as_str()?;
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn convert(&self, value: &Value) -> Option<DateTime<Utc>> {
        let converted = match value {
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
                Utc.timestamp_millis_opt(millis).single()
            }
            Value::String(text) => parse_lenient(text.trim()),
            _ => None,
        };
        converted.filter(|at| YEARS.contains(&at.year()))
    }

    fn coerce(&self, value: DateTime<Utc>, _path: &JsonPath) -> ValidationResult<DateTime<Utc>> {
        Validation::Success(value)
    }

    fn validate(&self, value: &DateTime<Utc>, path: &JsonPath, issues: &mut Vec<Issue>) {
        let now = Utc::now();
        for constraint in &self.constraints {
            match *constraint {
                DateConstraint::MaxFuture(window) => {
                    if let Some(max) = now.checked_add_signed(window) {
                        if *value > max {
                            issues.push(
                                Issue::new(path.clone(), Reason::MaxFuture)
                                    .with_value(render(value))
                                    .with_info("max", render(&max)),
                            );
                        }
                    }
                }
                DateConstraint::MaxPast(window) => {
                    if let Some(min) = now.checked_sub_signed(window) {
                        if *value < min {
                            issues.push(
                                Issue::new(path.clone(), Reason::MaxPast)
                                    .with_value(render(value))
                                    .with_info("min", render(&min)),
                            );
                        }
                    }
                }
            }
        }
    }

    fn to_value(&self, value: &DateTime<Utc>) -> Value {
        render(value)
    }
}

fn render(value: &DateTime<Utc>) -> Value {
    Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn parse_lenient(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
