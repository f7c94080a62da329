//! Strings.
//!
//! Coercion runs in a fixed order: length limit, trimming, start padding,
//! end padding. Lengths are counted in Unicode scalar values.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Reason};
use crate::path::JsonPath;
use crate::processor::format::StringFormat;
use crate::processor::mode::{As, Is, Maybe, MaybeAs, Mode};
use crate::processor::numeric::number_to_value;
use crate::processor::pipeline::{self, Pipeline};
use crate::processor::traits::Kind;
use crate::ValidationResult;

/// Which ends of a string to strip whitespace from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trim {
    #[default]
    None,
    Start,
    End,
    Both,
}

#[derive(Debug, Clone)]
struct Padding {
    length: usize,
    pad_with: String,
}

#[derive(Debug, Clone)]
enum StringConstraint {
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: Regex, pattern_str: String },
    Format(StringFormat),
}

#[derive(Debug, Clone, Default)]
pub struct StringKind {
    limit_length: Option<usize>,
    trim: Trim,
    pad_start: Option<Padding>,
    pad_end: Option<Padding>,
    constraints: Vec<StringConstraint>,
}

pub type StringProcessor<M> = Pipeline<StringKind, M>;

pub fn is_string() -> StringProcessor<Is> {
    pipeline::is(StringKind::default())
}

pub fn maybe_string() -> StringProcessor<Maybe> {
    pipeline::maybe(StringKind::default())
}

/// Strings, plus numbers and booleans rendered as text.
///
/// ```rust
/// use intake::{as_string, Processor};
/// use serde_json::json;
///
/// let id = as_string().process_root(&json!(1234)).into_result().unwrap();
/// assert_eq!(id, "1234");
/// ```
pub fn as_string() -> StringProcessor<As> {
    pipeline::convert(StringKind::default())
}

pub fn maybe_as_string() -> StringProcessor<MaybeAs> {
    pipeline::maybe_convert(StringKind::default())
}

impl<M: Mode> Pipeline<StringKind, M> {
    /// Truncates to at most `max` characters.
    pub fn limit_length(mut self, max: usize) -> Self {
        self.kind.limit_length = Some(max);
        self
    }

    pub fn trim(mut self, trim: Trim) -> Self {
        self.kind.trim = trim;
        self
    }

    /// Left-pads to `length` characters by repeating `pad_with`.
    ///
    /// ```rust
    /// use intake::{is_string, Processor};
    /// use serde_json::json;
    ///
    /// let code = is_string().pad_start(5, "0");
    /// assert_eq!(code.process_root(&json!("42")).into_result().unwrap(), "00042");
    /// ```
    pub fn pad_start(mut self, length: usize, pad_with: impl Into<String>) -> Self {
        self.kind.pad_start = Some(Padding {
            length,
            pad_with: pad_with.into(),
        });
        self
    }

    /// Right-pads to `length` characters by repeating `pad_with`.
    pub fn pad_end(mut self, length: usize, pad_with: impl Into<String>) -> Self {
        self.kind.pad_end = Some(Padding {
            length,
            pad_with: pad_with.into(),
        });
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.kind.constraints.push(StringConstraint::MinLength(min));
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.kind.constraints.push(StringConstraint::MaxLength(max));
        self
    }

    /// Requires a match of `pattern`. Fails if the pattern does not compile.
    ///
    /// ```rust
    /// use intake::{is_string, Processor};
    /// use serde_json::json;
    ///
    /// let digits = is_string().regex(r"^\d+$").unwrap();
    /// assert!(digits.process_root(&json!("123")).is_success());
    /// assert!(digits.process_root(&json!("12a")).is_failure());
    /// ```
    pub fn regex(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.kind.constraints.push(StringConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
        });
        Ok(self)
    }

    pub fn format(mut self, format: StringFormat) -> Self {
        self.kind.constraints.push(StringConstraint::Format(format));
        self
    }
}

impl Kind for StringKind {
    type Narrowed = String;
    type Output = String;

    const NAME: &'static str = "string";

    fn check(&self, value: &Value) -> Option<String> {
        value.as_str().map(str::to_string)
    }

    fn convert(&self, value: &Value) -> Option<String> {
        match value {
            Value::Number(n) => Some(match n.as_f64() {
                Some(f) if n.is_f64() => number_to_value(f).to_string(),
                _ => n.to_string(),
            }),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn coerce(&self, mut value: String, _path: &JsonPath) -> ValidationResult<String> {
        if let Some(limit) = self.limit_length {
            if let Some((byte_idx, _)) = value.char_indices().nth(limit) {
                value.truncate(byte_idx);
            }
        }

        value = match self.trim {
            Trim::None => value,
            Trim::Start => value.trim_start().to_string(),
            Trim::End => value.trim_end().to_string(),
            Trim::Both => value.trim().to_string(),
        };

        if let Some(padding) = &self.pad_start {
            let fill = fill_for(&value, padding);
            value.insert_str(0, &fill);
        }
        if let Some(padding) = &self.pad_end {
            let fill = fill_for(&value, padding);
            value.push_str(&fill);
        }

        Validation::Success(value)
    }

    fn validate(&self, value: &String, path: &JsonPath, issues: &mut Vec<Issue>) {
        issues.extend(
            self.constraints
                .iter()
                .filter_map(|c| check_constraint(c, value, path)),
        );
    }

    fn to_value(&self, value: &String) -> Value {
        Value::String(value.clone())
    }
}

/// Characters needed to bring `value` up to the padding length.
fn fill_for(value: &str, padding: &Padding) -> String {
    let missing = padding.length.saturating_sub(value.chars().count());
    padding.pad_with.chars().cycle().take(missing).collect()
}

fn check_constraint(constraint: &StringConstraint, value: &str, path: &JsonPath) -> Option<Issue> {
    let issue = |reason| Issue::new(path.clone(), reason).with_value(Value::from(value));
    match constraint {
        StringConstraint::MinLength(min) => {
            let len = value.chars().count();
            (len < *min).then(|| {
                issue(Reason::MinLength)
                    .with_info("min", *min)
                    .with_info("length", len)
            })
        }
        StringConstraint::MaxLength(max) => {
            let len = value.chars().count();
            (len > *max).then(|| {
                issue(Reason::MaxLength)
                    .with_info("max", *max)
                    .with_info("length", len)
            })
        }
        StringConstraint::Pattern { regex, pattern_str } => (!regex.is_match(value))
            .then(|| issue(Reason::Regex).with_info("regex", pattern_str.as_str())),
        StringConstraint::Format(format) => (!format.accepts(value))
            .then(|| issue(Reason::Format).with_info("expectedFormat", format.name())),
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
    fn test_number_conversion_text() {
        assert_eq!(unwrap_success(as_string().process_root(&json!(42))), "42");
        assert_eq!(unwrap_success(as_string().process_root(&json!(2.5))), "2.5");
        assert_eq!(unwrap_success(as_string().process_root(&json!(3.0))), "3");
        assert_eq!(unwrap_success(as_string().process_root(&json!(false))), "false");
    }

    #[test]
    fn test_structures_do_not_convert() {
        let issues = unwrap_failure(as_string().process_root(&json!({ "a": 1 })));
        assert_eq!(issues.first().reason, Reason::NoConversion);
    }

    #[test]
    fn test_coercion_order() {
        let processor = is_string().limit_length(6).trim(Trim::Both).pad_end(6, ".");
        // Truncated to "  ab  " first, then trimmed to "ab", then padded.
        assert_eq!(unwrap_success(processor.process_root(&json!("  ab  cd"))), "ab....");
    }

    #[test]
    fn test_multi_char_padding_is_cut_to_fit() {
        let processor = is_string().pad_start(7, "ab");
        assert_eq!(unwrap_success(processor.process_root(&json!("xy"))), "ababaxy");
    }

    #[test]
    fn test_padding_never_shortens() {
        let processor = is_string().pad_start(2, "0");
        assert_eq!(unwrap_success(processor.process_root(&json!("12345"))), "12345");
    }

    #[test]
    fn test_trim_variants() {
        let input = json!("  x  ");
        let start = is_string().trim(Trim::Start);
        let end = is_string().trim(Trim::End);
        assert_eq!(unwrap_success(start.process_root(&input)), "x  ");
        assert_eq!(unwrap_success(end.process_root(&input)), "  x");
        assert_eq!(unwrap_success(is_string().process_root(&input)), "  x  ");
    }

    #[test]
    fn test_length_counts_characters() {
        let processor = is_string().max_length(3);
        assert!(processor.process_root(&json!("日本語")).is_success());

        let issues = unwrap_failure(processor.process_root(&json!("日本語!")));
        let issue = issues.first();
        assert_eq!(issue.reason, Reason::MaxLength);
        assert_eq!(issue.info["max"], json!(3));
        assert_eq!(issue.info["length"], json!(4));
    }

    #[test]
    fn test_validation_accumulates() {
        let processor = is_string()
            .min_length(5)
            .regex("^[a-z]+$")
            .unwrap()
            .format(StringFormat::uuid())
            .validator(|s| s.starts_with('x'));

        let issues = unwrap_failure(processor.process_root(&json!("AB")));
        let reasons: Vec<Reason> = issues.iter().map(|i| i.reason).collect();
        assert_eq!(
            reasons,
            vec![Reason::MinLength, Reason::Regex, Reason::Format, Reason::Validator]
        );
        assert_eq!(issues.with_reason(Reason::Regex)[0].info["regex"], json!("^[a-z]+$"));
        assert_eq!(
            issues.with_reason(Reason::Format)[0].info["expectedFormat"],
            json!("uuid")
        );
    }

    #[test]
    fn test_invalid_regex() {
        assert!(is_string().regex("(unclosed").is_err());
    }

    #[test]
    fn test_default_is_returned_untouched() {
        let processor = as_string().min_length(10).default("n/a".to_string());
        assert_eq!(unwrap_success(processor.process_root(&Value::Null)), "n/a");
    }
}
