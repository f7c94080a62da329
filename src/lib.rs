//! # Intake
//!
//! Validation and coercion pipelines that turn untyped input (JSON bodies,
//! query strings, config files) into typed values, collecting every issue
//! instead of stopping at the first.
//!
//! ## Overview
//!
//! A processor is built once from factory functions and builder methods and
//! then applied to any number of values. Each value type comes in four
//! processing modes:
//!
//! - `is_*`: the value must be present and already of the right type.
//! - `maybe_*`: absent or `null` input yields `None`.
//! - `as_*`: wrongly typed input is converted where possible (`"42"` to `42`).
//! - `maybe_as_*`: converts, and yields `None` when nothing can be produced.
//!
//! Composites (`is_object`, `is_array`, `is_tuple`, `is_record`) run child
//! processors and report child issues under the child's [`JsonPath`].
//!
//! ## Core Types
//!
//! - [`Processor`]: turns an optional input value into a typed output or [`Issues`]
//! - [`Issue`]: one failure, with path, offending value, [`Reason`] and details
//! - [`Issues`]: a non-empty list of issues
//! - [`ValidationError`]: what [`check`] returns when input is rejected
//!
//! ## Example
//!
//! ```rust
//! use intake::{as_number, check, is_object, is_string, Contract, Reason};
//! use serde_json::json;
//!
//! let signup = is_object(
//!     Contract::new()
//!         .field("email", is_string().regex("@").unwrap())
//!         .field("age", as_number().min(18.0)),
//! );
//!
//! let user = check(&signup, || json!({ "email": "a@b.c", "age": "21" }), "body").unwrap();
//! assert_eq!(user["age"], json!(21));
//!
//! let err = check(&signup, || json!({ "email": "nope", "age": 12 }), "body").unwrap_err();
//! let reasons: Vec<Reason> = err.issues().iter().map(|i| i.reason).collect();
//! assert_eq!(reasons, vec![Reason::Regex, Reason::Min]);
//! ```

mod check;
pub mod error;
pub mod path;
pub mod processor;

pub use check::{check, check_async};
pub use error::{Category, Issue, Issues, Reason, ValidationError};
pub use path::{JsonPath, PathSegment};
pub use processor::*;

/// Outcome of a processor: the typed output, or every issue found.
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;
