//! Failure values.
//!
//! Inside processors failures are plain values ([`Issues`]); only the
//! boundary entry point turns them into a [`ValidationError`].

mod issue;
mod validation_error;

pub use issue::{Category, Issue, Issues, Reason};
pub use validation_error::ValidationError;
