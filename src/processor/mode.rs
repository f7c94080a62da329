//! The four processing modes as type-level markers.
//!
//! | Mode      | Absent input        | Wrong type                          |
//! |-----------|---------------------|-------------------------------------|
//! | `Is`      | `not-defined`       | `incorrect-type`                    |
//! | `Maybe`   | `None`              | `incorrect-type` (or `None`)        |
//! | `As`      | `not-defined`/default | convert, else `no-conversion`/default |
//! | `MaybeAs` | `None`/default      | convert, else `None`/default        |
//!
//! Required modes produce `T`, maybe modes produce `Option<T>`.

/// Strict and required.
#[derive(Debug, Clone, Copy, Default)]
pub struct Is;

/// Strict and nullable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Maybe;

/// Converting and required.
#[derive(Debug, Clone, Copy, Default)]
pub struct As;

/// Converting and nullable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaybeAs;

pub trait Mode: Send + Sync + 'static {
    /// Output of a processor in this mode for a kind producing `T`.
    type Output<T: Clone + Send + Sync>: Clone + Send + Sync;

    /// Absent input is accepted as `None` instead of being an issue.
    const OPTIONAL: bool;
    /// Wrongly typed input goes through conversion.
    const CONVERTS: bool;

    /// Wraps a pipeline result. `None` from a required mode means nothing
    /// could be produced.
    fn wrap<T: Clone + Send + Sync>(value: Option<T>) -> Option<Self::Output<T>>;

    fn inner<T: Clone + Send + Sync>(output: &Self::Output<T>) -> Option<&T>;
}

macro_rules! required_mode {
    ($mode:ty, $converts:expr) => {
        impl Mode for $mode {
            type Output<T: Clone + Send + Sync> = T;
            const OPTIONAL: bool = false;
            const CONVERTS: bool = $converts;

            fn wrap<T: Clone + Send + Sync>(value: Option<T>) -> Option<T> {
                value
            }

            fn inner<T: Clone + Send + Sync>(output: &T) -> Option<&T> {
                Some(output)
            }
        }
    };
}

macro_rules! optional_mode {
    ($mode:ty, $converts:expr) => {
        impl Mode for $mode {
            type Output<T: Clone + Send + Sync> = Option<T>;
            const OPTIONAL: bool = true;
            const CONVERTS: bool = $converts;

            fn wrap<T: Clone + Send + Sync>(value: Option<T>) -> Option<Option<T>> {
                Some(value)
            }

            fn inner<T: Clone + Send + Sync>(output: &Option<T>) -> Option<&T> {
                output.as_ref()
            }
        }
    };
}

required_mode!(Is, false);
required_mode!(As, true);
optional_mode!(Maybe, false);
optional_mode!(MaybeAs, true);

/// Modes that run conversion: `As` and `MaybeAs`.
pub trait Converting: Mode {}
impl Converting for As {}
impl Converting for MaybeAs {}

/// Modes that accept absent input: `Maybe` and `MaybeAs`.
pub trait Optional: Mode {}
impl Optional for Maybe {}
impl Optional for MaybeAs {}
