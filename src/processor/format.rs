//! Named string formats checked by [`StringProcessor::format`](crate::processor::StringProcessor).

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Crockford base32, 26 characters.
pub(crate) static ULID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-HJKMNP-TV-Z]{26}$").expect("ULID regex is valid"));

pub(crate) static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID regex is valid")
});

type FormatCheck = dyn Fn(&str) -> bool + Send + Sync;

/// A named predicate over strings. A failing value is reported with reason
/// `format` and `{ "expectedFormat": <name> }`.
///
/// ```rust
/// use intake::StringFormat;
///
/// assert!(StringFormat::ulid().accepts("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
/// assert!(!StringFormat::uuid().accepts("not-a-uuid"));
///
/// let slug = StringFormat::custom("slug", |s| s.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
/// assert!(slug.accepts("hello-world"));
/// ```
#[derive(Clone)]
pub struct StringFormat {
    name: String,
    check: Arc<FormatCheck>,
}

impl StringFormat {
    pub fn ulid() -> Self {
        Self::custom("ulid", |s| ULID_REGEX.is_match(s))
    }

    pub fn uuid() -> Self {
        Self::custom("uuid", |s| UUID_REGEX.is_match(s))
    }

    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, value: &str) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StringFormat").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulid_alphabet() {
        let ulid = StringFormat::ulid();
        assert!(ulid.accepts("01BX5ZZKBKACTAV9WEVGEMMVRZ"));
        // I, L, O and U are excluded from Crockford base32.
        assert!(!ulid.accepts("01BX5ZZKBKACTAV9WEVGEMMVRI"));
        assert!(!ulid.accepts("01bx5zzkbkactav9wevgemmvrz"));
        assert!(!ulid.accepts("01BX5ZZKBKACTAV9WEVGEMMVR"));
    }

    #[test]
    fn test_uuid_any_case() {
        let uuid = StringFormat::uuid();
        assert!(uuid.accepts("123e4567-e89b-12d3-a456-426614174000"));
        assert!(uuid.accepts("123E4567-E89B-12D3-A456-426614174000"));
        assert!(!uuid.accepts("123e4567e89b12d3a456426614174000"));
    }

    #[test]
    fn test_name() {
        assert_eq!(StringFormat::uuid().name(), "uuid");
        assert_eq!(format!("{:?}", StringFormat::ulid()), r#"StringFormat("ulid")"#);
    }
}
