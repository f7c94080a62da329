//! Locations inside nested input.
//!
//! Every [`Issue`](crate::Issue) carries a [`JsonPath`] naming the value it
//! complains about. Composite processors extend the path *before* handing a
//! child value down, so an issue is located correctly at the moment it is
//! created and never needs to be rewritten on the way back up.

use std::fmt::{self, Display};

use serde_json::Value;

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property or record key.
    Field(String),
    /// Array or tuple position.
    Index(usize),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    fn to_json(&self) -> Value {
        match self {
            PathSegment::Field(name) => Value::String(name.clone()),
            PathSegment::Index(idx) => Value::from(*idx),
        }
    }
}

/// An ordered list of segments from the root value to some nested value.
///
/// Paths are immutable: `push_field` and `push_index` return a new path and
/// leave the receiver untouched, so sibling children can branch off the same
/// parent path.
///
/// # Example
///
/// ```rust
/// use intake::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("orders")
///     .push_index(3)
///     .push_field("sku");
///
/// assert_eq!(path.to_string(), "orders[3].sku");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, used for issues about the top-level value.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns `self` followed by every segment of `tail`.
    ///
    /// ```rust
    /// use intake::JsonPath;
    ///
    /// let base = JsonPath::from_field("body");
    /// let tail = JsonPath::from_field("items").push_index(0);
    /// assert_eq!(base.join(&tail).to_string(), "body.items[0]");
    /// ```
    pub fn join(&self, tail: &JsonPath) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + tail.segments.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&tail.segments);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// All segments except the last, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path as a JSON array, e.g. `["orders", 3, "sku"]`.
    pub fn to_json(&self) -> Value {
        Value::Array(self.segments.iter().map(PathSegment::to_json).collect())
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl From<&str> for JsonPath {
    fn from(name: &str) -> Self {
        JsonPath::from_field(name)
    }
}

impl From<String> for JsonPath {
    fn from(name: String) -> Self {
        JsonPath::from_field(name)
    }
}

impl From<usize> for JsonPath {
    fn from(idx: usize) -> Self {
        JsonPath::from_index(idx)
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl From<&JsonPath> for JsonPath {
    fn from(path: &JsonPath) -> Self {
        path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_renders_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_mixed_segments_display() {
        let path = JsonPath::root()
            .push_field("body")
            .push_index(2)
            .push_index(0)
            .push_field("name");
        assert_eq!(path.to_string(), "body[2][0].name");
    }

    #[test]
    fn test_leading_index() {
        let path = JsonPath::root().push_index(1).push_field("a");
        assert_eq!(path.to_string(), "[1].a");
    }

    #[test]
    fn test_siblings_do_not_share_segments() {
        let base = JsonPath::from_field("items");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "items");
        assert_eq!(first.to_string(), "items[0]");
        assert_eq!(second.to_string(), "items[1]");
    }

    #[test]
    fn test_join_with_root_is_identity() {
        let path = JsonPath::from_field("a").push_index(4);
        assert_eq!(path.join(&JsonPath::root()), path);
        assert_eq!(JsonPath::root().join(&path), path);
    }

    #[test]
    fn test_parent_walks_to_root() {
        let path = JsonPath::from_field("a").push_index(0);
        let parent = path.parent().unwrap();
        assert_eq!(parent, JsonPath::from_field("a"));
        assert!(parent.parent().unwrap().is_root());
        assert!(JsonPath::root().parent().is_none());
    }

    #[test]
    fn test_to_json() {
        let path = JsonPath::from_field("o").push_index(3).push_field("a");
        assert_eq!(path.to_json(), json!(["o", 3, "a"]));
        assert_eq!(JsonPath::root().to_json(), json!([]));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(JsonPath::from("user"), JsonPath::from_field("user"));
        assert_eq!(JsonPath::from(7usize), JsonPath::from_index(7));
        let segments = vec![PathSegment::field("a"), PathSegment::index(1)];
        assert_eq!(JsonPath::from(segments).to_string(), "a[1]");
    }
}
