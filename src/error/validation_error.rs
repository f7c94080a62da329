use thiserror::Error;

use crate::error::Issues;
use crate::path::JsonPath;

/// The aggregate error returned by [`check`](crate::check) when input is
/// rejected. It carries every issue found, not only the first.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("input rejected with {} issue(s), first: {}", .issues.len(), .issues.first())]
pub struct ValidationError {
    issues: Issues,
}

impl ValidationError {
    pub fn new(issues: Issues) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &Issues {
        &self.issues
    }

    pub fn into_issues(self) -> Issues {
        self.issues
    }

    /// Re-bases all carried issues under `parent`.
    pub fn nest(self, parent: &JsonPath) -> Self {
        Self {
            issues: self.issues.nest(parent),
        }
    }
}

impl From<Issues> for ValidationError {
    fn from(issues: Issues) -> Self {
        Self::new(issues)
    }
}
