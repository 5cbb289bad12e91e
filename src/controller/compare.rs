//! # Resource Comparison
//!
//! A `Delta` collects the differences the driver found between the desired
//! and the latest observed resource. The driver only enters the update path
//! for differences rooted under `Spec`; hooks may add synthetic differences
//! to force it.

use serde_json::Value;

/// A single difference between two resources
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Dotted field path, e.g. `Spec.Tags`
    pub path: String,
    /// Value on the desired side
    pub a: Option<Value>,
    /// Value on the observed side
    pub b: Option<Value>,
}

/// Differences between two resources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    differences: Vec<Difference>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a difference at `path`
    pub fn add(&mut self, path: impl Into<String>, a: Option<Value>, b: Option<Value>) {
        self.differences.push(Difference {
            path: path.into(),
            a,
            b,
        });
    }

    /// Whether any difference is rooted at `prefix`
    ///
    /// `Spec` matches `Spec` and `Spec.Tags` but not `SpecVersion`.
    #[must_use]
    pub fn different_at(&self, prefix: &str) -> bool {
        self.differences.iter().any(|difference| {
            difference
                .path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }

    #[must_use]
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }
}
