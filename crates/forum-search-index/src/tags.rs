//! Tag sets attached to index entities.
//!
//! Tags are opaque labels. They are never full-text searched; they exist so
//! that reads can be scoped and bulk lifecycle operations can address a
//! family of entities at once. A `TagSet` is ordered and deduplicated so that
//! two derivations of the same tags compare equal.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered, deduplicated set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, tag: impl Into<String>) -> Self {
        self.insert(tag);
        self
    }

    /// Check whether a tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// True if this set shares at least one tag with `other`.
    ///
    /// This is the matching rule for bulk delete and status operations.
    pub fn intersects(&self, other: &TagSet) -> bool {
        // Iterate the smaller side.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|tag| large.contains(tag))
    }

    /// True if every tag of this set is present in `other`.
    ///
    /// This is the matching rule for scoped reads.
    pub fn is_subset_of(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Iterate tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no tags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        write!(f, "[{joined}]")
    }
}

// ============================================================================
// Tests
// ============================================================================
