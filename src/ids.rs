//! Vertex identifiers.

use core::fmt;
use std::sync::Arc;

/// An opaque, hashable, totally-ordered identifier for a vertex.
///
/// Cloning a [`VertexId`] is cheap: it is backed by a reference-counted
/// string, so the same id can be copied into parent/child lists, edge
/// keys, and observer registrations without re-allocating the text.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct VertexId(Arc<str>);

impl VertexId {
    /// Creates a new vertex id from anything convertible to an `Arc<str>`.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the id's string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({:?})", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl From<&VertexId> for VertexId {
    fn from(id: &VertexId) -> Self {
        id.clone()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for VertexId {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Keep the alphabet small and fixed so randomly generated graphs
        // actually share vertices (and therefore exercise fan-in, cycle
        // rejection, and duplicate-edge paths) instead of every id being
        // unique.
        const ALPHABET: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let idx = u.int_in_range(0..=ALPHABET.len() - 1)?;
        Ok(Self::from(ALPHABET[idx]))
    }
}
