//! Errors raised by a vertex's accumulator while absorbing a sample.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::ids::VertexId;

/// An accumulator rejected a sample during `fit`.
///
/// Wraps the id of the vertex whose accumulator failed together with the
/// underlying error it reported. The wave that triggered the failure is
/// aborted after the in-progress work is safely unwound: the failing
/// vertex's cached value is left untouched and none of its observers fire
/// (§7).
#[derive(Debug, Clone)]
pub struct AccumulatorError {
    vertex: VertexId,
    source: Arc<dyn StdError + Send + Sync>,
}

impl AccumulatorError {
    /// Wraps an accumulator failure at `vertex`.
    pub fn new(vertex: VertexId, source: impl StdError + Send + Sync + 'static) -> Self {
        Self { vertex, source: Arc::new(source) }
    }

    /// The vertex whose accumulator raised the error.
    #[must_use]
    pub fn vertex(&self) -> &VertexId {
        &self.vertex
    }
}

impl fmt::Display for AccumulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "accumulator at vertex {:?} rejected a sample: {}", self.vertex, self.source)
    }
}

impl StdError for AccumulatorError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}

impl PartialEq for AccumulatorError {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex && self.to_string() == other.to_string()
    }
}

impl Eq for AccumulatorError {}
