//! The top-level error returned by the ingestion API.

use super::{AccumulatorError, GraphError};

/// Error returned by [`crate::Graph::fit`] and the other ingestion entry
/// points, composing the structural and accumulator error domains so
/// callers can `?` through either without a manual conversion.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FitError {
    /// A structural error: an unknown vertex, a reentrant mutation, etc.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The target accumulator rejected a propagated or ingested sample.
    #[error(transparent)]
    Accumulator(#[from] AccumulatorError),
}
