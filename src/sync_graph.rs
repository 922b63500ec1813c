//! A thread-safe wrapper around [`Graph`] (§4.11, §5).
//!
//! [`Graph`] itself holds no lock and assumes a single-threaded cooperative
//! caller: a `fit` call must run to completion, including its entire
//! propagation wave and every observer notification, before any other
//! mutating call touches the same graph. `SyncGraph` satisfies that
//! discipline for a multi-threaded host by serializing every mutating
//! operation behind one [`Mutex`], held for the duration of the call.

use std::sync::{Mutex, MutexGuard};

use crate::accumulator::Accumulator;
use crate::edge::Edge;
use crate::errors::{FitError, GraphError};
use crate::graph::IntoBatch;
use crate::graph::Graph;
use crate::ids::VertexId;
use crate::observer::{ObserverCallback, ObserverId};
use crate::strategy::Strategy;
use crate::value::Value;

/// `Mutex<Graph>`, exposing the same operations as [`Graph`] with each
/// mutating call taking the lock for its own duration and each read-only
/// call taking it only long enough to clone out its answer.
///
/// This is additive: `Graph` never locks anything on its own, so a
/// single-threaded embedder can keep using it directly and pay nothing for
/// synchronization it does not need.
pub struct SyncGraph {
    inner: Mutex<Graph>,
}

impl Default for SyncGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncGraph {
    /// Wraps a new, empty graph using the default ([`Strategy::Eager`])
    /// strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Strategy::default())
    }

    /// Wraps a new, empty graph using the given strategy.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self { inner: Mutex::new(Graph::with_strategy(strategy)) }
    }

    /// Wraps an already-built [`Graph`].
    #[must_use]
    pub fn from_graph(graph: Graph) -> Self {
        Self { inner: Mutex::new(graph) }
    }

    /// Locks the inner graph, poisoning this `SyncGraph` permanently if a
    /// prior holder panicked while the lock was held — the same
    /// fail-loud choice a poisoned `Mutex` always makes, since a panic
    /// mid-wave can leave a vertex partially updated (§5).
    fn lock(&self) -> MutexGuard<'_, Graph> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// The current propagation strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.lock().strategy()
    }

    /// Switches the propagation strategy; see [`Graph::set_strategy`].
    pub fn set_strategy(&self, strategy: Strategy) {
        self.lock().set_strategy(strategy);
    }

    /// Registers a new vertex; see [`Graph::add_vertex`].
    ///
    /// # Errors
    ///
    /// See [`Graph::add_vertex`].
    pub fn add_vertex(&self, id: impl Into<VertexId>, stat: impl Accumulator) -> Result<(), GraphError> {
        self.lock().add_vertex(id, stat)
    }

    /// Wires a directed edge; see [`Graph::connect`].
    ///
    /// # Errors
    ///
    /// See [`Graph::connect`].
    pub fn connect(&self, src: impl Into<VertexId>, dst: impl Into<VertexId>, edge: Edge) -> Result<(), GraphError> {
        self.lock().connect(src, dst, edge)
    }

    /// Fits a single source; see [`Graph::fit`]. Holds the lock for the
    /// entire propagation wave, so no other call observes a partially
    /// propagated state.
    ///
    /// # Errors
    ///
    /// See [`Graph::fit`].
    pub fn fit(&self, source: impl Into<VertexId>, sample: impl IntoBatch) -> Result<(), FitError> {
        self.lock().fit(source, sample)
    }

    /// Fits multiple sources in one combined wave; see [`Graph::fit_many`].
    ///
    /// # Errors
    ///
    /// See [`Graph::fit_many`].
    pub fn fit_many<S, B>(&self, sources: impl IntoIterator<Item = (S, B)>) -> Result<(), FitError>
    where
        S: Into<VertexId>,
        B: IntoBatch,
    {
        self.lock().fit_many(sources)
    }

    /// Reads a vertex's value, recomputing dirty ancestors under lazy;
    /// see [`Graph::value`].
    ///
    /// # Errors
    ///
    /// See [`Graph::value`].
    pub fn value(&self, id: &VertexId) -> Result<Option<Value>, FitError> {
        self.lock().value(id)
    }

    /// Forces a full dirty refresh; see [`Graph::recompute`].
    ///
    /// # Errors
    ///
    /// See [`Graph::recompute`].
    pub fn recompute(&self) -> Result<(), FitError> {
        self.lock().recompute()
    }

    /// Marks `id` and its descendants dirty; see [`Graph::invalidate`].
    ///
    /// # Errors
    ///
    /// See [`Graph::invalidate`].
    pub fn invalidate(&self, id: &VertexId) -> Result<(), GraphError> {
        self.lock().invalidate(id)
    }

    /// All vertex ids, in insertion order. Cloned out under the lock since
    /// no borrow can outlive the guard.
    #[must_use]
    pub fn vertices(&self) -> Vec<VertexId> {
        self.lock().vertices().cloned().collect()
    }

    /// The number of vertices in the graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.lock().vertex_count()
    }

    /// `id`'s inbound-edge sources, in insertion order.
    ///
    /// # Errors
    ///
    /// See [`Graph::parents`].
    pub fn parents(&self, id: &VertexId) -> Result<Vec<VertexId>, GraphError> {
        self.lock().parents(id).map(<[VertexId]>::to_vec)
    }

    /// `id`'s outbound-edge targets, in insertion order.
    ///
    /// # Errors
    ///
    /// See [`Graph::children`].
    pub fn children(&self, id: &VertexId) -> Result<Vec<VertexId>, GraphError> {
        self.lock().children(id).map(<[VertexId]>::to_vec)
    }

    /// The vertex's last cached value.
    ///
    /// # Errors
    ///
    /// See [`Graph::cached_value`].
    pub fn cached_value(&self, id: &VertexId) -> Result<Option<Value>, GraphError> {
        self.lock().cached_value(id)
    }

    /// Whether `id` currently has a pending lazy/partial recompute.
    ///
    /// # Errors
    ///
    /// See [`Graph::is_dirty`].
    pub fn is_dirty(&self, id: &VertexId) -> Result<bool, GraphError> {
        self.lock().is_dirty(id)
    }

    /// A deterministic topological order of the current graph.
    ///
    /// # Errors
    ///
    /// See [`Graph::topological_order`].
    pub fn topological_order(&self) -> Result<Vec<VertexId>, GraphError> {
        self.lock().topological_order()
    }

    /// Re-runs cycle detection and referential-integrity checks.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.lock().validate()
    }

    /// Whether an edge `(src, dst)` carries a filter.
    ///
    /// # Errors
    ///
    /// See [`Graph::has_filter`].
    pub fn has_filter(&self, src: &VertexId, dst: &VertexId) -> Result<bool, GraphError> {
        self.lock().has_filter(src, dst)
    }

    /// Whether an edge `(src, dst)` carries a transform.
    ///
    /// # Errors
    ///
    /// See [`Graph::has_transform`].
    pub fn has_transform(&self, src: &VertexId, dst: &VertexId) -> Result<bool, GraphError> {
        self.lock().has_transform(src, dst)
    }

    /// Registers an observer; see [`Graph::add_observer`]. The callback is
    /// invoked on whichever thread's `fit`/`recompute`/`value` call holds
    /// the lock when the observed vertex updates.
    ///
    /// # Errors
    ///
    /// See [`Graph::add_observer`].
    pub fn add_observer(&self, vertex: &VertexId, callback: ObserverCallback) -> Result<ObserverId, GraphError> {
        self.lock().add_observer(vertex, callback)
    }

    /// Removes a previously registered observer; see
    /// [`Graph::remove_observer`].
    ///
    /// # Errors
    ///
    /// See [`Graph::remove_observer`].
    pub fn remove_observer(&self, vertex: &VertexId, observer_id: ObserverId) -> Result<(), GraphError> {
        self.lock().remove_observer(vertex, observer_id)
    }

    /// Runs `f` with exclusive access to the underlying [`Graph`], for
    /// operations (such as reading a filter/transform closure, which
    /// cannot be cloned out from behind the lock) that this wrapper does
    /// not otherwise expose.
    pub fn with_graph<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut self.lock())
    }
}
