//! The DAG itself: vertex/edge storage, introspection, and the propagation
//! engine entry points (§4.1, §4.9).

mod ingestion;
mod lazy;
mod propagation;

pub use ingestion::IntoBatch;

use std::cell::RefCell;

use indexmap::IndexMap;
use tracing::instrument;

use crate::accumulator::Accumulator;
use crate::edge::{Edge, Filter, Transform};
use crate::errors::GraphError;
use crate::ids::VertexId;
use crate::observer::{Observer, ObserverCallback, ObserverId};
use crate::strategy::Strategy;
use crate::value::Value;
use crate::vertex::Vertex;
use crate::{cycle, topo};

/// A typed DAG of online statistical accumulators.
///
/// See the crate root documentation for the propagation model. `Graph`
/// holds no lock and is not `Sync`-friendly on its own; share one across
/// threads with [`crate::SyncGraph`] instead.
pub struct Graph {
    vertices: IndexMap<VertexId, Vertex>,
    edges: IndexMap<(VertexId, VertexId), Edge>,
    strategy: Strategy,
    /// Memoized topological order; invalidated (set to `None`) by every
    /// structural mutation and recomputed lazily on the next read that
    /// needs it (§3.3.5, §4.3, §9).
    topo_cache: RefCell<Option<Vec<VertexId>>>,
    next_observer_id: ObserverId,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph using the default ([`Strategy::Eager`])
    /// propagation strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Strategy::default())
    }

    /// Creates an empty graph using the given propagation strategy.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            strategy,
            topo_cache: RefCell::new(Some(Vec::new())),
            next_observer_id: 0,
        }
    }

    /// The current propagation strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Switches the propagation strategy. Takes effect for subsequent
    /// fits only; it does not retroactively propagate anything the prior
    /// strategy left dirty or unpropagated (§4.6).
    pub fn set_strategy(&mut self, strategy: Strategy) {
        tracing::debug!(?strategy, previous = ?self.strategy, "switching propagation strategy");
        self.strategy = strategy;
    }

    /// Registers a new vertex wrapping `stat`.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateVertex`] if `id` is already present.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>, stat: impl Accumulator) -> Result<(), GraphError> {
        let id = id.into();
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        tracing::trace!(vertex = %id, "adding vertex");
        self.vertices.insert(id, Vertex::new(Box::new(stat)));
        self.invalidate_topo_cache();
        Ok(())
    }

    /// Wires a directed edge from `src` to `dst`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if either endpoint does not exist,
    /// [`GraphError::DuplicateEdge`] if the edge already exists, or
    /// [`GraphError::CycleError`] if adding it would introduce a cycle
    /// (§4.2). On any error the graph is left unchanged.
    #[instrument(level = "debug", skip(self, edge))]
    pub fn connect(&mut self, src: impl Into<VertexId>, dst: impl Into<VertexId>, edge: Edge) -> Result<(), GraphError> {
        let src = src.into();
        let dst = dst.into();
        if !self.vertices.contains_key(&src) {
            return Err(GraphError::UnknownVertex(src));
        }
        if !self.vertices.contains_key(&dst) {
            return Err(GraphError::UnknownVertex(dst));
        }
        if self.edges.contains_key(&(src.clone(), dst.clone())) {
            return Err(GraphError::DuplicateEdge(src, dst));
        }
        if cycle::is_reachable(&self.vertices, &dst, &src) {
            tracing::trace!(%src, %dst, "rejecting edge: would introduce a cycle");
            return Err(GraphError::CycleError(src, dst));
        }

        self.vertices.get_mut(&src).expect("checked above").children.push(dst.clone());
        self.vertices.get_mut(&dst).expect("checked above").parents.push(src.clone());
        self.edges.insert((src, dst), edge);
        self.invalidate_topo_cache();
        Ok(())
    }

    /// Marks `id` and all of its descendants dirty, forcing a recompute on
    /// their next read under lazy/partial strategies (§4.6, §9). Has no
    /// observable effect under eager (nothing ever consults `dirty`
    /// there).
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `id` does not exist.
    pub fn invalidate(&mut self, id: &VertexId) -> Result<(), GraphError> {
        if !self.vertices.contains_key(id) {
            return Err(GraphError::UnknownVertex(id.clone()));
        }
        let mut stack = vec![id.clone()];
        let mut seen = std::collections::HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(vertex) = self.vertices.get_mut(&current) {
                vertex.dirty = true;
                stack.extend(vertex.children.iter().cloned());
            }
        }
        Ok(())
    }

    // --- Introspection (§4.9): read-only, O(1) or O(V+E). ---

    /// All vertex ids, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &VertexId> {
        self.vertices.keys()
    }

    /// The number of vertices in the graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// `id`'s inbound-edge sources, in insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `id` does not exist.
    pub fn parents(&self, id: &VertexId) -> Result<&[VertexId], GraphError> {
        self.vertices.get(id).map(|v| v.parents.as_slice()).ok_or_else(|| GraphError::UnknownVertex(id.clone()))
    }

    /// `id`'s outbound-edge targets, in insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `id` does not exist.
    pub fn children(&self, id: &VertexId) -> Result<&[VertexId], GraphError> {
        self.vertices.get(id).map(|v| v.children.as_slice()).ok_or_else(|| GraphError::UnknownVertex(id.clone()))
    }

    /// The vertex's last cached value, or `None` if it has never been
    /// successfully fit ("never-computed", §3.1).
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `id` does not exist.
    pub fn cached_value(&self, id: &VertexId) -> Result<Option<Value>, GraphError> {
        self.vertices.get(id).map(|v| v.cached.clone()).ok_or_else(|| GraphError::UnknownVertex(id.clone()))
    }

    /// Whether `id` currently has a pending (lazy/partial) recompute.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `id` does not exist.
    pub fn is_dirty(&self, id: &VertexId) -> Result<bool, GraphError> {
        self.vertices.get(id).map(|v| v.dirty).ok_or_else(|| GraphError::UnknownVertex(id.clone()))
    }

    /// A deterministic topological order of the current graph (§4.3).
    /// Memoized; recomputed only after a structural mutation invalidates
    /// the cache.
    ///
    /// # Errors
    ///
    /// [`GraphError::StructuralError`] if the graph is inconsistent (see
    /// [`topo::topological_order`](crate::topo)); should be unreachable
    /// given invariant 3.3.1.
    pub fn topological_order(&self) -> Result<Vec<VertexId>, GraphError> {
        if let Some(cached) = self.topo_cache.borrow().as_ref() {
            if cached.len() == self.vertices.len() {
                return Ok(cached.clone());
            }
        }
        let order = topo::topological_order(&self.vertices)?;
        *self.topo_cache.borrow_mut() = Some(order.clone());
        Ok(order)
    }

    /// Re-runs cycle detection and referential-integrity checks. Safe on
    /// any observable graph state.
    #[must_use]
    pub fn validate(&self) -> bool {
        if self.topological_order().is_err() {
            return false;
        }
        for ((src, dst), _) in &self.edges {
            if !self.vertices.contains_key(src) || !self.vertices.contains_key(dst) {
                return false;
            }
        }
        for (id, vertex) in &self.vertices {
            for parent in &vertex.parents {
                if !self.edges.contains_key(&(parent.clone(), id.clone())) {
                    return false;
                }
                let Some(parent_vertex) = self.vertices.get(parent) else { return false };
                if !parent_vertex.children.contains(id) {
                    return false;
                }
            }
            for child in &vertex.children {
                if !self.edges.contains_key(&(id.clone(), child.clone())) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether an edge `(src, dst)` carries a filter.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if the edge does not exist (reported
    /// as `UnknownVertex` on `dst`, matching `connect`'s error for a
    /// missing edge endpoint, since the core has no dedicated
    /// "unknown edge" error kind).
    pub fn has_filter(&self, src: &VertexId, dst: &VertexId) -> Result<bool, GraphError> {
        self.edge(src, dst).map(Edge::has_filter)
    }

    /// Whether an edge `(src, dst)` carries a transform.
    ///
    /// # Errors
    ///
    /// See [`Graph::has_filter`].
    pub fn has_transform(&self, src: &VertexId, dst: &VertexId) -> Result<bool, GraphError> {
        self.edge(src, dst).map(Edge::has_transform)
    }

    /// A callable handle to `(src, dst)`'s filter, if any.
    ///
    /// Closures are not introspectable: this reflects *presence* and
    /// lets a caller *invoke* the predicate, but does not expose what it
    /// does internally.
    ///
    /// # Errors
    ///
    /// See [`Graph::has_filter`].
    pub fn filter_of(&self, src: &VertexId, dst: &VertexId) -> Result<Option<&Filter>, GraphError> {
        self.edge(src, dst).map(|e| e.filter.as_ref())
    }

    /// A callable handle to `(src, dst)`'s transform, if any. See
    /// [`Graph::filter_of`] for the introspection caveat.
    ///
    /// # Errors
    ///
    /// See [`Graph::has_filter`].
    pub fn transform_of(&self, src: &VertexId, dst: &VertexId) -> Result<Option<&Transform>, GraphError> {
        self.edge(src, dst).map(|e| e.transform.as_ref())
    }

    fn edge(&self, src: &VertexId, dst: &VertexId) -> Result<&Edge, GraphError> {
        self.edges.get(&(src.clone(), dst.clone())).ok_or_else(|| GraphError::UnknownVertex(dst.clone()))
    }

    /// Registers `callback` on `vertex`, to be invoked with
    /// `(vertex_id, new_cached_value, raw_payload)` every time the engine
    /// assigns it a new cached value (§4.8).
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `vertex` does not exist.
    pub fn add_observer(&mut self, vertex: &VertexId, callback: ObserverCallback) -> Result<ObserverId, GraphError> {
        let v = self.vertices.get_mut(vertex).ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))?;
        let id = self.next_observer_id;
        self.next_observer_id += 1;
        v.observers.push(Observer { id, callback });
        Ok(id)
    }

    /// Removes a previously registered observer by identity. A no-op if
    /// `observer_id` is not currently registered on `vertex`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `vertex` does not exist.
    pub fn remove_observer(&mut self, vertex: &VertexId, observer_id: ObserverId) -> Result<(), GraphError> {
        let v = self.vertices.get_mut(vertex).ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))?;
        v.observers.retain(|o| o.id != observer_id);
        Ok(())
    }

    fn invalidate_topo_cache(&mut self) {
        *self.topo_cache.borrow_mut() = None;
    }
}
