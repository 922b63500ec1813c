//! Lazy recomputation (§4.6): dirty-marking on fit, on-demand refresh on
//! read.

use std::collections::HashSet;

use crate::errors::FitError;
use crate::graph::Graph;
use crate::ids::VertexId;
use crate::strategy::Strategy;
use crate::value::Value;

impl Graph {
    /// Reads `id`'s cached value, recomputing its dirty ancestors first
    /// under the lazy strategy (§4.6). Returns `None` if `id` has never
    /// been successfully fit, directly or via propagation.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::UnknownVertex`] if `id` does not exist, or
    /// [`crate::errors::AccumulatorError`] if recomputing a dirty
    /// ancestor fails (the ancestor is left dirty so a later call
    /// retries, §7).
    pub fn value(&mut self, id: &VertexId) -> Result<Option<Value>, FitError> {
        if !self.vertices.contains_key(id) {
            return Err(FitError::Graph(self.unknown_vertex(id)));
        }
        if self.strategy == Strategy::Lazy {
            self.recompute_ancestors(id)?;
        }
        Ok(self.vertices[id].cached.clone())
    }

    /// Forces a full refresh of every dirty vertex, in topological
    /// order, regardless of which vertex (if any) a caller is
    /// ultimately interested in.
    ///
    /// # Errors
    ///
    /// See [`Graph::value`].
    pub fn recompute(&mut self) -> Result<(), FitError> {
        let order = self.topological_order()?;
        self.recompute_in_order(&order)
    }

    pub(super) fn mark_descendants_dirty(&mut self, start: &VertexId) {
        let mut stack = self.children(start).map(<[VertexId]>::to_vec).unwrap_or_default();
        let mut seen: HashSet<VertexId> = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(vertex) = self.vertices.get_mut(&current) {
                vertex.dirty = true;
                stack.extend(vertex.children.clone());
            }
        }
    }

    fn ancestors_inclusive(&self, id: &VertexId) -> HashSet<VertexId> {
        let mut ancestors = HashSet::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if !ancestors.insert(current.clone()) {
                continue;
            }
            if let Ok(parents) = self.parents(&current) {
                stack.extend(parents.iter().cloned());
            }
        }
        ancestors
    }

    fn recompute_ancestors(&mut self, id: &VertexId) -> Result<(), FitError> {
        let ancestors = self.ancestors_inclusive(id);
        let order = self.topological_order()?;
        let scoped: Vec<VertexId> = order.into_iter().filter(|v| ancestors.contains(v)).collect();
        self.recompute_in_order(&scoped)
    }

    fn recompute_in_order(&mut self, order: &[VertexId]) -> Result<(), FitError> {
        for vertex_id in order {
            let (is_dirty, parents) = {
                let vertex = &self.vertices[vertex_id];
                (vertex.dirty, vertex.parents.clone())
            };
            if !is_dirty || parents.is_empty() {
                continue;
            }

            let Some(payloads) = self.collect_cached_payloads(vertex_id, &parents) else {
                // An ancestor hasn't produced a value yet; leave dirty
                // and retry on a future recompute.
                continue;
            };
            let Some(aggregated) = self.apply_filters_then_aggregate(vertex_id, &parents, payloads) else {
                // A filter rejected this refresh: nothing changed, but we
                // did successfully evaluate it, so stop asking.
                self.vertices.get_mut(vertex_id).expect("vertex exists").dirty = false;
                continue;
            };

            match self.fit_and_cache(vertex_id, &aggregated) {
                Ok(new_value) => {
                    self.vertices.get_mut(vertex_id).expect("vertex exists").dirty = false;
                    self.notify_observers(vertex_id, &new_value, Some(&aggregated));
                }
                Err(err) => return Err(FitError::Accumulator(err)),
            }
        }
        Ok(())
    }

    /// Under lazy, an edge's "raw" payload is its parent's current cached
    /// value — there is no buffered per-sample stream to replay (§4.6).
    /// This is the documented raw/cached asymmetry between eager and
    /// lazy propagation.
    fn collect_cached_payloads(&self, vertex_id: &VertexId, parents: &[VertexId]) -> Option<Vec<Value>> {
        let mut payloads = Vec::with_capacity(parents.len());
        for parent in parents {
            let cached = self.vertices.get(parent)?.cached.clone()?;
            let _ = self.edges.get(&(parent.clone(), vertex_id.clone()))?;
            payloads.push(cached);
        }
        Some(payloads)
    }

    fn apply_filters_then_aggregate(
        &self,
        vertex_id: &VertexId,
        parents: &[VertexId],
        payloads: Vec<Value>,
    ) -> Option<Value> {
        for (parent, payload) in parents.iter().zip(&payloads) {
            let edge = &self.edges[&(parent.clone(), vertex_id.clone())];
            if let Some(filter) = &edge.filter {
                if !filter(payload) {
                    return None;
                }
            }
        }
        Some(self.aggregate(vertex_id, parents, &payloads))
    }
}
