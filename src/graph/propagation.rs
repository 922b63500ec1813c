//! Eager and partial propagation (§4.4–§4.6): the wave walk shared by both
//! strategies, differing only in how the set of vertices to visit is
//! determined.

use std::collections::{HashMap, HashSet};

use crate::errors::{AccumulatorError, FitError, GraphError};
use crate::graph::Graph;
use crate::ids::VertexId;
use crate::value::Value;

/// One vertex's contribution to the current wave: the exact value most
/// recently passed to its accumulator's `fit`. Edges reading a "raw"
/// payload from an in-wave-updated parent read this map; parents that
/// were not touched this wave fall back to their stable cached value.
pub(super) type WaveInputs = HashMap<VertexId, Value>;

impl Graph {
    /// Runs one propagation wave after `updated_sources` have already had
    /// their own accumulators fit with `wave_inputs[source]`, per
    /// `self.strategy()` (eager or partial only — lazy never calls this).
    pub(super) fn propagate_wave(
        &mut self,
        updated_sources: &[VertexId],
        wave_inputs: &mut WaveInputs,
    ) -> Result<(), FitError> {
        let order = self.topological_order()?;
        let visit_order: Vec<VertexId> = match self.strategy {
            crate::Strategy::Partial => {
                let reachable = self.reachable_from(updated_sources);
                order.into_iter().filter(|id| reachable.contains(id)).collect()
            }
            _ => order,
        };

        let mut updated: HashSet<VertexId> = updated_sources.iter().cloned().collect();

        for vertex_id in visit_order {
            if updated.contains(&vertex_id) {
                continue;
            }
            let parents = self.parents(&vertex_id).expect("vertex came from our own topo order").to_vec();
            if parents.is_empty() {
                continue;
            }
            let has_updated_parent = parents.iter().any(|p| updated.contains(p));
            if !has_updated_parent {
                continue;
            }

            let Some(payloads) = self.collect_fanin_payloads(&vertex_id, &parents, &updated, wave_inputs) else {
                // A contributing filter rejected this step; the vertex is
                // simply not visited this wave (§4.5).
                continue;
            };

            let aggregated = self.aggregate(&vertex_id, &parents, &payloads);
            match self.fit_and_cache(&vertex_id, &aggregated) {
                Ok(new_value) => {
                    wave_inputs.insert(vertex_id.clone(), aggregated);
                    self.notify_observers(&vertex_id, &new_value, Some(&wave_inputs[&vertex_id]));
                    updated.insert(vertex_id);
                }
                Err(err) => return Err(FitError::Accumulator(err)),
            }
        }
        Ok(())
    }

    /// BFS over `children` starting from every vertex in `sources`,
    /// excluding the sources themselves. Used by the partial strategy to
    /// bound the topological scan to the subgraph actually reachable this
    /// wave, rather than scanning the whole cached order.
    pub(super) fn reachable_from(&self, sources: &[VertexId]) -> HashSet<VertexId> {
        let mut reachable = HashSet::new();
        let mut stack: Vec<VertexId> = sources.to_vec();
        let mut seen: HashSet<VertexId> = sources.iter().cloned().collect();
        while let Some(current) = stack.pop() {
            let Ok(children) = self.children(&current) else { continue };
            for child in children.to_vec() {
                reachable.insert(child.clone());
                if seen.insert(child.clone()) {
                    stack.push(child);
                }
            }
        }
        reachable
    }

    /// For each of `vertex_id`'s `parents`, resolves the payload it
    /// contributes to this wave step, applying that parent edge's filter.
    /// Returns `None` if any contributing edge's filter rejects its
    /// payload, which suppresses the whole aggregated fit (§4.5).
    fn collect_fanin_payloads(
        &self,
        vertex_id: &VertexId,
        parents: &[VertexId],
        updated: &HashSet<VertexId>,
        wave_inputs: &WaveInputs,
    ) -> Option<Vec<Value>> {
        let mut payloads = Vec::with_capacity(parents.len());
        for parent in parents {
            let edge = self.edges.get(&(parent.clone(), vertex_id.clone()))?;
            let payload = if updated.contains(parent) {
                if edge.wants_raw_payload() {
                    wave_inputs.get(parent).cloned().unwrap_or(Value::Scalar(0.0))
                } else {
                    self.vertices[parent].stat.value()
                }
            } else {
                self.vertices[parent].cached.clone().unwrap_or(Value::Scalar(0.0))
            };
            if let Some(filter) = &edge.filter {
                if !filter(&payload) {
                    return None;
                }
            }
            payloads.push(payload);
        }
        Some(payloads)
    }

    /// Applies the n-ary aggregation rule (§4.5) to `payloads`, one per
    /// parent in `parents` order.
    ///
    /// For a single parent this is just that edge's transform (or the
    /// identity). For a genuine fan-in, the transform used is the first
    /// one found among the contributing inbound edges, in parent order;
    /// with none present, the payloads are concatenated into one
    /// `Value::Vector` (§3.5, and see `DESIGN.md` for why edges rather
    /// than vertices own transforms here).
    pub(super) fn aggregate(&self, vertex_id: &VertexId, parents: &[VertexId], payloads: &[Value]) -> Value {
        if payloads.len() == 1 {
            let edge = &self.edges[&(parents[0].clone(), vertex_id.clone())];
            return edge.transform.as_ref().map_or_else(|| payloads[0].clone(), |t| t(payloads));
        }
        for parent in parents {
            if let Some(transform) = &self.edges[&(parent.clone(), vertex_id.clone())].transform {
                return transform(payloads);
            }
        }
        Value::concat(payloads)
    }

    /// Fits `vertex_id`'s accumulator with `value` and caches the result.
    /// Does not touch observers or the wave's updated-set; callers do
    /// that once they know the fit succeeded.
    pub(super) fn fit_and_cache(&mut self, vertex_id: &VertexId, value: &Value) -> Result<Value, AccumulatorError> {
        let vertex = self.vertices.get_mut(vertex_id).expect("caller validated vertex exists");
        vertex.stat.fit(vertex_id, value)?;
        let new_value = vertex.stat.value();
        vertex.cached = Some(new_value.clone());
        Ok(new_value)
    }

    /// Invokes every observer registered on `vertex_id`, in registration
    /// order. A panic inside a callback is caught, logged, and does not
    /// stop the remaining observers or abort the wave (§4.8, §7).
    pub(super) fn notify_observers(&mut self, vertex_id: &VertexId, new_value: &Value, raw: Option<&Value>) {
        let Some(vertex) = self.vertices.get_mut(vertex_id) else { return };
        for observer in &mut vertex.observers {
            let callback = std::panic::AssertUnwindSafe(&mut observer.callback);
            let result = std::panic::catch_unwind(move || (callback.0)(vertex_id, new_value, raw));
            if let Err(payload) = result {
                let message = panic_message(&payload);
                tracing::error!(vertex = %vertex_id, observer = observer.id, %message, "observer callback panicked; continuing wave");
            }
        }
    }

    pub(super) fn unknown_vertex(&self, id: &VertexId) -> GraphError {
        GraphError::UnknownVertex(id.clone())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
