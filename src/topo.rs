//! Kahn's algorithm over the current graph (§4.3).

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::errors::GraphError;
use crate::ids::VertexId;
use crate::vertex::Vertex;

/// Computes a deterministic topological order of `vertices` via Kahn's
/// algorithm.
///
/// Ties are broken by insertion order: the initial frontier of in-degree
/// zero vertices is built by scanning `vertices` in its own (insertion)
/// order, and newly-zero vertices are appended to the next frontier in
/// the order their last remaining inbound edge was retired.
///
/// # Errors
///
/// Returns [`GraphError::StructuralError`] if fewer vertices are emitted
/// than exist — per invariant 3.3.1 this should be unreachable given the
/// cycle detector runs before every edge insertion, but a cache built
/// from an inconsistent graph should fail loudly rather than silently
/// truncate.
pub(crate) fn topological_order(vertices: &IndexMap<VertexId, Vertex>) -> Result<Vec<VertexId>, GraphError> {
    let mut in_degree: HashMap<VertexId, usize> =
        vertices.iter().map(|(id, v)| (id.clone(), v.parents.len())).collect();

    let mut frontier: Vec<VertexId> =
        vertices.iter().filter(|(_, v)| v.parents.is_empty()).map(|(id, _)| id.clone()).collect();

    let mut order = Vec::with_capacity(vertices.len());

    while let Some(current) = pop_front(&mut frontier) {
        order.push(current.clone());
        if let Some(vertex) = vertices.get(&current) {
            for child in &vertex.children {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        frontier.push(child.clone());
                    }
                }
            }
        }
    }

    if order.len() != vertices.len() {
        return Err(GraphError::StructuralError { visited: order.len(), total: vertices.len() });
    }
    Ok(order)
}

/// `Vec` is used as a FIFO queue here (rather than `VecDeque`) because
/// the frontier never grows large relative to the graph and Kahn's
/// algorithm doesn't care which in-degree-zero vertex is emitted next
/// within a level, only that insertion order is preserved across levels.
fn pop_front(frontier: &mut Vec<VertexId>) -> Option<VertexId> {
    if frontier.is_empty() {
        None
    } else {
        Some(frontier.remove(0))
    }
}
