//! DFS-based cycle detector invoked before every edge insertion (§4.2).

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::ids::VertexId;
use crate::vertex::Vertex;

/// Returns `true` if `target` is reachable from `start` following the
/// current `children` (successor) relation.
///
/// Called as `is_reachable(&vertices, dst, src)` before materializing the
/// proposed edge `(src, dst)`: if `src` is reachable from `dst`, adding
/// the edge would close a cycle. Visits each vertex at most once, so the
/// search is bounded by the current vertex and edge counts.
pub(crate) fn is_reachable(vertices: &IndexMap<VertexId, Vertex>, start: &VertexId, target: &VertexId) -> bool {
    if start == target {
        return true;
    }
    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut stack: Vec<VertexId> = vec![start.clone()];
    visited.insert(start.clone());

    while let Some(current) = stack.pop() {
        let Some(vertex) = vertices.get(&current) else { continue };
        for child in &vertex.children {
            if child == target {
                return true;
            }
            if visited.insert(child.clone()) {
                stack.push(child.clone());
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulators::Mean;

    fn graph_with_chain() -> IndexMap<VertexId, Vertex> {
        let mut vertices = IndexMap::new();
        for id in ["a", "b", "c"] {
            vertices.insert(VertexId::from(id), Vertex::new(Box::new(Mean::new())));
        }
        vertices.get_mut(&VertexId::from("a")).unwrap().children.push(VertexId::from("b"));
        vertices.get_mut(&VertexId::from("b")).unwrap().children.push(VertexId::from("c"));
        vertices
    }

    #[test]
    fn detects_reachability_through_a_chain() {
        let vertices = graph_with_chain();
        assert!(is_reachable(&vertices, &VertexId::from("a"), &VertexId::from("c")));
        assert!(!is_reachable(&vertices, &VertexId::from("c"), &VertexId::from("a")));
    }

    #[test]
    fn a_vertex_is_reachable_from_itself() {
        let vertices = graph_with_chain();
        assert!(is_reachable(&vertices, &VertexId::from("a"), &VertexId::from("a")));
    }
}
