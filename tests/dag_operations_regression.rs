//! Regression tests that exercise the same operation-sequence code path as
//! `fuzz/fuzz_targets/dag_operations.rs`, but constructed from fixed byte
//! patterns via `Arbitrary` rather than a fuzzer, so they run as part of
//! the ordinary test suite.
#![cfg(feature = "arbitrary")]

use arbitrary::{Arbitrary, Unstructured};
use flowstat_graph::{accumulators::Mean, Edge, Graph, Strategy, VertexId};

#[derive(Arbitrary, Debug)]
enum Op {
    AddVertex(VertexId),
    Connect(VertexId, VertexId),
    Fit(VertexId, f64),
    Invalidate(VertexId),
    SetStrategy(u8),
}

fn from_bytes(bytes: &[u8]) -> Option<Vec<Op>> {
    let mut u = Unstructured::new(bytes);
    Vec::<Op>::arbitrary(&mut u).ok()
}

fn replay(ops: Vec<Op>) {
    let mut graph = Graph::new();
    for op in ops {
        match op {
            Op::AddVertex(id) => {
                let _ = graph.add_vertex(id, Mean::new());
            }
            Op::Connect(src, dst) => {
                let _ = graph.connect(src, dst, Edge::plain());
            }
            Op::Fit(id, sample) => {
                if sample.is_finite() {
                    let _ = graph.fit(id, sample);
                }
            }
            Op::Invalidate(id) => {
                let _ = graph.invalidate(&id);
            }
            Op::SetStrategy(tag) => {
                let strategy = match tag % 3 {
                    0 => Strategy::Eager,
                    1 => Strategy::Lazy,
                    _ => Strategy::Partial,
                };
                graph.set_strategy(strategy);
            }
        }
        assert!(graph.validate(), "graph invariants violated replaying a fixed byte pattern");
    }
}

/// A handful of byte patterns sized and shaped to exercise empty input,
/// a single op, and enough bytes to cycle through every `Op` variant and
/// every letter of `VertexId`'s fixed 8-letter fuzzing alphabet at least
/// once.
fn byte_patterns() -> Vec<Vec<u8>> {
    vec![
        vec![],
        vec![0],
        vec![0, 0, 0],
        (0u8..=255).collect(),
        std::iter::repeat(0u8).take(64).collect(),
        std::iter::repeat(0xFFu8).take(64).collect(),
        (0u8..64).chain(0u8..64).collect(),
    ]
}

#[test]
fn replaying_fixed_byte_patterns_never_violates_graph_invariants() {
    for pattern in byte_patterns() {
        if let Some(ops) = from_bytes(&pattern) {
            replay(ops);
        }
    }
}
