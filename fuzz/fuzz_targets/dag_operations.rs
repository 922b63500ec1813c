//! Fuzzes arbitrary sequences of graph-mutating operations and asserts
//! the core invariants (§3.3) hold after every one of them.

use arbitrary::Arbitrary;
use flowstat_graph::{accumulators::Mean, Edge, Graph, Strategy, VertexId};
use honggfuzz::fuzz;

#[derive(Arbitrary, Debug)]
enum Op {
    AddVertex(VertexId),
    Connect(VertexId, VertexId),
    Fit(VertexId, f64),
    Invalidate(VertexId),
    SetStrategy(u8),
}

fn main() {
    loop {
        fuzz!(|ops: Vec<Op>| {
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
                assert!(graph.validate(), "graph invariants violated");
            }
        });
    }
}
