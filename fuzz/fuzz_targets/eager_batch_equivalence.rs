//! Fuzzes random batches of samples fit into a plain two-vertex chain and
//! asserts that batch ingestion and repeated single-sample ingestion
//! agree exactly under eager propagation (§8, testable property 4).

use flowstat_graph::{accumulators::Mean, Edge, Graph};
use honggfuzz::fuzz;

fn build() -> Graph {
    let mut graph = Graph::new();
    graph.add_vertex("a", Mean::new()).expect("fresh graph");
    graph.add_vertex("b", Mean::new()).expect("fresh graph");
    graph.connect("a", "b", Edge::plain()).expect("fresh graph");
    graph
}

fn main() {
    loop {
        fuzz!(|samples: Vec<f64>| {
            let samples: Vec<f64> = samples.into_iter().filter(|s| s.is_finite()).collect();
            if samples.is_empty() {
                return;
            }

            let mut batched = build();
            if batched.fit("a", samples.clone()).is_err() {
                return;
            }

            let mut sequential = build();
            for &sample in &samples {
                if sequential.fit("a", sample).is_err() {
                    return;
                }
            }

            assert_eq!(batched.cached_value(&"a".into()).unwrap(), sequential.cached_value(&"a".into()).unwrap());
            assert_eq!(batched.cached_value(&"b".into()).unwrap(), sequential.cached_value(&"b".into()).unwrap());
        });
    }
}
