//! Scenario-driven integration tests seeded from the propagation spec's
//! testable properties: a diamond under eager fan-in, filter suppression,
//! a pure transform, the hybrid computed-vs-raw payload rule, cycle
//! rejection, and lazy/eager equivalence on a plain chain.

use flowstat_graph::{accumulators::Mean, Edge, Graph, Strategy, Value};

fn scalar(v: &Value) -> f64 {
    match v {
        Value::Scalar(s) => *s,
        Value::Vector(_) => panic!("expected a scalar value, got {v:?}"),
    }
}

/// S1: diamond a→b, a→c, b→d, c→d, all plain edges, eager strategy.
#[test]
fn diamond_eager_fan_in() {
    let mut graph = Graph::new();
    for id in ["a", "b", "c", "d"] {
        graph.add_vertex(id, Mean::new()).unwrap();
    }
    graph.connect("a", "b", Edge::plain()).unwrap();
    graph.connect("a", "c", Edge::plain()).unwrap();
    graph.connect("b", "d", Edge::plain()).unwrap();
    graph.connect("c", "d", Edge::plain()).unwrap();

    graph.fit("a", vec![1.0, 2.0, 3.0]).unwrap();

    assert_eq!(scalar(&graph.cached_value(&"a".into()).unwrap().unwrap()), 2.0);

    // b and c are themselves Means fed a's *computed* value at each step
    // (a→b, a→c are plain edges), so their own trajectories are the
    // running mean of a's running mean: [1, 1.25, 1.5].
    assert!((scalar(&graph.cached_value(&"b".into()).unwrap().unwrap()) - 1.5).abs() < 1e-9);
    assert!((scalar(&graph.cached_value(&"c".into()).unwrap().unwrap()) - 1.5).abs() < 1e-9);

    // `d`'s inputs are the per-step fan-in vectors [b, c] presented at
    // each of a's three samples: [1,1], [1.25,1.25], [1.5,1.5] — b and c's
    // own cached values right after each step, not a's. Mean flattens
    // vector samples into independent scalar observations, so d's mean is
    // the mean of all six flattened components.
    let expected_d = (1.0 + 1.0 + 1.25 + 1.25 + 1.5 + 1.5) / 6.0;
    assert!((scalar(&graph.cached_value(&"d".into()).unwrap().unwrap()) - expected_d).abs() < 1e-9);
}

/// S2: filter suppression — the edge still carries raw values (§4.4), so
/// a downstream mean only absorbs samples the filter lets through.
#[test]
fn filter_suppression_operates_on_raw_values() {
    let mut graph = Graph::new();
    graph.add_vertex("a", Mean::new()).unwrap();
    graph.add_vertex("b", Mean::new()).unwrap();
    graph.connect("a", "b", Edge::with_filter(|v| v.components()[0] > 5.0)).unwrap();

    graph.fit("a", vec![1.0, 10.0, 3.0, 8.0]).unwrap();

    assert_eq!(scalar(&graph.cached_value(&"a".into()).unwrap().unwrap()), 5.5);
    assert_eq!(scalar(&graph.cached_value(&"b".into()).unwrap().unwrap()), 9.0);
}

/// S3: a pure transform (no filter) converts each raw Celsius sample to
/// Fahrenheit before it reaches the target accumulator.
#[test]
fn transform_only_converts_every_raw_sample() {
    let mut graph = Graph::new();
    graph.add_vertex("celsius", Mean::new()).unwrap();
    graph.add_vertex("fahrenheit", Mean::new()).unwrap();
    graph
        .connect(
            "celsius",
            "fahrenheit",
            Edge::with_transform(|v| Value::Scalar(v[0].components()[0] * 9.0 / 5.0 + 32.0)),
        )
        .unwrap();

    graph.fit("celsius", vec![0.0, 10.0, 20.0, 30.0]).unwrap();

    assert_eq!(scalar(&graph.cached_value(&"celsius".into()).unwrap().unwrap()), 15.0);
    assert_eq!(scalar(&graph.cached_value(&"fahrenheit".into()).unwrap().unwrap()), 59.0);
}

/// S4: the hybrid rule regression — a plain edge carries the source's
/// *computed* value after each sample, not the raw sample itself.
#[test]
fn plain_edge_carries_computed_value_not_raw_sample() {
    let mut graph = Graph::new();
    graph.add_vertex("a", Mean::new()).unwrap();
    graph.add_vertex("b", Mean::new()).unwrap();
    graph.connect("a", "b", Edge::plain()).unwrap();

    graph.fit("a", vec![1.0, 2.0, 3.0]).unwrap();

    // mean(1, 1.5, 2) = 1.5, NOT mean(1, 2, 3) = 2.
    assert!((scalar(&graph.cached_value(&"b".into()).unwrap().unwrap()) - 1.5).abs() < 1e-9);
}

/// S5: attempting to close a→b→c into a cycle at c→a is rejected and
/// leaves the graph's edges unchanged.
#[test]
fn cycle_closing_edge_is_rejected_and_graph_is_unchanged() {
    let mut graph = Graph::new();
    for id in ["a", "b", "c"] {
        graph.add_vertex(id, Mean::new()).unwrap();
    }
    graph.connect("a", "b", Edge::plain()).unwrap();
    graph.connect("b", "c", Edge::plain()).unwrap();

    let err = graph.connect("c", "a", Edge::plain()).unwrap_err();
    assert!(matches!(err, flowstat_graph::GraphError::CycleError(_, _)));

    assert_eq!(graph.children(&"c".into()).unwrap(), &[] as &[flowstat_graph::VertexId]);
    assert_eq!(graph.parents(&"a".into()).unwrap(), &[] as &[flowstat_graph::VertexId]);
    assert!(graph.validate());
}

/// S6: a plain chain of five means reaches the same value whether it is
/// fit under eager or under lazy, *as long as `value` is read after every
/// single fit* (§4.6 testable property 5). Lazy only buffers one
/// recompute's worth of "how much changed since the last read" per
/// vertex — it replays each dirty ancestor's *current* cached value once,
/// not the whole run of samples the ancestor saw meanwhile — so batching
/// several fits before a single `value` read is a materially different
/// (and valid, just not equivalent) usage pattern; see
/// `lazy_batches_multiple_upstream_changes_into_one_recompute` below for
/// that divergence made explicit.
#[test]
fn lazy_and_eager_agree_on_a_plain_chain() {
    let samples = [1.0, 4.0, 9.0, 16.0, 25.0];

    let mut eager = Graph::with_strategy(Strategy::Eager);
    let mut lazy = Graph::with_strategy(Strategy::Lazy);
    for graph in [&mut eager, &mut lazy] {
        for id in ["a", "b", "c", "d", "e"] {
            graph.add_vertex(id, Mean::new()).unwrap();
        }
        graph.connect("a", "b", Edge::plain()).unwrap();
        graph.connect("b", "c", Edge::plain()).unwrap();
        graph.connect("c", "d", Edge::plain()).unwrap();
        graph.connect("d", "e", Edge::plain()).unwrap();
    }

    for &sample in &samples {
        eager.fit("a", sample).unwrap();
        lazy.fit("a", sample).unwrap();

        let eager_e = eager.cached_value(&"e".into()).unwrap();
        let lazy_e = lazy.value(&"e".into()).unwrap();
        assert_eq!(eager_e, lazy_e);
    }
}

/// The flip side of S6: if several fits land before `value` is read, lazy
/// recompute collapses them into a single refresh per dirty vertex using
/// whatever the parent's cached value happens to be *at recompute time*,
/// not a replay of each intermediate value — so a long-chain lazy read
/// after a batch of fits does not, in general, match what eager would
/// have produced for the same batch. Documents the asymmetry the spec
/// calls out rather than asserting a stronger equivalence the engine does
/// not implement.
#[test]
fn lazy_batches_multiple_upstream_changes_into_one_recompute() {
    let samples = [1.0, 4.0, 9.0];

    let mut lazy = Graph::with_strategy(Strategy::Lazy);
    lazy.add_vertex("a", Mean::new()).unwrap();
    lazy.add_vertex("b", Mean::new()).unwrap();
    lazy.connect("a", "b", Edge::plain()).unwrap();

    for &sample in &samples {
        lazy.fit("a", sample).unwrap();
    }

    // a's final cached mean, not the per-step trajectory, is all that
    // reaches b: b is fit exactly once, with a single sample equal to
    // a's cached value at recompute time, so b's mean is exactly that
    // one sample rather than the mean of three running-mean steps.
    let a_final = scalar(&lazy.value(&"a".into()).unwrap().unwrap());
    assert!((a_final - 14.0 / 3.0).abs() < 1e-9);
    assert_eq!(lazy.value(&"b".into()).unwrap(), Some(Value::Scalar(a_final)));
}
