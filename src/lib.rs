//! A typed, directed, acyclic graph of online statistical accumulators.
//!
//! A [`Graph`] ingests data points at source vertices and automatically
//! propagates derived values through the graph under one of three
//! evaluation strategies ([`Strategy::Eager`], [`Strategy::Lazy`],
//! [`Strategy::Partial`]). Every vertex wraps a pluggable
//! [`Accumulator`] — the crate ships a small reference catalogue in
//! [`accumulators`] (`Mean`, `Sum`, `Count`, `Variance`, `Extrema`), but a
//! caller may supply its own for any statistic shaped as "absorbs a
//! sample, exposes a value".
//!
//! ```
//! use flowstat_graph::{accumulators::Mean, Edge, Graph, Value};
//!
//! let mut graph = Graph::new();
//! graph.add_vertex("celsius", Mean::new()).unwrap();
//! graph.add_vertex("fahrenheit", Mean::new()).unwrap();
//! graph
//!     .connect("celsius", "fahrenheit", Edge::with_transform(|c| Value::Scalar(c[0].components()[0] * 9.0 / 5.0 + 32.0)))
//!     .unwrap();
//!
//! graph.fit("celsius", vec![0.0, 10.0, 20.0, 30.0]).unwrap();
//! assert_eq!(graph.cached_value(&"fahrenheit".into()).unwrap(), Some(Value::Scalar(59.0)));
//! ```
//!
//! The DAG's own structure, cycle rejection, fan-in aggregation, and
//! filter/transform ordering are the core's job; the concrete statistics
//! that flow through it, and any wire protocol, visualizer, or HTTP/CLI
//! front end built on top, are not (see `DESIGN.md`).

mod accumulator;
pub mod accumulators;
mod cycle;
mod edge;
mod errors;
mod graph;
pub mod ids;
mod observer;
mod strategy;
mod sync_graph;
mod topo;
mod value;
mod vertex;

pub use accumulator::Accumulator;
pub use edge::{Edge, Filter, Transform};
pub use errors::{AccumulatorError, FitError, GraphError};
pub use graph::{Graph, IntoBatch};
pub use ids::VertexId;
pub use observer::{ObserverCallback, ObserverId};
pub use strategy::Strategy;
pub use sync_graph::SyncGraph;
pub use value::Value;
