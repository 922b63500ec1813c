//! Vertex storage (§3.1).

use crate::accumulator::Accumulator;
use crate::ids::VertexId;
use crate::observer::Observer;
use crate::value::Value;

/// One vertex: its accumulator, cached value, topology, and observers.
///
/// A vertex's own id is not stored here; it is always known from the
/// `IndexMap<VertexId, Vertex>` key wherever a `Vertex` is reached, so
/// duplicating it on the value side would just be another place for the
/// two to drift apart.
pub(crate) struct Vertex {
    pub(crate) stat: Box<dyn Accumulator>,
    /// Last observed `stat.value()`, or `None` before the first successful
    /// fit ("never-computed").
    pub(crate) cached: Option<Value>,
    /// Insertion order of inbound edges.
    pub(crate) parents: Vec<VertexId>,
    /// Insertion order of outbound edges.
    pub(crate) children: Vec<VertexId>,
    /// Used only by the lazy/partial strategies (§4.6); a newly created
    /// vertex starts dirty since it has never been computed.
    pub(crate) dirty: bool,
    pub(crate) observers: Vec<Observer>,
}

impl Vertex {
    pub(crate) fn new(stat: Box<dyn Accumulator>) -> Self {
        Self { stat, cached: None, parents: Vec::new(), children: Vec::new(), dirty: true, observers: Vec::new() }
    }
}
