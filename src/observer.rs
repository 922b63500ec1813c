//! Per-vertex observer registry (§4.8).

use crate::ids::VertexId;
use crate::value::Value;

/// Identifies one registered observer, scoped to the vertex it was
/// registered on. Monotonically increasing per graph; not reused after
/// [`crate::Graph::remove_observer`].
pub type ObserverId = u64;

/// A callback invoked whenever the engine assigns a new cached value to
/// the vertex it is registered on.
///
/// Receives the vertex id, the new cached value, and the raw payload that
/// produced it (`None` when no raw sample is available for this update,
/// e.g. a fan-in step aggregated from parents' cached values under a
/// lazy recompute).
///
/// The callback must not mutate graph topology or strategy (§4.8); this
/// signature deliberately hands it no reference to the [`crate::Graph`]
/// it is registered on, and additionally requires `Send`, which rules out
/// capturing a single-threaded `Rc<RefCell<Graph>>` workaround — so that
/// restriction holds at compile time rather than by convention. See
/// [`crate::GraphError::ReentrantMutation`] for the one composed handle
/// the `Send` bound does allow, and why it deadlocks rather than panics.
pub type ObserverCallback = Box<dyn FnMut(&VertexId, &Value, Option<&Value>) + Send>;

/// One registered (id, callback) pair, in registration order.
pub(crate) struct Observer {
    pub(crate) id: ObserverId,
    pub(crate) callback: ObserverCallback,
}
