//! Structural errors: everything that can go wrong mutating graph topology.

use crate::ids::VertexId;

/// Errors raised by structural, non-accumulator-involving mutations:
/// [`crate::Graph::add_vertex`], [`crate::Graph::connect`],
/// [`crate::Graph::set_strategy`], and the reentrancy guard around observer
/// callbacks.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// `add_vertex` was called with an id already present in the graph.
    #[error("vertex {0:?} already exists")]
    DuplicateVertex(VertexId),
    /// An operation referenced a vertex id that does not exist.
    #[error("vertex {0:?} is not present in the graph")]
    UnknownVertex(VertexId),
    /// `connect` was called for a (source, target) pair that is already
    /// wired.
    #[error("an edge from {0:?} to {1:?} already exists")]
    DuplicateEdge(VertexId, VertexId),
    /// `connect` was rejected because the proposed edge would close a
    /// cycle.
    #[error("connecting {0:?} to {1:?} would introduce a cycle")]
    CycleError(VertexId, VertexId),
    /// `set_strategy` received a strategy tag the engine does not
    /// recognize. Reserved for forward-compatible strategy negotiation at
    /// the crate boundary; the in-process [`crate::Strategy`] enum is
    /// exhaustive today so this variant cannot currently be constructed by
    /// `set_strategy` itself.
    #[error("{0:?} is not a recognized propagation strategy")]
    InvalidStrategy(String),
    /// Kahn's algorithm emitted fewer vertices than exist in the graph,
    /// meaning the edge map induces a cycle despite the cycle detector
    /// reporting acyclicity. Should be unreachable given invariant 3.3.1;
    /// surfaced rather than panicking so a caller can recover the graph.
    #[error("topological sort visited {visited} of {total} vertices; the graph is inconsistent")]
    StructuralError {
        /// Number of vertices Kahn's algorithm managed to emit.
        visited: usize,
        /// Total number of vertices in the graph.
        total: usize,
    },
    /// An observer callback attempted to mutate the graph it was
    /// registered on, or to switch its strategy (§4.8, §9 "observer-
    /// triggered topology mutation").
    ///
    /// [`crate::observer::ObserverCallback`]'s signature never hands a
    /// callback a reference back to its [`crate::Graph`], so a callback
    /// registered through [`crate::Graph::add_observer`] cannot construct
    /// this variant today — the type system already rejects the call at
    /// compile time. A caller who works around that by composing `Graph`
    /// behind their own shared handle hits a second, independent barrier:
    /// `ObserverCallback` additionally requires `Send`, which rules out a
    /// single-threaded `Rc<RefCell<Graph>>` (`Rc` is never `Send`) and
    /// leaves only a `Sync`-safe handle such as `Arc<Mutex<Graph>>` (see
    /// [`crate::SyncGraph`]) — and re-locking that same mutex from inside
    /// a callback invoked while the lock is already held deadlocks rather
    /// than panics, so there is no way to reach this variant through
    /// `add_observer` at all today. It is reserved for a hypothetical
    /// caller-side reentrancy guard built on top of the engine, not for
    /// anything the engine itself constructs.
    #[error("vertex {0:?}'s observer attempted to re-enter a mutating graph operation")]
    ReentrantMutation(VertexId),
}
