//! The three propagation strategies (§4.6).

/// How the engine propagates an update through the graph after a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Walk the transitive descendant set of every fitted source,
    /// immediately, in topological order. After `fit` returns, every
    /// reachable descendant's cached value reflects the new sample.
    #[default]
    Eager,
    /// Update only the fitted source; mark all strict descendants dirty.
    /// Recomputation happens lazily, on the next `value` call that needs
    /// it.
    Lazy,
    /// Like eager, but restricted to the subgraph actually reachable from
    /// the fitted source(s) in this wave (computed up front via a
    /// reachability walk rather than scanning the full topological
    /// order).
    Partial,
}
