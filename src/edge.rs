//! Edge storage: the optional filter/transform pair (§3.1, §4.4).

use std::fmt;

use crate::value::Value;

/// A unary predicate over a raw edge payload.
///
/// `filter(raw)` is evaluated first on every propagation step; a `false`
/// return suppresses propagation along that edge for that sample. An
/// absent filter behaves as "always true".
pub type Filter = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// A (possibly n-ary) transform over an ordered sequence of edge payloads.
///
/// For a plain (single-parent) edge the engine always calls this with a
/// one-element slice; for a fan-in vertex (§4.5) it is called with one
/// element per contributing parent, in `parents` order. An absent
/// transform behaves as the identity on a one-element slice, or as
/// [`Value::concat`] on a longer one.
pub type Transform = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// The filter/transform pair attached to one (source, target) edge.
///
/// Both may be supplied together; neither is invoked at `connect` time —
/// only during propagation.
#[derive(Default)]
pub struct Edge {
    pub(crate) filter: Option<Filter>,
    pub(crate) transform: Option<Transform>,
}

impl Edge {
    /// An edge with neither filter nor transform.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// An edge carrying only a filter.
    #[must_use]
    pub fn with_filter(filter: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self { filter: Some(Box::new(filter)), transform: None }
    }

    /// An edge carrying only a transform.
    #[must_use]
    pub fn with_transform(transform: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self { filter: None, transform: Some(Box::new(transform)) }
    }

    /// An edge carrying both a filter and a transform.
    #[must_use]
    pub fn with_filter_and_transform(
        filter: impl Fn(&Value) -> bool + Send + Sync + 'static,
        transform: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self { filter: Some(Box::new(filter)), transform: Some(Box::new(transform)) }
    }

    /// Whether this edge has a filter.
    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Whether this edge has a transform.
    #[must_use]
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// The hybrid payload rule (§4.4): an edge with neither filter nor
    /// transform transports the source's computed value; otherwise it
    /// transports the raw sample.
    #[must_use]
    pub fn wants_raw_payload(&self) -> bool {
        self.filter.is_some() || self.transform.is_some()
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("has_filter", &self.has_filter())
            .field("has_transform", &self.has_transform())
            .finish()
    }
}
