//! The accumulator capability (§3.2).

use std::fmt;

use crate::errors::AccumulatorError;
use crate::ids::VertexId;
use crate::value::Value;

/// The polymorphic contract a vertex's statistic must satisfy.
///
/// The core never inspects the concrete implementor; it stores it behind
/// `Box<dyn Accumulator>` and conveys [`Accumulator::value`] as an opaque
/// [`Value`]. Implementations are free to interpret `sample` however suits
/// the statistic they maintain — the reference accumulators in
/// [`crate::accumulators`] flatten a [`Value::Vector`] sample into
/// independent scalar observations, but that is a convention of those
/// implementations, not a requirement of the trait.
pub trait Accumulator: fmt::Debug + Send + 'static {
    /// Absorbs one sample, mutating the accumulator's internal state.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError`] if `sample` cannot be absorbed (for
    /// example, a non-finite value where the accumulator requires
    /// finiteness). On error the accumulator must leave its prior state
    /// unchanged so a retried `fit` with a valid sample behaves as if the
    /// failed call never happened.
    fn fit(&mut self, vertex: &VertexId, sample: &Value) -> Result<(), AccumulatorError>;

    /// Returns the accumulator's current reduction.
    ///
    /// Must be purely functional with respect to the accumulated state:
    /// calling it twice without an intervening `fit` returns equal values.
    fn value(&self) -> Value;
}
