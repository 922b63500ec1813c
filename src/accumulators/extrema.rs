//! Running minimum and maximum.

use crate::accumulator::Accumulator;
use crate::accumulators::NonFiniteSample;
use crate::errors::AccumulatorError;
use crate::ids::VertexId;
use crate::value::Value;

/// Running `(min, max)`. `value()` returns `Value::Vector([min, max])`;
/// before any sample is absorbed both are `f64::NAN`.
#[derive(Debug, Clone, Copy)]
pub struct Extrema {
    min: f64,
    max: f64,
}

impl Default for Extrema {
    fn default() -> Self {
        Self { min: f64::NAN, max: f64::NAN }
    }
}

impl Extrema {
    /// Creates an extrema accumulator with no samples absorbed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fit_one(&mut self, sample: f64) -> Result<(), NonFiniteSample> {
        if !sample.is_finite() {
            return Err(NonFiniteSample(sample));
        }
        self.min = if self.min.is_nan() { sample } else { self.min.min(sample) };
        self.max = if self.max.is_nan() { sample } else { self.max.max(sample) };
        Ok(())
    }
}

impl Accumulator for Extrema {
    fn fit(&mut self, vertex: &VertexId, sample: &Value) -> Result<(), AccumulatorError> {
        let mut next = *self;
        for &component in sample.components() {
            next.fit_one(component).map_err(|e| AccumulatorError::new(vertex.clone(), e))?;
        }
        *self = next;
        Ok(())
    }

    fn value(&self) -> Value {
        Value::Vector(vec![self.min, self.max])
    }
}
