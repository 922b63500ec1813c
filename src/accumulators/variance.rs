//! Online variance via Welford's algorithm.

use crate::accumulator::Accumulator;
use crate::accumulators::NonFiniteSample;
use crate::errors::AccumulatorError;
use crate::ids::VertexId;
use crate::value::Value;

/// Online mean and (population) variance, computed with Welford's
/// algorithm. `value()` returns `Value::Vector([mean, variance])`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Variance {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Variance {
    /// Creates an empty variance accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Population variance of the samples absorbed so far, or `0.0` if
    /// fewer than one sample has been absorbed.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = self.count as f64;
            self.m2 / count
        }
    }

    fn fit_one(&mut self, sample: f64) -> Result<(), NonFiniteSample> {
        if !sample.is_finite() {
            return Err(NonFiniteSample(sample));
        }
        self.count += 1;
        #[allow(clippy::cast_precision_loss)]
        let count = self.count as f64;
        let delta = sample - self.mean;
        self.mean += delta / count;
        let delta2 = sample - self.mean;
        self.m2 += delta * delta2;
        Ok(())
    }
}

impl Accumulator for Variance {
    fn fit(&mut self, vertex: &VertexId, sample: &Value) -> Result<(), AccumulatorError> {
        let mut next = *self;
        for &component in sample.components() {
            next.fit_one(component).map_err(|e| AccumulatorError::new(vertex.clone(), e))?;
        }
        *self = next;
        Ok(())
    }

    fn value(&self) -> Value {
        Value::Vector(vec![self.mean, self.variance()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_textbook_population_variance() {
        let mut v = Variance::new();
        let vid = VertexId::from("v");
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            v.fit(&vid, &Value::Scalar(x)).unwrap();
        }
        let Value::Vector(components) = v.value() else { panic!("expected vector") };
        assert!((components[0] - 5.0).abs() < 1e-9);
        assert!((components[1] - 4.0).abs() < 1e-9);
    }
}
