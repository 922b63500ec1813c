//! Running arithmetic mean.

use crate::accumulator::Accumulator;
use crate::accumulators::NonFiniteSample;
use crate::errors::AccumulatorError;
use crate::ids::VertexId;
use crate::value::Value;

/// A running arithmetic mean.
///
/// `fit` absorbs a [`Value::Scalar`] directly, or absorbs every element of
/// a [`Value::Vector`] as an independent sample (flattening), so `Mean` is
/// usable directly as a fan-in target with no transform (§3.5).
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean {
    count: u64,
    mean: f64,
}

impl Mean {
    /// Creates an empty mean accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of samples absorbed so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    fn fit_one(&mut self, sample: f64) -> Result<(), NonFiniteSample> {
        if !sample.is_finite() {
            return Err(NonFiniteSample(sample));
        }
        self.count += 1;
        #[allow(clippy::cast_precision_loss)]
        let count = self.count as f64;
        self.mean += (sample - self.mean) / count;
        Ok(())
    }
}

impl Accumulator for Mean {
    fn fit(&mut self, vertex: &VertexId, sample: &Value) -> Result<(), AccumulatorError> {
        let mut next = *self;
        for &component in sample.components() {
            next.fit_one(component).map_err(|e| AccumulatorError::new(vertex.clone(), e))?;
        }
        *self = next;
        Ok(())
    }

    fn value(&self) -> Value {
        Value::Scalar(self.mean)
    }
}
