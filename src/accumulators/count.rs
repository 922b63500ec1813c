//! Running sample count.

use crate::accumulator::Accumulator;
use crate::errors::AccumulatorError;
use crate::ids::VertexId;
use crate::value::Value;

/// The number of samples absorbed, counting each scalar element of a
/// [`Value::Vector`] sample individually.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count {
    count: u64,
}

impl Count {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for Count {
    fn fit(&mut self, _vertex: &VertexId, sample: &Value) -> Result<(), AccumulatorError> {
        self.count += sample.components().len() as u64;
        Ok(())
    }

    fn value(&self) -> Value {
        #[allow(clippy::cast_precision_loss)]
        Value::Scalar(self.count as f64)
    }
}
