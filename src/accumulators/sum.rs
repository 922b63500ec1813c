//! Running total.

use crate::accumulator::Accumulator;
use crate::accumulators::NonFiniteSample;
use crate::errors::AccumulatorError;
use crate::ids::VertexId;
use crate::value::Value;

/// A running total. Follows the same flattening rule as [`crate::Mean`]:
/// a [`Value::Vector`] sample is absorbed element by element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum {
    total: f64,
}

impl Sum {
    /// Creates a sum accumulator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for Sum {
    fn fit(&mut self, vertex: &VertexId, sample: &Value) -> Result<(), AccumulatorError> {
        for &component in sample.components() {
            if !component.is_finite() {
                return Err(AccumulatorError::new(vertex.clone(), NonFiniteSample(component)));
            }
        }
        self.total += sample.components().iter().sum::<f64>();
        Ok(())
    }

    fn value(&self) -> Value {
        Value::Scalar(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_a_running_total() {
        let mut s = Sum::new();
        let vid = VertexId::from("v");
        s.fit(&vid, &Value::Scalar(1.5)).unwrap();
        s.fit(&vid, &Value::Vector(vec![2.0, 3.0])).unwrap();
        assert_eq!(s.value(), Value::Scalar(6.5));
    }
}
