//! The payload type carried between accumulators.

/// A sample or a reduction produced by an [`Accumulator`](crate::Accumulator).
///
/// This is the one concrete modeling decision the core makes on top of the
/// "scalar, tuple, or structured" language used to describe accumulator
/// values: every payload that crosses an edge, gets cached on a vertex, or
/// reaches an observer is one of these two shapes. A single sample fit at a
/// source is always [`Value::Scalar`]; a fan-in aggregate, or any
/// accumulator whose reduction has more than one component (e.g. a
/// mean/variance pair), is [`Value::Vector`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// A single floating-point sample or reduction.
    Scalar(f64),
    /// An ordered collection of floating-point components.
    Vector(Vec<f64>),
}

impl Value {
    /// Returns the scalar components of this value, in order.
    ///
    /// A [`Value::Scalar`] yields a single element; a [`Value::Vector`]
    /// yields its elements in order. Used to flatten fan-in payloads into a
    /// single `Value::Vector` when no aggregating transform is supplied.
    #[must_use]
    pub fn components(&self) -> &[f64] {
        match self {
            Self::Scalar(s) => core::slice::from_ref(s),
            Self::Vector(v) => v,
        }
    }

    /// Flattens an ordered sequence of payloads into a single
    /// [`Value::Vector`] by concatenating each payload's components.
    ///
    /// This is the default fan-in aggregation rule used when an edge into a
    /// multi-parent vertex carries no transform (§4.5: "if absent, the
    /// target accumulator is fit with the vector directly").
    #[must_use]
    pub fn concat(payloads: &[Value]) -> Self {
        let mut flattened = Vec::with_capacity(payloads.len());
        for payload in payloads {
            flattened.extend_from_slice(payload.components());
        }
        Self::Vector(flattened)
    }
}

impl From<f64> for Value {
    fn from(scalar: f64) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Vec<f64>> for Value {
    fn from(vector: Vec<f64>) -> Self {
        Self::Vector(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_components_is_a_single_element_slice() {
        let v = Value::Scalar(3.0);
        assert_eq!(v.components(), &[3.0]);
    }

    #[test]
    fn concat_flattens_in_order() {
        let payloads = vec![
            Value::Scalar(1.0),
            Value::Vector(vec![2.0, 3.0]),
            Value::Scalar(4.0),
        ];
        assert_eq!(Value::concat(&payloads), Value::Vector(vec![1.0, 2.0, 3.0, 4.0]));
    }
}
