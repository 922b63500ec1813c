//! The ingestion API (§4.7): `fit` and the multi-source batch variant.

use tracing::instrument;

use crate::errors::FitError;
use crate::graph::propagation::WaveInputs;
use crate::graph::Graph;
use crate::ids::VertexId;
use crate::strategy::Strategy;
use crate::value::Value;

/// Converts an ergonomic sample argument into the batch of [`Value`]s
/// `Graph::fit` actually processes.
///
/// A single scalar is a batch of one; every ingestion variant bottoms out
/// in the same per-sample loop, which is what makes batch ingestion
/// provably equivalent to repeated single-sample ingestion (§4.6,
/// testable property 4) rather than merely documented as such.
pub trait IntoBatch {
    /// Converts `self` into an ordered batch of samples.
    fn into_batch(self) -> Vec<Value>;
}

impl IntoBatch for f64 {
    fn into_batch(self) -> Vec<Value> {
        vec![Value::Scalar(self)]
    }
}

impl IntoBatch for Value {
    fn into_batch(self) -> Vec<Value> {
        vec![self]
    }
}

impl IntoBatch for Vec<f64> {
    fn into_batch(self) -> Vec<Value> {
        self.into_iter().map(Value::Scalar).collect()
    }
}

impl IntoBatch for &'_ [f64] {
    fn into_batch(self) -> Vec<Value> {
        self.iter().copied().map(Value::Scalar).collect()
    }
}

impl<const N: usize> IntoBatch for [f64; N] {
    fn into_batch(self) -> Vec<Value> {
        self.into_iter().map(Value::Scalar).collect()
    }
}

impl IntoBatch for Vec<Value> {
    fn into_batch(self) -> Vec<Value> {
        self
    }
}

impl Graph {
    /// Fits `source`'s accumulator with one sample, or (via
    /// [`IntoBatch`]) a batch of them processed as a sequence of
    /// single-sample fits. Under eager/partial, each sample in the batch
    /// triggers its own propagation wave; under lazy, descendants are
    /// marked dirty once the whole batch has been absorbed.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::UnknownVertex`] if `source` does not exist;
    /// [`crate::errors::AccumulatorError`] if any sample is rejected, in
    /// which case earlier samples in the batch remain committed and the
    /// remainder of the batch is not processed (§7).
    #[instrument(level = "debug", skip(self, sample), fields(strategy = ?self.strategy()))]
    pub fn fit(&mut self, source: impl Into<VertexId>, sample: impl IntoBatch) -> Result<(), FitError> {
        let source = source.into();
        if !self.vertices.contains_key(&source) {
            return Err(FitError::Graph(self.unknown_vertex(&source)));
        }
        let batch = sample.into_batch();
        match self.strategy() {
            Strategy::Lazy => self.fit_lazy_one(&source, batch),
            Strategy::Eager | Strategy::Partial => self.fit_propagating_one(&source, batch),
        }
    }

    /// Fits multiple sources at once. Each source's accumulator absorbs
    /// its batch first, in iteration order (for deterministic per-source
    /// observer sequencing), then a single combined propagation wave
    /// visits every shared descendant exactly once (§4.7). When a source
    /// is given a multi-sample batch, the wave's raw payload for that
    /// source is the *last* sample absorbed — see `DESIGN.md` for why
    /// the spec's per-mapping-entry wave doesn't extend cleanly to
    /// differing batch lengths across sources.
    ///
    /// # Errors
    ///
    /// See [`Graph::fit`]; additionally, all sources are validated to
    /// exist before any accumulator is touched.
    pub fn fit_many<S, B>(&mut self, sources: impl IntoIterator<Item = (S, B)>) -> Result<(), FitError>
    where
        S: Into<VertexId>,
        B: IntoBatch,
    {
        let entries: Vec<(VertexId, Vec<Value>)> =
            sources.into_iter().map(|(s, b)| (s.into(), b.into_batch())).collect();
        for (source, _) in &entries {
            if !self.vertices.contains_key(source) {
                return Err(FitError::Graph(self.unknown_vertex(source)));
            }
        }

        if self.strategy() == Strategy::Lazy {
            for (source, batch) in entries {
                self.fit_lazy_one(&source, batch)?;
            }
            return Ok(());
        }

        let mut wave_inputs = WaveInputs::new();
        let mut updated_sources = Vec::with_capacity(entries.len());
        for (source, batch) in entries {
            for sample in batch {
                let new_value = self.fit_and_cache(&source, &sample).map_err(FitError::Accumulator)?;
                self.notify_observers(&source, &new_value, Some(&sample));
                wave_inputs.insert(source.clone(), sample);
            }
            updated_sources.push(source);
        }
        self.propagate_wave(&updated_sources, &mut wave_inputs)
    }

    fn fit_propagating_one(&mut self, source: &VertexId, batch: Vec<Value>) -> Result<(), FitError> {
        for sample in batch {
            let new_value = self.fit_and_cache(source, &sample).map_err(FitError::Accumulator)?;
            self.notify_observers(source, &new_value, Some(&sample));
            let mut wave_inputs = WaveInputs::new();
            wave_inputs.insert(source.clone(), sample);
            self.propagate_wave(&[source.clone()], &mut wave_inputs)?;
        }
        Ok(())
    }

    fn fit_lazy_one(&mut self, source: &VertexId, batch: Vec<Value>) -> Result<(), FitError> {
        for sample in batch {
            let new_value = self.fit_and_cache(source, &sample).map_err(FitError::Accumulator)?;
            self.notify_observers(source, &new_value, Some(&sample));
        }
        self.mark_descendants_dirty(source);
        Ok(())
    }
}
