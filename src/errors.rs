//! Submodule defining the error taxonomy for the graph crate.

mod accumulator_error;
mod fit_error;
mod graph_error;

pub use accumulator_error::AccumulatorError;
pub use fit_error::FitError;
pub use graph_error::GraphError;
