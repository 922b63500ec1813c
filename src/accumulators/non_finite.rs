//! The one error kind the reference accumulators can raise.

use std::error::Error as StdError;
use std::fmt;

/// Raised by a reference accumulator when asked to absorb a non-finite
/// (NaN or infinite) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonFiniteSample(pub f64);

impl fmt::Display for NonFiniteSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample {} is not finite", self.0)
    }
}

impl StdError for NonFiniteSample {}
