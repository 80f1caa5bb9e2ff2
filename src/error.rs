//! Error types.
//!
//! Every fallible operation in the crate returns [`Result`], whose error is
//! the single [`Error`] enum. Configuration problems are always reported
//! before the first generation is produced; evaluator failures are carried
//! through unchanged.

use thiserror::Error;

/// Boxed error produced by a fitness evaluator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete parameters. Raised before any generation exists.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A gene index outside `0..len`.
    #[error("gene index {index} out of bounds for chromosome of length {len}")]
    GeneIndex { index: usize, len: usize },

    /// The fitness evaluator failed; the run was aborted.
    #[error("fitness evaluation failed: {0}")]
    Evaluator(#[from] EvaluatorError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`FitnessTester`](crate::evolver::FitnessTester).
///
/// Wraps whatever error the evaluator produced. The original error is
/// reachable through [`std::error::Error::source`] or
/// [`into_inner`](EvaluatorError::into_inner).
#[derive(Error, Debug)]
#[error("{inner}")]
pub struct EvaluatorError {
    #[source]
    inner: BoxError,
}

impl EvaluatorError {
    /// Wraps an arbitrary evaluator error.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            inner: error.into(),
        }
    }

    /// Shorthand for an evaluator error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(message.into())
    }

    /// Returns the wrapped error.
    pub fn into_inner(self) -> BoxError {
        self.inner
    }

    /// Borrows the wrapped error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

pub(crate) fn config_err(message: impl Into<String>) -> Error {
    Error::Configuration(message.into())
}
