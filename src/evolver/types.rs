//! Interfaces between the evolver and its collaborators.
//!
//! The evolver consumes a [`FitnessTester`] and notifies
//! [`EvolutionObserver`]s. Both are implemented for plain closures so small
//! problems need no wrapper types.

use super::progress::EvolutionProgress;
use crate::chromosome::{Chromosome, Score};
use crate::error::EvaluatorError;
use crate::generation::Generation;

/// Assigns a fitness score to a chromosome.
///
/// Called once per individual per generation, sequentially in population
/// order. The score should depend only on the genes. An error aborts the
/// current [`evolve`](super::Evolver::evolve) call and is returned to its
/// caller unchanged.
///
/// # Implementing
///
/// ```
/// use u_genetic::chromosome::{Chromosome, Score};
/// use u_genetic::error::EvaluatorError;
/// use u_genetic::evolver::FitnessTester;
///
/// struct Ascending;
///
/// impl FitnessTester for Ascending {
///     fn score(&self, chromosome: &Chromosome) -> Result<Score, EvaluatorError> {
///         let n = chromosome.genes().windows(2).filter(|w| w[0] < w[1]).count();
///         Ok(n as Score)
///     }
/// }
/// ```
pub trait FitnessTester: Send + Sync {
    fn score(&self, chromosome: &Chromosome) -> Result<Score, EvaluatorError>;
}

impl<F> FitnessTester for F
where
    F: Fn(&Chromosome) -> Result<Score, EvaluatorError> + Send + Sync,
{
    fn score(&self, chromosome: &Chromosome) -> Result<Score, EvaluatorError> {
        self(chromosome)
    }
}

/// Receives every scored generation.
///
/// Called synchronously on the evolving thread, once per generation, in
/// registration order. A slow observer stalls the run.
pub trait EvolutionObserver: Send + Sync {
    /// A generation has been created and scored.
    ///
    /// - `top_score_so_far`: best score across all generations of this run
    /// - `is_last_generation`: no generation follows this one
    /// - `progress`: read-only view of the evolver's bookkeeping
    fn on_generation_created(
        &self,
        generation: &Generation,
        top_score_so_far: Score,
        is_last_generation: bool,
        progress: &EvolutionProgress,
    );
}

impl<F> EvolutionObserver for F
where
    F: Fn(&Generation, Score, bool, &EvolutionProgress) + Send + Sync,
{
    fn on_generation_created(
        &self,
        generation: &Generation,
        top_score_so_far: Score,
        is_last_generation: bool,
        progress: &EvolutionProgress,
    ) {
        self(generation, top_score_so_far, is_last_generation, progress)
    }
}
