//! Scored population snapshots.

use crate::chromosome::{Chromosome, Score};

/// One scored population together with its ordinal number.
///
/// The top score is computed once at construction from the individuals and
/// never changes afterwards; a `Generation` offers no mutable access to its
/// population.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation {
    individuals: Vec<Chromosome>,
    number: usize,
    top_score: Option<Score>,
}

impl Generation {
    /// Wraps a population as generation `number` (1-based).
    pub fn new(individuals: Vec<Chromosome>, number: usize) -> Self {
        let top_score = individuals.iter().filter_map(Chromosome::fitness).max();
        Self {
            individuals,
            number,
            top_score,
        }
    }

    pub fn individuals(&self) -> &[Chromosome] {
        &self.individuals
    }

    /// Ordinal number of this generation, starting at 1.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Highest fitness in the population, or `None` if nothing is scored.
    pub fn top_score(&self) -> Option<Score> {
        self.top_score
    }

    /// The first individual holding the top score.
    pub fn best(&self) -> Option<&Chromosome> {
        let top = self.top_score?;
        self.individuals.iter().find(|c| c.fitness() == Some(top))
    }

    /// Individuals ordered best-first, ties in population order.
    pub fn ranked(&self) -> Vec<&Chromosome> {
        let mut ranked: Vec<&Chromosome> = self.individuals.iter().collect();
        ranked.sort_by(|a, b| Chromosome::compare_by_fitness(a, b));
        ranked
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Releases the population to its owner.
    pub fn into_individuals(self) -> Vec<Chromosome> {
        self.individuals
    }
}
