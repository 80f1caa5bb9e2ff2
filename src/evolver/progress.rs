//! Top-scorer bookkeeping for one run.

use crate::chromosome::{Chromosome, Gene, Score};
use std::collections::HashSet;

/// What the evolver has learned so far in the current run.
///
/// Holds the best score seen, every distinct chromosome that achieved it,
/// and the number of generations scored. Observers receive a shared
/// reference after each generation.
#[derive(Debug, Clone, Default)]
pub struct EvolutionProgress {
    top_score: Option<Score>,
    top_scorers: Vec<Chromosome>,
    seen: HashSet<Vec<Gene>>,
    generations_run: usize,
}

impl EvolutionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score across every generation so far.
    pub fn top_score(&self) -> Option<Score> {
        self.top_score
    }

    /// Distinct chromosomes that scored [`top_score`](Self::top_score), in
    /// the order they were first seen. They may span several generations.
    pub fn top_scorers(&self) -> &[Chromosome] {
        &self.top_scorers
    }

    /// Number of generations scored so far.
    pub fn generations_run(&self) -> usize {
        self.generations_run
    }

    /// Folds one scored population into the bookkeeping and counts it as a
    /// generation. Returns the top score so far.
    ///
    /// A strictly higher score clears the top scorers; chromosomes matching
    /// the current top score are added once each. Unscored individuals are
    /// ignored.
    pub(crate) fn record_generation(&mut self, population: &[Chromosome]) -> Option<Score> {
        self.generations_run += 1;

        let Some(generation_top) = population.iter().filter_map(Chromosome::fitness).max() else {
            return self.top_score;
        };

        match self.top_score {
            Some(top) if generation_top < top => return self.top_score,
            Some(top) if generation_top == top => {}
            _ => {
                self.top_score = Some(generation_top);
                self.top_scorers.clear();
                self.seen.clear();
            }
        }

        for chromosome in population {
            if chromosome.fitness() == Some(generation_top)
                && self.seen.insert(chromosome.genes().to_vec())
            {
                self.top_scorers.push(chromosome.clone());
            }
        }
        self.top_score
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
