//! Fixed-length chromosomes without repeated genes.

use super::operators::{rotate_crossover, sample_distinct, swap_mutation};
use super::params::ProducerParams;
use super::{pick_eligible, replication::replicate};
use crate::chromosome::{Chromosome, Representation};
use crate::error::Result;
use rand::Rng;

/// Producer for [`Representation::FixedSet`].
///
/// Every chromosome holds `max_length` distinct alphabet values. Two such
/// chromosomes cannot exchange genes without risking duplicates, so
/// crossover is a self-rotation and mutation swaps two positions.
#[derive(Debug, Clone)]
pub struct FixedSetProducer {
    params: ProducerParams,
}

impl FixedSetProducer {
    /// Validates `params` for this shape and builds the producer.
    pub fn new(params: ProducerParams) -> Result<Self> {
        params.validate(Representation::FixedSet)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ProducerParams {
        &self.params
    }

    /// `size` chromosomes, each a random draw of `max_length` distinct genes.
    pub fn create_initial_generation<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        (0..size)
            .map(|_| {
                Chromosome::new(sample_distinct(
                    &self.params.alphabet,
                    self.params.max_length,
                    rng,
                ))
            })
            .collect()
    }

    /// Replication, then self-crossovers, then swap mutations.
    pub fn next_generation<R: Rng>(
        &self,
        mut parent: Vec<Chromosome>,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let mut next = replicate(&mut parent, &self.params);
        self.do_crossovers(&mut next, rng);
        self.do_mutations(&mut next, rng);
        next
    }

    fn do_crossovers<R: Rng>(&self, population: &mut [Chromosome], rng: &mut R) {
        for _ in 0..self.params.crossovers_per_gen {
            let Some(idx) = pick_eligible(population.len(), rng) else {
                return;
            };
            rotate_crossover(population[idx].genes_mut(), rng);
        }
    }

    fn do_mutations<R: Rng>(&self, population: &mut [Chromosome], rng: &mut R) {
        for _ in 0..self.params.mutations_per_gen {
            let Some(idx) = pick_eligible(population.len(), rng) else {
                return;
            };
            swap_mutation(population[idx].genes_mut(), rng);
        }
    }
}
