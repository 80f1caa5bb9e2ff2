//! Fixed-length chromosomes with repeated genes allowed.

use super::operators::{prefix_crossover, random_gene, replace_mutation};
use super::params::ProducerParams;
use super::{pick_eligible, pick_eligible_pair, replication::replicate};
use crate::chromosome::{Chromosome, Representation};
use crate::error::Result;
use rand::Rng;

/// Producer for [`Representation::FixedBag`].
///
/// Genes are drawn with replacement, so two parents can trade prefixes and
/// a mutation may write any alphabet value.
#[derive(Debug, Clone)]
pub struct FixedBagProducer {
    params: ProducerParams,
}

impl FixedBagProducer {
    pub fn new(params: ProducerParams) -> Result<Self> {
        params.validate(Representation::FixedBag)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ProducerParams {
        &self.params
    }

    pub fn create_initial_generation<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        (0..size)
            .map(|_| {
                let genes = (0..self.params.max_length)
                    .map(|_| random_gene(&self.params.alphabet, rng))
                    .collect();
                Chromosome::new(genes)
            })
            .collect()
    }

    /// Replication, then prefix crossovers between pairs, then single-gene
    /// replacements.
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
            let Some((i, j)) = pick_eligible_pair(population.len(), rng) else {
                return;
            };
            let (lo, hi) = (i.min(j), i.max(j));
            let (head, tail) = population.split_at_mut(hi);
            prefix_crossover(head[lo].genes_mut(), tail[0].genes_mut(), rng);
        }
    }

    fn do_mutations<R: Rng>(&self, population: &mut [Chromosome], rng: &mut R) {
        for _ in 0..self.params.mutations_per_gen {
            let Some(idx) = pick_eligible(population.len(), rng) else {
                return;
            };
            replace_mutation(population[idx].genes_mut(), &self.params.alphabet, rng);
        }
    }
}
