//! Variable-length chromosomes without repeated genes.

use super::operators::{
    delete_mutation, insert_mutation, rotate_crossover, sample_distinct, swap_mutation,
};
use super::params::ProducerParams;
use super::{pick_eligible, replication::replicate};
use crate::chromosome::{Chromosome, Gene, Representation};
use crate::error::Result;
use rand::Rng;

/// How a single mutation changes a variable-length chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    KeepLength,
    Shrink,
    Grow,
}

/// Producer for [`Representation::VariableSet`].
///
/// Chromosome lengths range over `[min_length, max_length]`. Crossover is a
/// self-rotation; mutation either swaps two genes, deletes one, or inserts
/// a value not yet used, restricted to whichever keeps the length in range.
#[derive(Debug, Clone)]
pub struct VariableSetProducer {
    params: ProducerParams,
}

impl VariableSetProducer {
    pub fn new(params: ProducerParams) -> Result<Self> {
        params.validate(Representation::VariableSet)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ProducerParams {
        &self.params
    }

    /// `size` chromosomes with lengths uniform in `[min_length, max_length]`.
    pub fn create_initial_generation<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        (0..size)
            .map(|_| {
                let len = rng.random_range(self.params.min_length..=self.params.max_length);
                Chromosome::new(sample_distinct(&self.params.alphabet, len, rng))
            })
            .collect()
    }

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
            self.mutate(population[idx].genes_mut(), rng);
        }
    }

    fn mutate<R: Rng>(&self, genes: &mut Vec<Gene>, rng: &mut R) {
        let kind = self.choose_mutation(genes.len(), rng);
        log::trace!("variable-set mutation {kind:?} on length {}", genes.len());
        match kind {
            MutationKind::KeepLength => swap_mutation(genes, rng),
            MutationKind::Shrink => delete_mutation(genes, rng),
            MutationKind::Grow => {
                insert_mutation(genes, &self.params.alphabet, rng);
            }
        }
    }

    /// Picks uniformly among the kinds that keep `len` within bounds.
    fn choose_mutation<R: Rng>(&self, len: usize, rng: &mut R) -> MutationKind {
        let mut kinds = [MutationKind::KeepLength; 3];
        let mut count = 1;
        if len > self.params.min_length {
            kinds[count] = MutationKind::Shrink;
            count += 1;
        }
        if len < self.params.max_length && len < self.params.alphabet.len() {
            kinds[count] = MutationKind::Grow;
            count += 1;
        }
        kinds[rng.random_range(0..count)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    const ALPHABET: usize = 10;
    const MIN: usize = 2;
    const MAX: usize = 6;

    fn producer() -> VariableSetProducer {
        VariableSetProducer::new(
            ProducerParams::with_alphabet_size(ALPHABET)
                .with_length(MIN, MAX)
                .with_replication(2, 2)
                .with_crossovers(3)
                .with_mutations(10),
        )
        .unwrap()
    }

    fn is_valid(c: &Chromosome) -> bool {
        Representation::VariableSet.is_valid(c.genes(), ALPHABET, MIN, MAX)
    }

    fn score_all(pop: &mut [Chromosome]) {
        for c in pop.iter_mut() {
            c.set_fitness(c.len() as i32);
        }
    }

    #[test]
    fn test_initial_lengths_cover_range() {
        let mut rng = create_rng(42);
        let pop = producer().create_initial_generation(200, &mut rng);
        assert!(pop.iter().all(is_valid));
        for len in MIN..=MAX {
            assert!(pop.iter().any(|c| c.len() == len), "no chromosome of length {len}");
        }
    }

    #[test]
    fn test_next_generation_stays_valid() {
        let mut rng = create_rng(42);
        let p = producer();
        let mut pop = p.create_initial_generation(15, &mut rng);
        for _ in 0..40 {
            score_all(&mut pop);
            pop = p.next_generation(pop, &mut rng);
            assert_eq!(pop.len(), 15);
            assert!(pop.iter().all(is_valid), "invalid chromosome in {pop:?}");
        }
    }

    #[test]
    fn test_choose_mutation_respects_bounds() {
        let mut rng = create_rng(9);
        let p = producer();
        for _ in 0..200 {
            assert_ne!(p.choose_mutation(MIN, &mut rng), MutationKind::Shrink);
            assert_ne!(p.choose_mutation(MAX, &mut rng), MutationKind::Grow);
        }
    }

    #[test]
    fn test_choose_mutation_reaches_all_kinds() {
        let mut rng = create_rng(9);
        let p = producer();
        let kinds: Vec<MutationKind> = (0..300).map(|_| p.choose_mutation(4, &mut rng)).collect();
        assert!(kinds.contains(&MutationKind::KeepLength));
        assert!(kinds.contains(&MutationKind::Shrink));
        assert!(kinds.contains(&MutationKind::Grow));
    }

    #[test]
    fn test_fixed_bounds_only_keep_length() {
        let mut rng = create_rng(9);
        let p = VariableSetProducer::new(
            ProducerParams::with_alphabet_size(5).with_length(3, 3),
        )
        .unwrap();
        for _ in 0..50 {
            assert_eq!(p.choose_mutation(3, &mut rng), MutationKind::KeepLength);
        }
    }

    #[test]
    fn test_mutate_never_duplicates() {
        let mut rng = create_rng(42);
        let p = producer();
        let mut genes: Vec<Gene> = vec![3, 7, 1];
        for _ in 0..500 {
            p.mutate(&mut genes, &mut rng);
            assert!(Representation::VariableSet.is_valid(&genes, ALPHABET, MIN, MAX));
        }
    }

    #[test]
    fn test_lengths_drift_when_rewarded() {
        let mut rng = create_rng(5);
        let p = producer();
        let mut pop = p.create_initial_generation(20, &mut rng);
        for _ in 0..60 {
            score_all(&mut pop);
            pop = p.next_generation(pop, &mut rng);
        }
        assert!(pop.iter().any(|c| c.len() == MAX));
    }
}
