//! Generation producers.
//!
//! A producer owns the breeding rules for one chromosome [`Representation`].
//! It synthesizes the random initial population and derives each child
//! population from its scored parent in three phases:
//!
//! 1. **Replication**: the parent is ranked, its lowest scorers are dropped,
//!    the top scorers are replicated, and the single best is reserved in the
//!    last slot
//! 2. **Crossover**: applied to random individuals, never the last slot
//! 3. **Mutation**: applied to random individuals, never the last slot
//!
//! # Variants
//!
//! - [`FixedSetProducer`]: fixed length, no duplicate genes
//! - [`FixedBagProducer`]: fixed length, duplicates allowed
//! - [`VariableSetProducer`]: bounded length, no duplicate genes
//!
//! [`ProducerFactory`] maps configuration facts to a variant and
//! [`GenerationProducer`] dispatches over the three.

mod factory;
mod fixed_bag;
mod fixed_set;
pub mod operators;
mod params;
pub mod replication;
mod variable_set;

pub use factory::{ChromosomeLayout, ProducerFactory, ProducerKey};
pub use fixed_bag::FixedBagProducer;
pub use fixed_set::FixedSetProducer;
pub use params::ProducerParams;
pub use variable_set::VariableSetProducer;

use crate::chromosome::{Chromosome, Representation};
use crate::error::Result;
use rand::Rng;

/// A producer for one of the three representations.
#[derive(Debug, Clone)]
pub enum GenerationProducer {
    FixedSet(FixedSetProducer),
    FixedBag(FixedBagProducer),
    VariableSet(VariableSetProducer),
}

impl GenerationProducer {
    /// Builds the producer for `representation`, validating `params`.
    pub fn new(representation: Representation, params: ProducerParams) -> Result<Self> {
        Ok(match representation {
            Representation::FixedSet => Self::FixedSet(FixedSetProducer::new(params)?),
            Representation::FixedBag => Self::FixedBag(FixedBagProducer::new(params)?),
            Representation::VariableSet => Self::VariableSet(VariableSetProducer::new(params)?),
        })
    }

    pub fn representation(&self) -> Representation {
        match self {
            Self::FixedSet(_) => Representation::FixedSet,
            Self::FixedBag(_) => Representation::FixedBag,
            Self::VariableSet(_) => Representation::VariableSet,
        }
    }

    pub fn params(&self) -> &ProducerParams {
        match self {
            Self::FixedSet(p) => p.params(),
            Self::FixedBag(p) => p.params(),
            Self::VariableSet(p) => p.params(),
        }
    }

    /// `size` fresh, unscored, shape-valid chromosomes.
    pub fn create_initial_generation<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        match self {
            Self::FixedSet(p) => p.create_initial_generation(size, rng),
            Self::FixedBag(p) => p.create_initial_generation(size, rng),
            Self::VariableSet(p) => p.create_initial_generation(size, rng),
        }
    }

    /// Derives the next population from a scored parent of the same size.
    pub fn next_generation<R: Rng>(&self, parent: Vec<Chromosome>, rng: &mut R) -> Vec<Chromosome> {
        log::trace!(
            "producing {} child population of {}",
            self.representation(),
            parent.len()
        );
        match self {
            Self::FixedSet(p) => p.next_generation(parent, rng),
            Self::FixedBag(p) => p.next_generation(parent, rng),
            Self::VariableSet(p) => p.next_generation(parent, rng),
        }
    }
}

/// Random index in `0..len - 1`, leaving out the reserved last slot.
fn pick_eligible<R: Rng>(len: usize, rng: &mut R) -> Option<usize> {
    if len < 2 {
        return None;
    }
    Some(rng.random_range(0..len - 1))
}

/// Two distinct random indices in `0..len - 1`.
fn pick_eligible_pair<R: Rng>(len: usize, rng: &mut R) -> Option<(usize, usize)> {
    if len < 3 {
        return None;
    }
    let eligible = len - 1;
    let i = rng.random_range(0..eligible);
    let mut j = rng.random_range(0..eligible - 1);
    if j >= i {
        j += 1;
    }
    Some((i, j))
}
