//! Parameters shared by every producer variant.

use crate::chromosome::{Gene, Representation};
use crate::error::{config_err, Result};
use std::collections::HashSet;

/// Breeding parameters handed to a producer at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerParams {
    /// Distinct gene values a chromosome may contain.
    pub alphabet: Vec<Gene>,

    /// Number of top scorers cloned into the replicated slots.
    pub num_to_replicate: usize,

    /// Total appearances of each top scorer, counting its original slot.
    pub replications_each: usize,

    /// Crossover operations applied per generation.
    pub crossovers_per_gen: usize,

    /// Mutation operations applied per generation.
    pub mutations_per_gen: usize,

    /// Minimum chromosome length (inclusive).
    pub min_length: usize,

    /// Maximum chromosome length (inclusive).
    pub max_length: usize,
}

impl ProducerParams {
    /// Parameters over the alphabet `0..alphabet_size`.
    pub fn with_alphabet_size(alphabet_size: usize) -> Self {
        let alphabet = (0..alphabet_size)
            .map(|g| Gene::try_from(g).unwrap_or(Gene::MAX))
            .collect();
        Self {
            alphabet,
            num_to_replicate: 1,
            replications_each: 1,
            crossovers_per_gen: 0,
            mutations_per_gen: 0,
            min_length: 1,
            max_length: 1,
        }
    }

    pub fn with_replication(mut self, num_to_replicate: usize, replications_each: usize) -> Self {
        self.num_to_replicate = num_to_replicate;
        self.replications_each = replications_each;
        self
    }

    pub fn with_crossovers(mut self, n: usize) -> Self {
        self.crossovers_per_gen = n;
        self
    }

    pub fn with_mutations(mut self, n: usize) -> Self {
        self.mutations_per_gen = n;
        self
    }

    pub fn with_length(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Number of parent slots given up to replicas and the reserved best slot.
    ///
    /// `num_to_replicate × (replications_each − 1) + 1`
    pub fn num_to_drop_from_bottom(&self) -> usize {
        self.num_to_replicate
            .saturating_mul(self.replications_each.saturating_sub(1))
            .saturating_add(1)
    }

    /// Checks the parameters against a representation.
    pub fn validate(&self, representation: Representation) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(config_err("alphabet must not be empty"));
        }
        let distinct: HashSet<Gene> = self.alphabet.iter().copied().collect();
        if distinct.len() != self.alphabet.len() {
            return Err(config_err("alphabet values must be distinct"));
        }
        if self.min_length == 0 {
            return Err(config_err("min_length must be at least 1"));
        }
        if self.min_length > self.max_length {
            return Err(config_err(format!(
                "min_length ({}) must not exceed max_length ({})",
                self.min_length, self.max_length
            )));
        }
        if representation.is_fixed_length() && self.min_length != self.max_length {
            return Err(config_err(format!(
                "{representation} chromosomes need min_length == max_length"
            )));
        }
        if !representation.allows_duplicates() && self.alphabet.len() < self.max_length {
            return Err(config_err(format!(
                "alphabet of {} values cannot fill {representation} chromosomes \
                 of length {} without duplicates",
                self.alphabet.len(),
                self.max_length
            )));
        }
        if self.num_to_replicate == 0 {
            return Err(config_err("num_to_replicate must be at least 1"));
        }
        if self.replications_each == 0 {
            return Err(config_err("replications_each must be at least 1"));
        }
        Ok(())
    }

    /// Checks that a population of `size` can hold the replicated slots.
    pub fn validate_population(&self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(config_err("population_size must be at least 1"));
        }
        if self.num_to_replicate > size {
            return Err(config_err(format!(
                "num_to_replicate ({}) exceeds population_size ({size})",
                self.num_to_replicate
            )));
        }
        let dropped = self.num_to_drop_from_bottom();
        if dropped > size {
            return Err(config_err(format!(
                "replication drops {dropped} individuals but population_size is {size}"
            )));
        }
        Ok(())
    }
}
