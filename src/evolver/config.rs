//! Evolver configuration.
//!
//! [`EvolverConfig`] holds every parameter the generation loop reads. It is
//! fixed once [`Evolver::evolve`](super::Evolver::evolve) starts.

use crate::chromosome::{Gene, Representation, Score};
use crate::error::{config_err, Result};
use crate::producer::{ChromosomeLayout, ProducerFactory, ProducerKey, ProducerParams};

/// Configuration for the [`Evolver`](super::Evolver).
///
/// The problem-shape fields (`alphabet_size`, `min_length`, `max_length`)
/// default to zero, so a default configuration does not validate until they
/// are set.
///
/// # Builder Pattern
///
/// ```
/// use u_genetic::evolver::EvolverConfig;
///
/// let config = EvolverConfig::for_genes(8, 8, 8)
///     .with_population_size(40)
///     .with_generations(200)
///     .with_replication(4, 2)
///     .with_stop_at_score(28)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolverConfig {
    /// How genes are arranged. Only `Linear` has producers.
    pub layout: ChromosomeLayout,

    /// Number of distinct gene values; genes range over `0..alphabet_size`.
    pub alphabet_size: usize,

    /// Minimum genes per chromosome.
    pub min_length: usize,

    /// Maximum genes per chromosome. Equal to `min_length` for fixed length.
    pub max_length: usize,

    /// Whether a gene value may repeat within one chromosome.
    pub allow_duplicates: bool,

    /// Individuals per generation.
    pub population_size: usize,

    /// Mutation operations per generation.
    pub mutations_per_gen: usize,

    /// Crossover operations per generation.
    pub crossovers_per_gen: usize,

    /// Top scorers replicated into each new generation.
    pub num_to_replicate: usize,

    /// Appearances of each replicated top scorer, counting its own slot.
    pub replications_each: usize,

    /// Generation budget, including the final generation.
    pub num_generations: usize,

    /// Stop as soon as the top score reaches this value.
    ///
    /// `None` disables early stopping (the default).
    pub stop_at_score: Option<Score>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolverConfig {
    fn default() -> Self {
        Self {
            layout: ChromosomeLayout::Linear,
            alphabet_size: 0,
            min_length: 0,
            max_length: 0,
            allow_duplicates: false,
            population_size: 100,
            mutations_per_gen: 10,
            crossovers_per_gen: 10,
            num_to_replicate: 5,
            replications_each: 2,
            num_generations: 500,
            stop_at_score: None,
            seed: None,
        }
    }
}

impl EvolverConfig {
    /// Default breeding parameters over `0..alphabet_size` with the given
    /// length bounds.
    pub fn for_genes(alphabet_size: usize, min_length: usize, max_length: usize) -> Self {
        Self {
            alphabet_size,
            min_length,
            max_length,
            ..Self::default()
        }
    }

    /// Sets the gene layout.
    pub fn with_layout(mut self, layout: ChromosomeLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the number of distinct gene values.
    pub fn with_alphabet_size(mut self, n: usize) -> Self {
        self.alphabet_size = n;
        self
    }

    /// Sets the length bounds. Equal bounds give fixed-length chromosomes.
    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Sets whether a gene value may repeat within a chromosome.
    pub fn with_duplicates_allowed(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Sets the number of individuals per generation.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation operations per generation.
    pub fn with_mutations_per_gen(mut self, n: usize) -> Self {
        self.mutations_per_gen = n;
        self
    }

    /// Sets the crossover operations per generation.
    pub fn with_crossovers_per_gen(mut self, n: usize) -> Self {
        self.crossovers_per_gen = n;
        self
    }

    /// Sets how many top scorers are replicated and how often each appears.
    pub fn with_replication(mut self, num_to_replicate: usize, replications_each: usize) -> Self {
        self.num_to_replicate = num_to_replicate;
        self.replications_each = replications_each;
        self
    }

    /// Sets the generation budget, including the final generation.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Enables early stopping at `score`.
    pub fn with_stop_at_score(mut self, score: Score) -> Self {
        self.stop_at_score = Some(score);
        self
    }

    /// Disables early stopping.
    pub fn without_stop_at_score(mut self) -> Self {
        self.stop_at_score = None;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Key the producer factory is queried with.
    pub fn producer_key(&self) -> ProducerKey {
        ProducerKey::from_bounds(
            self.min_length,
            self.max_length,
            self.allow_duplicates,
            self.layout,
        )
    }

    /// Breeding parameters over the alphabet `0..alphabet_size`.
    pub fn producer_params(&self) -> ProducerParams {
        ProducerParams::with_alphabet_size(self.alphabet_size)
            .with_length(self.min_length, self.max_length)
            .with_replication(self.num_to_replicate, self.replications_each)
            .with_crossovers(self.crossovers_per_gen)
            .with_mutations(self.mutations_per_gen)
    }

    /// The representation this configuration selects.
    pub fn representation(&self) -> Result<Representation> {
        ProducerFactory::lookup(self.producer_key())
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::Configuration`](crate::error::Error::Configuration)
    /// describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet_size == 0 {
            return Err(config_err("alphabet_size must be at least 1"));
        }
        if self.alphabet_size > usize::from(Gene::MAX) + 1 {
            return Err(config_err(format!(
                "alphabet_size ({}) exceeds the {} representable gene values",
                self.alphabet_size,
                usize::from(Gene::MAX) + 1
            )));
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
        if self.num_generations == 0 {
            return Err(config_err("num_generations must be at least 1"));
        }
        if self.num_to_replicate == 0 {
            return Err(config_err("num_to_replicate must be at least 1"));
        }
        if self.replications_each == 0 {
            return Err(config_err("replications_each must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(config_err("population_size must be at least 1"));
        }

        let representation = self.representation()?;
        let params = self.producer_params();
        params.validate(representation)?;
        params.validate_population(self.population_size)
    }
}
