//! Generic genetic-algorithm engine over integer-gene chromosomes.
//!
//! The caller supplies only a fitness function; the engine evolves
//! populations of chromosomes whose genes are small integers drawn from a
//! fixed alphabet `0..alphabet_size`.
//!
//! - **Chromosomes**: gene vectors with an optional fitness score, in one of
//!   three representations (fixed-length set, fixed-length bag,
//!   variable-length set).
//! - **Producers**: per-representation breeding rules (elitist
//!   replication, crossover, mutation) that never break the
//!   representation's invariants.
//! - **Evolver**: the generation loop, with observer notifications, early
//!   stopping, and top-scorer tracking.
//!
//! # Example
//!
//! ```
//! use u_genetic::chromosome::{Chromosome, Score};
//! use u_genetic::error::EvaluatorError;
//! use u_genetic::evolver::{Evolver, EvolverConfig};
//!
//! let config = EvolverConfig::for_genes(5, 5, 5)
//!     .with_population_size(20)
//!     .with_generations(100)
//!     .with_replication(3, 2)
//!     .with_stop_at_score(5)
//!     .with_seed(7);
//!
//! let mut evolver = Evolver::new(config).with_fitness_tester(
//!     |c: &Chromosome| -> Result<Score, EvaluatorError> {
//!         Ok(c.genes().iter().enumerate().filter(|&(i, &g)| i == g as usize).count() as Score)
//!     },
//! );
//!
//! let outcome = evolver.evolve().unwrap();
//! assert!(outcome.top_score <= 5);
//! ```

pub mod chromosome;
pub mod error;
pub mod evolver;
pub mod generation;
pub mod producer;
pub mod random;
