//! The evolutionary loop.
//!
//! An [`Evolver`] is configured with an [`EvolverConfig`] and a
//! [`FitnessTester`]. [`Evolver::evolve`] selects a generation producer
//! from the configuration, then repeatedly scores, records, notifies, and
//! breeds until the generation budget is spent or the configured stop score
//! is reached.
//!
//! # Observers
//!
//! [`EvolutionObserver`]s registered on the evolver's [`ObserverRegistry`]
//! see every scored generation. Exactly one call per run carries
//! `is_last_generation == true`.
//!
//! # Top scorers
//!
//! [`EvolutionProgress`] tracks the best score of the run and every distinct
//! chromosome that achieved it, across generations.

mod config;
mod observer;
mod progress;
mod runner;
mod types;

pub use config::EvolverConfig;
pub use observer::{ObserverId, ObserverRegistry};
pub use progress::EvolutionProgress;
pub use runner::{EvolutionOutcome, Evolver, EvolverState};
pub use types::{EvolutionObserver, FitnessTester};
