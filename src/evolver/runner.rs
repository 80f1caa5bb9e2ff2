//! The generation loop.
//!
//! [`Evolver`] orchestrates the whole run:
//! producer selection → initial population → score → record → notify →
//! next population → repeat, finishing with exactly one generation marked
//! last.

use super::config::EvolverConfig;
use super::observer::{ObserverId, ObserverRegistry};
use super::progress::EvolutionProgress;
use super::types::{EvolutionObserver, FitnessTester};
use crate::chromosome::{Chromosome, Score};
use crate::error::{config_err, Result};
use crate::generation::Generation;
use crate::producer::{GenerationProducer, ProducerFactory};
use crate::random::rng_from_seed;
use rand::Rng;
use std::sync::Arc;

/// Lifecycle of an [`Evolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolverState {
    /// No fitness tester yet, or the configuration does not validate.
    Unconfigured,
    /// Ready to [`evolve`](Evolver::evolve).
    Ready,
    /// Inside `evolve`.
    Running,
    /// A run has finished (normally or with an error).
    Completed,
}

/// Result of an [`Evolver::evolve`] run.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The generation marked last.
    pub final_generation: Generation,

    /// Best score across the whole run.
    pub top_score: Score,

    /// Every distinct chromosome that achieved `top_score`.
    pub top_scorers: Vec<Chromosome>,

    /// Total number of generations scored.
    pub generations_run: usize,

    /// Whether the run stopped because `stop_at_score` was reached.
    pub reached_stop_score: bool,
}

/// Drives the evolutionary loop.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_genetic::chromosome::{Chromosome, Score};
/// use u_genetic::error::EvaluatorError;
/// use u_genetic::evolver::{Evolver, EvolverConfig};
///
/// // reward genes that appear in ascending order
/// let tester = |c: &Chromosome| -> Result<Score, EvaluatorError> {
///     Ok(c.genes().windows(2).filter(|w| w[0] < w[1]).count() as Score)
/// };
///
/// let config = EvolverConfig::for_genes(6, 6, 6)
///     .with_population_size(30)
///     .with_generations(50)
///     .with_replication(3, 2)
///     .with_stop_at_score(5)
///     .with_seed(42);
///
/// let mut evolver = Evolver::new(config).with_fitness_tester(tester);
/// let outcome = evolver.evolve().unwrap();
/// assert!(outcome.generations_run <= 50);
/// assert_eq!(outcome.top_score, evolver.top_score().unwrap());
/// ```
pub struct Evolver {
    config: EvolverConfig,
    tester: Option<Arc<dyn FitnessTester>>,
    observers: Arc<ObserverRegistry>,
    progress: EvolutionProgress,
    running: bool,
    completed: bool,
}

impl std::fmt::Debug for Evolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evolver")
            .field("config", &self.config)
            .field("has_tester", &self.tester.is_some())
            .field("observers", &self.observers)
            .field("progress", &self.progress)
            .field("state", &self.state())
            .finish()
    }
}

impl Evolver {
    pub fn new(config: EvolverConfig) -> Self {
        Self {
            config,
            tester: None,
            observers: Arc::new(ObserverRegistry::new()),
            progress: EvolutionProgress::new(),
            running: false,
            completed: false,
        }
    }

    /// Sets the fitness tester, builder style.
    pub fn with_fitness_tester<T>(mut self, tester: T) -> Self
    where
        T: FitnessTester + 'static,
    {
        self.set_fitness_tester(tester);
        self
    }

    /// Sets or replaces the fitness tester.
    pub fn set_fitness_tester<T>(&mut self, tester: T)
    where
        T: FitnessTester + 'static,
    {
        self.tester = Some(Arc::new(tester));
    }

    pub fn config(&self) -> &EvolverConfig {
        &self.config
    }

    /// Replaces the configuration used by the next run.
    pub fn set_config(&mut self, config: EvolverConfig) {
        self.config = config;
    }

    /// Shared handle to the observer list.
    ///
    /// Observers may keep this handle to register or unregister observers
    /// from inside their own callbacks.
    pub fn observers(&self) -> Arc<ObserverRegistry> {
        Arc::clone(&self.observers)
    }

    pub fn add_observer(&self, observer: Arc<dyn EvolutionObserver>) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Best score of the current or most recent run.
    pub fn top_score(&self) -> Option<Score> {
        self.progress.top_score()
    }

    /// Distinct chromosomes that achieved [`top_score`](Self::top_score).
    pub fn top_scorers(&self) -> &[Chromosome] {
        self.progress.top_scorers()
    }

    /// Generations scored in the current or most recent run.
    pub fn generations_run(&self) -> usize {
        self.progress.generations_run()
    }

    pub fn progress(&self) -> &EvolutionProgress {
        &self.progress
    }

    /// Checks everything `evolve` needs, reporting the first problem.
    pub fn check_ready(&self) -> Result<()> {
        if self.tester.is_none() {
            return Err(config_err("no fitness tester has been set"));
        }
        self.config.validate()
    }

    /// Whether [`check_ready`](Self::check_ready) passes.
    pub fn is_ready(&self) -> bool {
        self.check_ready().is_ok()
    }

    /// Current lifecycle state.
    ///
    /// A finished evolver whose tester or configuration has since become
    /// invalid reports `Unconfigured`, not `Completed`.
    pub fn state(&self) -> EvolverState {
        if self.running {
            EvolverState::Running
        } else if !self.is_ready() {
            EvolverState::Unconfigured
        } else if self.completed {
            EvolverState::Completed
        } else {
            EvolverState::Ready
        }
    }

    /// Runs the generation loop to completion.
    ///
    /// Returns [`Error::Configuration`](crate::error::Error::Configuration)
    /// before producing anything if the evolver is not ready, and
    /// [`Error::Evaluator`](crate::error::Error::Evaluator) if the fitness
    /// tester fails mid-run. Calling again after completion starts a fresh
    /// run. A configuration error discards the previous run's progress.
    pub fn evolve(&mut self) -> Result<EvolutionOutcome> {
        if let Err(err) = self.check_ready() {
            self.progress.reset();
            self.completed = false;
            return Err(err);
        }
        let tester = self
            .tester
            .clone()
            .ok_or_else(|| config_err("no fitness tester has been set"))?;
        let producer =
            ProducerFactory::build(self.config.producer_key(), self.config.producer_params())?;
        let mut rng = rng_from_seed(self.config.seed);

        log::info!(
            "evolving {} population of {} for up to {} generations",
            producer.representation(),
            self.config.population_size,
            self.config.num_generations
        );

        self.progress.reset();
        self.running = true;
        self.completed = false;
        let result = self.run_loop(&producer, tester.as_ref(), &mut rng);
        self.running = false;
        self.completed = true;

        match &result {
            Ok(outcome) => log::info!(
                "evolution finished after {} generations, top score {}",
                outcome.generations_run,
                outcome.top_score
            ),
            Err(err) => log::warn!(
                "evolution aborted after {} generations: {err}",
                self.progress.generations_run()
            ),
        }
        result
    }

    fn run_loop<R: Rng>(
        &mut self,
        producer: &GenerationProducer,
        tester: &dyn FitnessTester,
        rng: &mut R,
    ) -> Result<EvolutionOutcome> {
        let stop_at = self.config.stop_at_score;
        let mut population = producer.create_initial_generation(self.config.population_size, rng);

        for _ in 1..self.config.num_generations {
            let (generation, top) = self.score_generation(population, tester)?;
            let is_last = stop_at.is_some_and(|target| top >= target);
            self.observers.notify(&generation, top, is_last, &self.progress);
            if is_last {
                return Ok(self.outcome(generation, top, true));
            }
            population = producer.next_generation(generation.into_individuals(), rng);
        }

        let (generation, top) = self.score_generation(population, tester)?;
        let reached = stop_at.is_some_and(|target| top >= target);
        self.observers.notify(&generation, top, true, &self.progress);
        Ok(self.outcome(generation, top, reached))
    }

    /// Scores every individual in order, records the result, and wraps the
    /// population as the next numbered generation.
    fn score_generation(
        &mut self,
        mut population: Vec<Chromosome>,
        tester: &dyn FitnessTester,
    ) -> Result<(Generation, Score)> {
        for chromosome in population.iter_mut() {
            let score = tester.score(chromosome)?;
            chromosome.set_fitness(score);
        }

        let top = self
            .progress
            .record_generation(&population)
            .ok_or_else(|| config_err("cannot evolve an empty population"))?;
        let generation = Generation::new(population, self.progress.generations_run());

        log::debug!(
            "generation {}: best {:?}, top so far {}",
            generation.number(),
            generation.top_score(),
            top
        );
        Ok((generation, top))
    }

    fn outcome(
        &self,
        final_generation: Generation,
        top_score: Score,
        reached: bool,
    ) -> EvolutionOutcome {
        EvolutionOutcome {
            final_generation,
            top_score,
            top_scorers: self.progress.top_scorers().to_vec(),
            generations_run: self.progress.generations_run(),
            reached_stop_score: reached,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, EvaluatorError};
    use std::sync::Mutex;

    /// Counts genes sitting at their own index: the permutation 0..n scores n.
    fn in_place(c: &Chromosome) -> std::result::Result<Score, EvaluatorError> {
        Ok(c.genes()
            .iter()
            .enumerate()
            .filter(|&(i, &g)| i == usize::from(g))
            .count() as Score)
    }

    fn config() -> EvolverConfig {
        EvolverConfig::for_genes(6, 6, 6)
            .with_population_size(20)
            .with_generations(40)
            .with_replication(3, 2)
            .with_crossovers_per_gen(2)
            .with_mutations_per_gen(6)
            .with_seed(42)
    }

    #[derive(Default)]
    struct Calls {
        numbers: Vec<usize>,
        tops: Vec<Score>,
        last_flags: Vec<bool>,
    }

    fn recording(evolver: &Evolver) -> Arc<Mutex<Calls>> {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let sink = calls.clone();
        evolver.add_observer(Arc::new(
            move |g: &Generation, top: Score, last: bool, _: &EvolutionProgress| {
                let mut c = sink.lock().unwrap();
                c.numbers.push(g.number());
                c.tops.push(top);
                c.last_flags.push(last);
            },
        ));
        calls
    }

    #[test]
    fn test_unconfigured_without_tester() {
        let mut evolver = Evolver::new(config());
        assert_eq!(evolver.state(), EvolverState::Unconfigured);
        let err = evolver.evolve().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(evolver.generations_run(), 0);
    }

    #[test]
    fn test_unconfigured_with_invalid_config() {
        let mut evolver =
            Evolver::new(config().with_alphabet_size(3)).with_fitness_tester(in_place);
        assert_eq!(evolver.state(), EvolverState::Unconfigured);
        assert!(matches!(evolver.evolve(), Err(Error::Configuration(_))));
        assert_eq!(evolver.state(), EvolverState::Unconfigured);
    }

    #[test]
    fn test_ready_then_completed() {
        let mut evolver = Evolver::new(config()).with_fitness_tester(in_place);
        assert_eq!(evolver.state(), EvolverState::Ready);
        evolver.evolve().unwrap();
        assert_eq!(evolver.state(), EvolverState::Completed);
    }

    #[test]
    fn test_full_budget_without_stop_score() {
        let mut evolver = Evolver::new(config()).with_fitness_tester(in_place);
        let calls = recording(&evolver);

        let outcome = evolver.evolve().unwrap();
        let calls = calls.lock().unwrap();

        assert_eq!(outcome.generations_run, 40);
        assert_eq!(calls.numbers, (1..=40).collect::<Vec<_>>());
        assert_eq!(calls.last_flags.iter().filter(|&&l| l).count(), 1);
        assert_eq!(calls.last_flags.last(), Some(&true));
        assert_eq!(outcome.final_generation.number(), 40);
        assert!(!outcome.reached_stop_score);
    }

    #[test]
    fn test_stops_at_score() {
        let mut evolver = Evolver::new(config().with_generations(500).with_stop_at_score(6))
            .with_fitness_tester(in_place);
        let calls = recording(&evolver);

        let outcome = evolver.evolve().unwrap();
        let calls = calls.lock().unwrap();

        assert!(outcome.reached_stop_score);
        assert_eq!(outcome.top_score, 6);
        assert!(outcome.generations_run < 500);
        assert_eq!(calls.last_flags.iter().filter(|&&l| l).count(), 1);
        assert_eq!(calls.last_flags.last(), Some(&true));
        assert!(outcome
            .top_scorers
            .iter()
            .any(|c| c.genes() == [0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_stop_score_reached_in_first_generation() {
        let mut evolver =
            Evolver::new(config().with_stop_at_score(0)).with_fitness_tester(in_place);
        let calls = recording(&evolver);
        let outcome = evolver.evolve().unwrap();
        assert_eq!(outcome.generations_run, 1);
        assert_eq!(calls.lock().unwrap().last_flags, vec![true]);
        assert!(outcome.reached_stop_score);
    }

    #[test]
    fn test_single_generation_budget() {
        let mut evolver = Evolver::new(config().with_generations(1)).with_fitness_tester(in_place);
        let calls = recording(&evolver);
        let outcome = evolver.evolve().unwrap();
        assert_eq!(outcome.generations_run, 1);
        assert_eq!(calls.lock().unwrap().last_flags, vec![true]);
    }

    #[test]
    fn test_top_score_non_decreasing() {
        let mut evolver = Evolver::new(config()).with_fitness_tester(in_place);
        let calls = recording(&evolver);
        evolver.evolve().unwrap();
        let calls = calls.lock().unwrap();
        for w in calls.tops.windows(2) {
            assert!(w[1] >= w[0], "top score regressed: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_queries_match_outcome() {
        let mut evolver = Evolver::new(config()).with_fitness_tester(in_place);
        let outcome = evolver.evolve().unwrap();
        assert_eq!(evolver.top_score(), Some(outcome.top_score));
        assert_eq!(evolver.top_scorers(), outcome.top_scorers.as_slice());
        assert_eq!(evolver.generations_run(), outcome.generations_run);
        assert!(evolver
            .top_scorers()
            .iter()
            .all(|c| c.fitness() == Some(outcome.top_score)));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut evolver = Evolver::new(config()).with_fitness_tester(in_place);
            let outcome = evolver.evolve().unwrap();
            (outcome.top_score, outcome.final_generation)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_evaluator_error_aborts() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        let tester = move |c: &Chromosome| -> std::result::Result<Score, EvaluatorError> {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n > 45 {
                return Err(EvaluatorError::msg("scorer crashed"));
            }
            in_place(c)
        };
        let mut evolver = Evolver::new(config()).with_fitness_tester(tester);
        let err = evolver.evolve().unwrap_err();

        assert!(matches!(err, Error::Evaluator(_)));
        assert_eq!(err.to_string(), "fitness evaluation failed: scorer crashed");
        // 20 per generation: two full generations were recorded
        assert_eq!(evolver.generations_run(), 2);
        assert_eq!(*calls.lock().unwrap(), 46);
        assert_eq!(evolver.state(), EvolverState::Completed);
    }

    #[test]
    fn test_second_run_starts_fresh() {
        let mut evolver = Evolver::new(config().with_generations(5)).with_fitness_tester(in_place);
        evolver.evolve().unwrap();
        let outcome = evolver.evolve().unwrap();
        assert_eq!(outcome.generations_run, 5);
        assert_eq!(evolver.generations_run(), 5);
    }

    #[test]
    fn test_invalid_config_after_completion() {
        let mut evolver = Evolver::new(config().with_generations(3)).with_fitness_tester(in_place);
        evolver.evolve().unwrap();
        assert_eq!(evolver.state(), EvolverState::Completed);
        assert_eq!(evolver.generations_run(), 3);

        evolver.set_config(config().with_alphabet_size(0));
        assert_eq!(evolver.state(), EvolverState::Unconfigured);
        assert!(matches!(evolver.evolve(), Err(Error::Configuration(_))));
        assert_eq!(evolver.state(), EvolverState::Unconfigured);
        assert_eq!(evolver.top_score(), None);
        assert_eq!(evolver.generations_run(), 0);
        assert!(evolver.top_scorers().is_empty());

        // a valid config makes it ready again, not completed
        evolver.set_config(config().with_generations(3));
        assert_eq!(evolver.state(), EvolverState::Ready);
    }

    #[test]
    fn test_progress_handle_matches_notification() {
        let mut evolver = Evolver::new(config().with_generations(10)).with_fitness_tester(in_place);
        let mismatches = Arc::new(Mutex::new(0usize));
        let sink = mismatches.clone();
        evolver.add_observer(Arc::new(
            move |g: &Generation, top: Score, _: bool, p: &EvolutionProgress| {
                if p.top_score() != Some(top) || p.generations_run() != g.number() {
                    *sink.lock().unwrap() += 1;
                }
            },
        ));
        evolver.evolve().unwrap();
        assert_eq!(*mismatches.lock().unwrap(), 0);
    }

    #[test]
    fn test_removed_observer_not_called() {
        let mut evolver = Evolver::new(config().with_generations(3)).with_fitness_tester(in_place);
        let calls = recording(&evolver);
        let id = evolver.add_observer(Arc::new(
            |_: &Generation, _: Score, _: bool, _: &EvolutionProgress| {
                panic!("removed observer was notified");
            },
        ));
        assert!(evolver.remove_observer(id));
        evolver.evolve().unwrap();
        assert_eq!(calls.lock().unwrap().numbers.len(), 3);
    }

    #[test]
    fn test_variable_set_and_fixed_bag_runs() {
        let variable = config().with_alphabet_size(8).with_length(2, 6);
        let mut evolver = Evolver::new(variable).with_fitness_tester(in_place);
        let outcome = evolver.evolve().unwrap();
        assert!(outcome.final_generation.individuals().iter().all(|c| (2..=6).contains(&c.len())));

        let bag = config().with_alphabet_size(3).with_duplicates_allowed(true);
        let mut evolver = Evolver::new(bag).with_fitness_tester(in_place);
        let outcome = evolver.evolve().unwrap();
        assert!(outcome.final_generation.individuals().iter().all(|c| c.len() == 6));
    }
}
