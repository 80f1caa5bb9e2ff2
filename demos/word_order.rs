//! Evolves the letters of a scrambled word back into order.
//!
//! Run with `RUST_LOG=info cargo run --example word_order` to see the
//! engine's own log output.

use std::sync::Arc;
use u_genetic::chromosome::{Chromosome, Score};
use u_genetic::error::EvaluatorError;
use u_genetic::evolver::{EvolutionProgress, Evolver, EvolverConfig};
use u_genetic::generation::Generation;

const WORD: &str = "metaheuristic";

fn spell(c: &Chromosome, letters: &[char]) -> String {
    c.genes().iter().map(|&g| letters[usize::from(g)]).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let letters: Vec<char> = WORD.chars().collect();
    let n = letters.len();

    // one point per letter already in its final position
    let target = letters.clone();
    let tester = move |c: &Chromosome| -> Result<Score, EvaluatorError> {
        let hits = c
            .genes()
            .iter()
            .enumerate()
            .filter(|&(i, &g)| target[usize::from(g)] == target[i])
            .count();
        Ok(hits as Score)
    };

    let config = EvolverConfig::for_genes(n, n, n)
        .with_population_size(80)
        .with_generations(2_000)
        .with_replication(8, 3)
        .with_crossovers_per_gen(8)
        .with_mutations_per_gen(30)
        .with_stop_at_score(n as Score)
        .with_seed(2024);

    let mut evolver = Evolver::new(config).with_fitness_tester(tester);

    let shown = letters.clone();
    evolver.add_observer(Arc::new(
        move |g: &Generation, top: Score, last: bool, progress: &EvolutionProgress| {
            if g.number() % 100 == 0 || last {
                let best = progress
                    .top_scorers()
                    .first()
                    .map(|c| spell(c, &shown))
                    .unwrap_or_default();
                println!("gen {:>5}  top {:>2}  {}", g.number(), top, best);
            }
        },
    ));

    let outcome = evolver.evolve()?;
    println!(
        "\n{} generations, top score {}/{}, {} distinct top scorer(s)",
        outcome.generations_run,
        outcome.top_score,
        n,
        outcome.top_scorers.len()
    );
    for c in &outcome.top_scorers {
        println!("  {}", spell(c, &letters));
    }
    Ok(())
}
