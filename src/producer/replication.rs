//! Elitist replication: the first phase of every producer.

use super::params::ProducerParams;
use crate::chromosome::{sort_by_fitness, Chromosome};

/// Builds the replicated child population from a scored parent.
///
/// The parent is sorted best-first in place (stable, so equal scores keep
/// their order). With `drop = num_to_drop_from_bottom()` and `n = len`:
///
/// - `[0, n - drop)`: unscored clones of the parent at the same rank
/// - `[n - drop, n - 1)`: the top `num_to_replicate` clones, cycled
/// - `n - 1`: unscored clone of the best parent, reserved from crossover
///   and mutation
///
/// Callers validate the population size with
/// [`ProducerParams::validate_population`] first; an empty parent yields an
/// empty child.
pub fn replicate(parent: &mut [Chromosome], params: &ProducerParams) -> Vec<Chromosome> {
    let n = parent.len();
    if n == 0 {
        return Vec::new();
    }

    sort_by_fitness(parent);

    let top_count = params.num_to_replicate.clamp(1, n);
    let top: Vec<Chromosome> = parent[..top_count]
        .iter()
        .map(Chromosome::unscored_clone)
        .collect();

    let drop = params.num_to_drop_from_bottom().min(n);
    let keep = n - drop;

    let mut next = Vec::with_capacity(n);
    next.extend(parent[..keep].iter().map(Chromosome::unscored_clone));
    next.extend(top.iter().cycle().take(drop - 1).cloned());
    next.push(parent[0].unscored_clone());

    log::trace!(
        "replicated {} kept, {} replicas, best reserved at {}",
        keep,
        drop - 1,
        n - 1
    );
    next
}
