//! Gene-level crossover and mutation operators.
//!
//! These operate directly on gene vectors and are shared by the three
//! producer variants. Set-preserving operators never introduce a value that
//! is already present; bag operators may.
//!
//! # Crossover Operators
//!
//! - [`rotate_crossover`]: self-crossover for set shapes, swaps the order of
//!   the two halves around a random split point
//! - [`prefix_crossover`]: two-parent crossover for bag shapes, exchanges
//!   gene prefixes up to a random cut point
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two random positions, O(1)
//! - [`replace_mutation`]: overwrite one gene with a random alphabet value, O(1)
//! - [`delete_mutation`]: remove one gene, O(n)
//! - [`insert_mutation`]: insert one unused alphabet value, O(n·k)

use crate::chromosome::Gene;
use rand::Rng;

// ============================================================================
// Sampling
// ============================================================================

/// Draws one value uniformly from the alphabet.
///
/// # Panics
/// Panics if `alphabet` is empty.
pub fn random_gene<R: Rng>(alphabet: &[Gene], rng: &mut R) -> Gene {
    alphabet[rng.random_range(0..alphabet.len())]
}

/// Draws `count` distinct values from the alphabet, in random order.
///
/// The pool of remaining values lives only for this call.
///
/// # Panics
/// Panics if `count > alphabet.len()`.
pub fn sample_distinct<R: Rng>(alphabet: &[Gene], count: usize, rng: &mut R) -> Vec<Gene> {
    assert!(
        count <= alphabet.len(),
        "cannot draw {count} distinct genes from an alphabet of {}",
        alphabet.len()
    );
    let mut remaining = alphabet.to_vec();
    let mut genes = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = rng.random_range(0..remaining.len());
        genes.push(remaining.swap_remove(idx));
    }
    genes
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Self-crossover: rotate the genes left by a random offset in `1..len`.
///
/// The tail starting at the split point moves to the front. Keeps every
/// value exactly once, so it is safe for set shapes. No-op below length 2.
pub fn rotate_crossover<R: Rng>(genes: &mut [Gene], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let split = rng.random_range(1..n);
    genes.rotate_left(split);
}

/// Two-parent crossover: exchange the prefixes `[0, cut)` at a random cut
/// point in `1..len`. Each parent keeps its own suffix.
///
/// No-op when either parent is shorter than 2.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn prefix_crossover<R: Rng>(parent1: &mut [Gene], parent2: &mut [Gene], rng: &mut R) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return;
    }
    let cut = rng.random_range(1..n);
    exchange_prefix(parent1, parent2, cut);
}

/// Swaps `parent1[..cut]` with `parent2[..cut]` in place.
///
/// # Panics
/// Panics if `cut` exceeds either length.
pub fn exchange_prefix(parent1: &mut [Gene], parent2: &mut [Gene], cut: usize) {
    parent1[..cut].swap_with_slice(&mut parent2[..cut]);
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap two random positions. No-op below length 3.
///
/// The two positions are drawn independently and may coincide.
pub fn swap_mutation<R: Rng>(genes: &mut [Gene], rng: &mut R) {
    let n = genes.len();
    if n < 3 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}

/// Overwrite one random position with a random alphabet value.
///
/// May introduce duplicates; only valid for bag shapes.
pub fn replace_mutation<R: Rng>(genes: &mut [Gene], alphabet: &[Gene], rng: &mut R) {
    if genes.is_empty() || alphabet.is_empty() {
        return;
    }
    let idx = rng.random_range(0..genes.len());
    genes[idx] = random_gene(alphabet, rng);
}

/// Remove one random gene. Positions after it shift down by one.
pub fn delete_mutation<R: Rng>(genes: &mut Vec<Gene>, rng: &mut R) {
    if genes.is_empty() {
        return;
    }
    let idx = rng.random_range(0..genes.len());
    genes.remove(idx);
}

/// Insert one alphabet value not already present, at a random position in
/// `0..=len`. Positions from the insertion point on shift up by one.
///
/// Returns `false` (leaving `genes` untouched) when every alphabet value is
/// already used.
pub fn insert_mutation<R: Rng>(genes: &mut Vec<Gene>, alphabet: &[Gene], rng: &mut R) -> bool {
    let unused: Vec<Gene> = alphabet
        .iter()
        .copied()
        .filter(|v| !genes.contains(v))
        .collect();
    if unused.is_empty() {
        return false;
    }
    let value = unused[rng.random_range(0..unused.len())];
    let at = rng.random_range(0..=genes.len());
    genes.insert(at, value);
    true
}

// ============================================================================
// Tests
// ============================================================================
