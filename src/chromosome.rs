//! Candidate solutions.
//!
//! A [`Chromosome`] is an ordered sequence of small integer genes plus a
//! fitness score assigned by the external evaluator. The three
//! [`Representation`]s share this one type and differ only in the shape
//! constraint their producer preserves.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// One gene value, drawn from `0..alphabet_size`.
pub type Gene = u16;

/// Fitness score assigned by the evaluator. Higher is better.
pub type Score = i32;

/// A candidate solution: genes plus an optional fitness score.
///
/// Two chromosomes are equal when both their genes and their scores match.
///
/// # Examples
///
/// ```
/// use u_genetic::chromosome::Chromosome;
///
/// let mut c = Chromosome::new(vec![2, 0, 1]);
/// c.set_fitness(10);
///
/// let clone = c.unscored_clone();
/// assert_eq!(clone.genes(), c.genes());
/// assert_eq!(clone.fitness(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<Gene>,
    fitness: Option<Score>,
}

impl Chromosome {
    /// Creates an unscored chromosome from a gene sequence.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Returns the gene sequence.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Mutable access for the producer's operators.
    pub(crate) fn genes_mut(&mut self) -> &mut Vec<Gene> {
        &mut self.genes
    }

    /// Replaces the whole gene sequence.
    pub fn set_genes(&mut self, genes: Vec<Gene>) {
        self.genes = genes;
    }

    /// Returns the gene at `index`.
    pub fn gene(&self, index: usize) -> Result<Gene> {
        self.genes.get(index).copied().ok_or(Error::GeneIndex {
            index,
            len: self.genes.len(),
        })
    }

    /// Overwrites the gene at `index`.
    pub fn set_gene(&mut self, index: usize, gene: Gene) -> Result<()> {
        let len = self.genes.len();
        match self.genes.get_mut(index) {
            Some(slot) => {
                *slot = gene;
                Ok(())
            }
            None => Err(Error::GeneIndex { index, len }),
        }
    }

    /// Returns the fitness score, or `None` if not yet scored.
    pub fn fitness(&self) -> Option<Score> {
        self.fitness
    }

    /// Sets the fitness score.
    pub fn set_fitness(&mut self, score: Score) {
        self.fitness = Some(score);
    }

    /// Removes the fitness score.
    pub fn clear_fitness(&mut self) {
        self.fitness = None;
    }

    /// Whether a fitness score has been assigned.
    pub fn is_scored(&self) -> bool {
        self.fitness.is_some()
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Deep copy of the genes with no fitness score.
    pub fn unscored_clone(&self) -> Self {
        Self::new(self.genes.clone())
    }

    /// Orders chromosomes by descending fitness.
    ///
    /// Unscored chromosomes sort after every scored one. Combined with the
    /// stable `sort_by`, equal scores keep their original relative order.
    pub fn compare_by_fitness(a: &Self, b: &Self) -> Ordering {
        match (a.fitness, b.fitness) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<Vec<Gene>> for Chromosome {
    fn from(genes: Vec<Gene>) -> Self {
        Self::new(genes)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{gene}")?;
        }
        Ok(())
    }
}

/// Sorts a population best-first, preserving the order of equal scores.
pub fn sort_by_fitness(population: &mut [Chromosome]) {
    population.sort_by(Chromosome::compare_by_fitness);
}

/// Shape constraint a producer preserves for its chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Representation {
    /// Fixed length, no repeated gene values.
    FixedSet,
    /// Fixed length, repeated gene values allowed.
    FixedBag,
    /// Length varies within bounds, no repeated gene values.
    VariableSet,
}

impl Representation {
    pub fn allows_duplicates(self) -> bool {
        matches!(self, Representation::FixedBag)
    }

    pub fn is_fixed_length(self) -> bool {
        !matches!(self, Representation::VariableSet)
    }

    /// Checks a gene sequence against this shape.
    ///
    /// Fixed shapes require `genes.len() == max_length`; the variable shape
    /// requires `min_length <= genes.len() <= max_length`.
    pub fn is_valid(
        self,
        genes: &[Gene],
        alphabet_size: usize,
        min_length: usize,
        max_length: usize,
    ) -> bool {
        let len_ok = if self.is_fixed_length() {
            genes.len() == max_length
        } else {
            (min_length..=max_length).contains(&genes.len())
        };
        if !len_ok {
            return false;
        }
        if genes.iter().any(|&g| usize::from(g) >= alphabet_size) {
            return false;
        }
        if self.allows_duplicates() {
            return true;
        }
        let mut seen = HashSet::with_capacity(genes.len());
        genes.iter().all(|g| seen.insert(*g))
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::FixedSet => "fixed-set",
            Representation::FixedBag => "fixed-bag",
            Representation::VariableSet => "variable-set",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(genes: Vec<Gene>, score: Score) -> Chromosome {
        let mut c = Chromosome::new(genes);
        c.set_fitness(score);
        c
    }

    #[test]
    fn test_gene_access() {
        let mut c = Chromosome::new(vec![3, 1, 4]);
        assert_eq!(c.gene(0).unwrap(), 3);
        assert_eq!(c.gene(2).unwrap(), 4);
        c.set_gene(1, 9).unwrap();
        assert_eq!(c.genes(), &[3, 9, 4]);
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
    }

    #[test]
    fn test_gene_index_out_of_bounds() {
        let mut c = Chromosome::new(vec![0, 1]);
        assert!(matches!(
            c.gene(2),
            Err(Error::GeneIndex { index: 2, len: 2 })
        ));
        assert!(matches!(
            c.set_gene(5, 0),
            Err(Error::GeneIndex { index: 5, len: 2 })
        ));
        assert_eq!(c.genes(), &[0, 1]);
    }

    #[test]
    fn test_set_genes_replaces_sequence() {
        let mut c = Chromosome::new(vec![0, 1]);
        c.set_genes(vec![4, 3, 2]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.genes(), &[4, 3, 2]);
    }

    #[test]
    fn test_unscored_clone_is_independent() {
        let original = scored(vec![0, 1, 2], 5);
        let mut clone = original.unscored_clone();
        assert_eq!(clone.genes(), original.genes());
        assert_eq!(clone.fitness(), None);

        clone.set_gene(0, 7).unwrap();
        assert_eq!(original.genes(), &[0, 1, 2]);
        assert_eq!(original.fitness(), Some(5));
    }

    #[test]
    fn test_equality_includes_score() {
        let a = scored(vec![1, 2], 3);
        let b = scored(vec![1, 2], 3);
        let c = scored(vec![1, 2], 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Chromosome::new(vec![1, 2]));
    }

    #[test]
    fn test_compare_descending() {
        let hi = scored(vec![0], 10);
        let lo = scored(vec![1], 2);
        assert_eq!(Chromosome::compare_by_fitness(&hi, &lo), Ordering::Less);
        assert_eq!(Chromosome::compare_by_fitness(&lo, &hi), Ordering::Greater);
        assert_eq!(Chromosome::compare_by_fitness(&hi, &hi), Ordering::Equal);
    }

    #[test]
    fn test_unscored_sorts_last() {
        let mut pop = vec![
            Chromosome::new(vec![9]),
            scored(vec![1], i32::MIN),
            scored(vec![2], 0),
        ];
        sort_by_fitness(&mut pop);
        assert_eq!(pop[0].genes(), &[2]);
        assert_eq!(pop[1].genes(), &[1]);
        assert_eq!(pop[2].genes(), &[9]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut pop = vec![
            scored(vec![0], 1),
            scored(vec![1], 5),
            scored(vec![2], 1),
            scored(vec![3], 5),
        ];
        sort_by_fitness(&mut pop);
        let order: Vec<Gene> = pop.iter().map(|c| c.genes()[0]).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Chromosome::new(vec![3, 0, 12]).to_string(), "3, 0, 12");
        assert_eq!(Chromosome::new(vec![]).to_string(), "");
    }

    #[test]
    fn test_representation_flags() {
        assert!(Representation::FixedBag.allows_duplicates());
        assert!(!Representation::FixedSet.allows_duplicates());
        assert!(!Representation::VariableSet.allows_duplicates());
        assert!(Representation::FixedSet.is_fixed_length());
        assert!(Representation::FixedBag.is_fixed_length());
        assert!(!Representation::VariableSet.is_fixed_length());
    }

    #[test]
    fn test_representation_validity() {
        let set = Representation::FixedSet;
        assert!(set.is_valid(&[0, 2, 1], 3, 3, 3));
        assert!(!set.is_valid(&[0, 0, 1], 3, 3, 3));
        assert!(!set.is_valid(&[0, 1], 3, 3, 3));
        assert!(!set.is_valid(&[0, 1, 3], 3, 3, 3));

        let bag = Representation::FixedBag;
        assert!(bag.is_valid(&[0, 0, 0], 2, 3, 3));
        assert!(!bag.is_valid(&[0, 2, 0], 2, 3, 3));

        let var = Representation::VariableSet;
        assert!(var.is_valid(&[4, 1], 5, 2, 4));
        assert!(var.is_valid(&[4, 1, 0, 3], 5, 2, 4));
        assert!(!var.is_valid(&[4], 5, 2, 4));
        assert!(!var.is_valid(&[4, 4, 1], 5, 2, 4));
    }
}
