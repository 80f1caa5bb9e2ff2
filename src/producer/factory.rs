//! Lookup from chromosome characteristics to a producer variant.

use super::params::ProducerParams;
use super::GenerationProducer;
use crate::chromosome::Representation;
use crate::error::{config_err, Result};
use std::fmt;

/// How genes are arranged inside a chromosome.
///
/// Only [`Linear`](ChromosomeLayout::Linear) has registered producers; the
/// tree layouts are recognised so that configurations naming them fail with
/// a clear error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChromosomeLayout {
    /// Genes in one flat sequence.
    #[default]
    Linear,
    /// Genes at the leaves of a tree.
    LeafTree,
    /// Genes at every node of a tree.
    NodeTree,
}

impl fmt::Display for ChromosomeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChromosomeLayout::Linear => "linear",
            ChromosomeLayout::LeafTree => "leaf-tree",
            ChromosomeLayout::NodeTree => "node-tree",
        };
        f.write_str(name)
    }
}

/// The three facts that select a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProducerKey {
    pub fixed_length: bool,
    pub allow_duplicates: bool,
    pub layout: ChromosomeLayout,
}

impl ProducerKey {
    pub fn new(fixed_length: bool, allow_duplicates: bool, layout: ChromosomeLayout) -> Self {
        Self {
            fixed_length,
            allow_duplicates,
            layout,
        }
    }

    /// Derives the key from length bounds, as a configuration states them.
    pub fn from_bounds(
        min_length: usize,
        max_length: usize,
        allow_duplicates: bool,
        layout: ChromosomeLayout,
    ) -> Self {
        Self::new(min_length == max_length, allow_duplicates, layout)
    }
}

/// Fixed mapping from [`ProducerKey`] to [`Representation`].
///
/// | fixed length | duplicates | layout | representation |
/// |---|---|---|---|
/// | yes | no  | linear | [`FixedSet`](Representation::FixedSet) |
/// | yes | yes | linear | [`FixedBag`](Representation::FixedBag) |
/// | no  | no  | linear | [`VariableSet`](Representation::VariableSet) |
///
/// # Examples
///
/// ```
/// use u_genetic::chromosome::Representation;
/// use u_genetic::producer::{ChromosomeLayout, ProducerFactory, ProducerKey};
///
/// let key = ProducerKey::new(true, false, ChromosomeLayout::Linear);
/// assert_eq!(ProducerFactory::lookup(key).unwrap(), Representation::FixedSet);
///
/// let key = ProducerKey::new(false, true, ChromosomeLayout::Linear);
/// assert!(ProducerFactory::lookup(key).is_err());
/// ```
pub struct ProducerFactory;

impl ProducerFactory {
    /// Returns the representation registered for `key`.
    pub fn lookup(key: ProducerKey) -> Result<Representation> {
        use ChromosomeLayout::Linear;
        match (key.fixed_length, key.allow_duplicates, key.layout) {
            (true, false, Linear) => Ok(Representation::FixedSet),
            (true, true, Linear) => Ok(Representation::FixedBag),
            (false, false, Linear) => Ok(Representation::VariableSet),
            (fixed, dup, layout) => Err(config_err(format!(
                "no producer registered for {} {} chromosomes {} duplicates",
                if fixed { "fixed-length" } else { "variable-length" },
                layout,
                if dup { "with" } else { "without" },
            ))),
        }
    }

    /// Looks up `key` and constructs the producer with `params`.
    pub fn build(key: ProducerKey, params: ProducerParams) -> Result<GenerationProducer> {
        let representation = Self::lookup(key)?;
        GenerationProducer::new(representation, params)
    }
}
