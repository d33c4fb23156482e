// src/episode/miner.rs — Frequent episode mining with minimal non-overlapping occurrences
//
// Zhu, H., Wang, P., He, X., Li, Y., Wang, W., & Shi, B. (2010).
// Efficient episode mining with minimal and non-overlapping occurrences.
// ICDM 2010, pp. 1211-1216.

use std::convert::Infallible;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::occurrence::{select_frequent_symbols, Occurrence, OccurrenceIndex};
use super::reduce::{compute_mano, compute_mo};
use super::tree::{NodeId, PatternTree, ROOT};
use crate::infra::config::MinerConfig;
use crate::infra::errors::MinerError;

/// A discovered episode with its minimal non-overlapping occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode<K> {
    pub label: Vec<K>,
    pub occurrences: Vec<Occurrence>,
}

impl<K> Episode<K> {
    pub fn support(&self) -> usize {
        self.occurrences.len()
    }

    pub fn len(&self) -> usize {
        self.label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }
}

/// Runs the miner over independent sequences with one validated configuration.
///
/// Holds no state between runs: every call builds its own occurrence index
/// and pattern tree, so a single miner can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeMiner {
    config: MinerConfig,
}

impl EpisodeMiner {
    pub fn new(config: MinerConfig) -> Result<Self, MinerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Mine `sequence`, keying each item with `key_of`.
    pub fn mine<T, K, F>(&self, sequence: &[T], key_of: F) -> Vec<Episode<K>>
    where
        K: Clone + Eq + Hash,
        F: Fn(&T) -> K,
    {
        match self.run(sequence, key_of, || Ok::<(), Infallible>(())) {
            Ok(episodes) => episodes,
            Err(never) => match never {},
        }
    }

    /// Mine `sequence`, polling `should_stop` before every seed and every
    /// candidate extension. Returns `MinerError::Cancelled` with no partial
    /// results when it fires.
    pub fn mine_until<T, K, F, C>(
        &self,
        sequence: &[T],
        key_of: F,
        should_stop: C,
    ) -> Result<Vec<Episode<K>>, MinerError>
    where
        K: Clone + Eq + Hash,
        F: Fn(&T) -> K,
        C: Fn() -> bool,
    {
        self.run(sequence, key_of, || {
            if should_stop() {
                Err(MinerError::Cancelled)
            } else {
                Ok(())
            }
        })
    }

    fn run<T, K, F, C, E>(&self, sequence: &[T], key_of: F, check: C) -> Result<Vec<Episode<K>>, E>
    where
        K: Clone + Eq + Hash,
        F: Fn(&T) -> K,
        C: Fn() -> Result<(), E>,
    {
        let (frequent, index) =
            select_frequent_symbols(sequence, key_of, self.config.min_frequency);

        let growth = Growth {
            config: &self.config,
            frequent: &frequent,
            index: &index,
            check: &check,
        };
        let tree = growth.build()?;
        let episodes = collect(&tree, self.config.emit_non_maximal);

        tracing::debug!(
            items = sequence.len(),
            symbols = index.len(),
            frequent = frequent.len(),
            nodes = tree.len() - 1,
            episodes = episodes.len(),
            "episode mining finished"
        );
        Ok(episodes)
    }
}

/// Validate `config`, then mine `sequence`.
pub fn compute<T, K, F>(
    sequence: &[T],
    key_of: F,
    config: &MinerConfig,
) -> Result<Vec<Episode<K>>, MinerError>
where
    K: Clone + Eq + Hash,
    F: Fn(&T) -> K,
{
    Ok(EpisodeMiner::new(*config)?.mine(sequence, key_of))
}

/// Read-only inputs of one tree-growth pass.
struct Growth<'a, K, C> {
    config: &'a MinerConfig,
    frequent: &'a [K],
    index: &'a OccurrenceIndex<K>,
    check: &'a C,
}

impl<K, C, E> Growth<'_, K, C>
where
    K: Clone + Eq + Hash,
    C: Fn() -> Result<(), E>,
{
    fn build(&self) -> Result<PatternTree<K>, E> {
        let mut tree = PatternTree::new();

        for symbol in self.frequent {
            (self.check)()?;
            let occurrences = self.index.occurrences(symbol);
            // Extensions never have more windows than their base.
            if occurrences.len() < self.config.min_support {
                tracing::trace!(support = occurrences.len(), "pruned seed");
                continue;
            }
            // A point occurrence cannot overlap another, so MO and MANO coincide.
            let seed = tree.add_child(
                ROOT,
                symbol.clone(),
                occurrences.to_vec(),
                occurrences.to_vec(),
            );
            self.grow(&mut tree, seed)?;
        }
        Ok(tree)
    }

    fn grow(&self, tree: &mut PatternTree<K>, id: NodeId) -> Result<(), E> {
        if tree.node(id).label.len() >= self.config.max_episode_length {
            return Ok(());
        }

        for symbol in self.frequent {
            (self.check)()?;
            let minimal = compute_mo(&tree.node(id).minimal, self.index.occurrences(symbol));
            let non_overlapping = compute_mano(&minimal);

            if non_overlapping.len() < self.config.min_support {
                tracing::trace!(
                    depth = tree.node(id).label.len() + 1,
                    support = non_overlapping.len(),
                    "pruned candidate"
                );
                continue;
            }

            let child = tree.add_child(id, symbol.clone(), minimal, non_overlapping);
            self.grow(tree, child)?;
        }
        Ok(())
    }
}

/// Leaves in depth-first order, or every non-root node when `all` is set.
fn collect<K: Clone>(tree: &PatternTree<K>, all: bool) -> Vec<Episode<K>> {
    let ids = if all { tree.preorder() } else { tree.leaves() };
    ids.into_iter()
        .map(|id| {
            let node = tree.node(id);
            Episode {
                label: node.label.clone(),
                occurrences: node.non_overlapping.clone(),
            }
        })
        .collect()
}
