// src/trace/provider.rs — Per-thread episode mining
//
// Collects trace records into one sequence per thread, mines each sequence
// independently and hands the results to a sink in ascending thread order.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;
use std::sync::Arc;

use anyhow::Context;
use tokio::task::JoinSet;

use super::event::{TraceEdge, TraceEvent};
use crate::episode::{Episode, EpisodeMiner};

/// Records that belong to a single thread of execution.
pub trait ThreadScoped {
    fn thread_id(&self) -> Option<i64>;
}

impl ThreadScoped for TraceEvent {
    fn thread_id(&self) -> Option<i64> {
        self.tid
    }
}

impl ThreadScoped for TraceEdge {
    fn thread_id(&self) -> Option<i64> {
        self.from_tid
    }
}

/// Receives the mined episodes of one thread.
pub trait EpisodeSink<K> {
    fn accept(&mut self, tid: i64, episodes: Vec<Episode<K>>);
}

impl<K> EpisodeSink<K> for BTreeMap<i64, Vec<Episode<K>>> {
    fn accept(&mut self, tid: i64, episodes: Vec<Episode<K>>) {
        self.insert(tid, episodes);
    }
}

impl<K> EpisodeSink<K> for Vec<(i64, Vec<Episode<K>>)> {
    fn accept(&mut self, tid: i64, episodes: Vec<Episode<K>>) {
        self.push((tid, episodes));
    }
}

pub struct ThreadPatternProvider<T> {
    selected: BTreeSet<i64>,
    sequences: BTreeMap<i64, Vec<T>>,
    dropped: usize,
}

impl<T: ThreadScoped> ThreadPatternProvider<T> {
    /// An empty selection mines every thread that shows up in the input.
    pub fn new(selected: impl IntoIterator<Item = i64>) -> Self {
        Self {
            selected: selected.into_iter().collect(),
            sequences: BTreeMap::new(),
            dropped: 0,
        }
    }

    /// Route one record to its thread. Returns false if it was dropped.
    pub fn process(&mut self, item: T) -> bool {
        let Some(tid) = item.thread_id() else {
            self.dropped += 1;
            return false;
        };
        if !self.selected.is_empty() && !self.selected.contains(&tid) {
            self.dropped += 1;
            return false;
        }
        self.sequences.entry(tid).or_default().push(item);
        true
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.process(item);
        }
    }

    /// Records discarded for lacking a thread id or being outside the selection.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn sequence(&self, tid: i64) -> &[T] {
        self.sequences.get(&tid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Threads that will be mined, ascending. Selected threads with no
    /// records are included and produce an empty result.
    pub fn thread_ids(&self) -> Vec<i64> {
        if self.selected.is_empty() {
            self.sequences.keys().copied().collect()
        } else {
            self.selected.iter().copied().collect()
        }
    }

    /// Mine every thread on the calling thread.
    pub fn finish<K, F, S>(mut self, miner: &EpisodeMiner, key_of: F, sink: &mut S)
    where
        K: Clone + Eq + Hash,
        F: Fn(&T) -> K,
        S: EpisodeSink<K>,
    {
        for tid in self.thread_ids() {
            let sequence = self.sequences.remove(&tid).unwrap_or_default();
            let episodes = miner.mine(&sequence, &key_of);
            tracing::info!(
                tid,
                events = sequence.len(),
                episodes = episodes.len(),
                "mined thread"
            );
            sink.accept(tid, episodes);
        }
    }

    /// Mine threads concurrently on blocking worker tasks. Results still
    /// reach the sink in ascending thread order.
    pub async fn finish_parallel<K, F, S>(
        mut self,
        miner: &EpisodeMiner,
        key_of: F,
        sink: &mut S,
    ) -> anyhow::Result<()>
    where
        T: Send + 'static,
        K: Clone + Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        S: EpisodeSink<K>,
    {
        let key_of = Arc::new(key_of);
        let mut tasks = JoinSet::new();

        for tid in self.thread_ids() {
            let sequence = self.sequences.remove(&tid).unwrap_or_default();
            let miner = *miner;
            let key_of = Arc::clone(&key_of);
            tasks.spawn_blocking(move || {
                let episodes = miner.mine(&sequence, &*key_of);
                tracing::info!(
                    tid,
                    events = sequence.len(),
                    episodes = episodes.len(),
                    "mined thread"
                );
                (tid, episodes)
            });
        }

        let mut results = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (tid, episodes) = joined.context("mining task failed")?;
            results.insert(tid, episodes);
        }
        for (tid, episodes) in results {
            sink.accept(tid, episodes);
        }
        Ok(())
    }
}
