// src/episode/mod.rs — Frequent episode mining over keyed event sequences

pub mod miner;
pub mod occurrence;
pub mod reduce;
pub mod tree;

pub use miner::{compute, Episode, EpisodeMiner};
pub use occurrence::{select_frequent_symbols, Occurrence, OccurrenceIndex};
pub use reduce::{compute_mano, compute_mo};
