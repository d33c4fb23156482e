// src/trace/mod.rs — Trace records and per-thread mining

pub mod event;
pub mod provider;

pub use event::{read_records, EdgeKey, EdgeType, EventKey, TraceEdge, TraceEvent, UNKNOWN_WORKER};
pub use provider::{EpisodeSink, ThreadPatternProvider, ThreadScoped};
