// src/trace/event.rs — Trace records and the symbol keys derived from them

use std::fmt;
use std::io::BufRead;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::infra::errors::EpiminerError;

/// Thread id used for an edge endpoint with no known worker.
pub const UNKNOWN_WORKER: i64 = -2;

/// A single trace event, as read from one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub name: String,
    #[serde(default)]
    pub tid: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl TraceEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tid: None,
            timestamp: None,
            fields: serde_json::Map::new(),
        }
    }

    pub fn with_tid(mut self, tid: i64) -> Self {
        self.tid = Some(tid);
        self
    }
}

/// Kind of a critical-path edge between two workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    Epsilon,
    Unknown,
    Default,
    Running,
    Blocked,
    Interrupted,
    Preempted,
    Timer,
    Network,
    UserInput,
    BlockDevice,
    Ipi,
}

impl EdgeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Epsilon => "EPSILON",
            Self::Unknown => "UNKNOWN",
            Self::Default => "DEFAULT",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Interrupted => "INTERRUPTED",
            Self::Preempted => "PREEMPTED",
            Self::Timer => "TIMER",
            Self::Network => "NETWORK",
            Self::UserInput => "USER_INPUT",
            Self::BlockDevice => "BLOCK_DEVICE",
            Self::Ipi => "IPI",
        }
    }
}

/// An edge of a thread's critical path. Endpoints without a worker have no tid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEdge {
    #[serde(default)]
    pub from_tid: Option<i64>,
    #[serde(default)]
    pub to_tid: Option<i64>,
    pub edge_type: EdgeType,
}

/// Symbol for event sequences: two events match when their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKey(pub String);

impl EventKey {
    pub fn of(event: &TraceEvent) -> Self {
        Self(event.name.clone())
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symbol for edge sequences: endpoint thread ids plus edge kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub from_tid: i64,
    pub to_tid: i64,
    pub edge_type: EdgeType,
}

impl EdgeKey {
    pub fn of(edge: &TraceEdge) -> Self {
        Self {
            from_tid: edge.from_tid.unwrap_or(UNKNOWN_WORKER),
            to_tid: edge.to_tid.unwrap_or(UNKNOWN_WORKER),
            edge_type: edge.edge_type,
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}:{}",
            self.from_tid,
            self.to_tid,
            self.edge_type.as_str()
        )
    }
}

/// Parse one record per non-blank line.
pub fn read_records<T: DeserializeOwned>(reader: impl BufRead) -> Result<Vec<T>, EpiminerError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|source| EpiminerError::Record {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
