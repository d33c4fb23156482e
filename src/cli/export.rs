// src/cli/export.rs — Rendering mining results as table, JSON or YAML

use std::fmt::{Display, Write as _};

use serde::Serialize;

use super::OutputFormat;
use crate::episode::Episode;
use crate::infra::config::MinerConfig;
use crate::util::truncate_label;

const LABEL_WIDTH: usize = 60;

#[derive(Debug, Clone, Serialize)]
pub struct MiningReport<K> {
    pub generated_at: String,
    pub version: String,
    pub config: MinerConfig,
    pub threads: Vec<ThreadReport<K>>,
}

/// Episodes mined from one sequence; `tid` is absent when the whole input
/// was mined as a single sequence.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadReport<K> {
    pub tid: Option<i64>,
    pub events: usize,
    pub episodes: Vec<Episode<K>>,
}

impl<K> MiningReport<K> {
    pub fn new(config: MinerConfig, threads: Vec<ThreadReport<K>>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            threads,
        }
    }

    pub fn episode_count(&self) -> usize {
        self.threads.iter().map(|t| t.episodes.len()).sum()
    }
}

/// Join an episode label as `a -> b -> c`.
pub fn format_label<K: Display>(label: &[K]) -> String {
    label
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub fn render<K: Display + Serialize>(
    report: &MiningReport<K>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Yaml => serde_yml::to_string(report)?,
        OutputFormat::Table => render_table(report),
    };
    Ok(out)
}

fn render_table<K: Display>(report: &MiningReport<K>) -> String {
    let mut out = String::new();
    for thread in &report.threads {
        let heading = match thread.tid {
            Some(tid) => format!("Thread {tid}"),
            None => "Sequence".to_string(),
        };
        let _ = writeln!(
            out,
            "{heading} ({} events, {} episodes)",
            thread.events,
            thread.episodes.len()
        );

        if thread.episodes.is_empty() {
            let _ = writeln!(out, "  (no frequent episodes)");
        }
        for episode in &thread.episodes {
            let label = format_label(&episode.label);
            let first = episode
                .occurrences
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "--".into());
            let _ = writeln!(
                out,
                "  {:<width$} {:>5}x  first: {}",
                truncate_label(&label, LABEL_WIDTH),
                episode.support(),
                first,
                width = LABEL_WIDTH,
            );
        }
        out.push('\n');
    }
    out
}
