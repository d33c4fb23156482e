// src/cli/mine.rs — The `epiminer mine` command

use std::fmt::Display;
use std::hash::Hash;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::export::{render, MiningReport, ThreadReport};
use super::{KeyKind, MineArgs, OutputFormat};
use crate::episode::{Episode, EpisodeMiner};
use crate::infra::config::{Config, MinerConfig};
use crate::infra::errors::EpiminerError;
use crate::infra::paths;
use crate::trace::{read_records, EdgeKey, EventKey, ThreadPatternProvider, ThreadScoped};
use crate::trace::{TraceEdge, TraceEvent};

/// Handle `epiminer mine`.
pub async fn run_mine(args: MineArgs, config: &Config) -> anyhow::Result<()> {
    let miner = build_miner(&args, &config.miner)?;

    let reader = open_input(&args.input)?;
    let output = match args.key {
        KeyKind::Event => {
            let records: Vec<TraceEvent> = read_records(reader)?;
            mine_records(records, EventKey::of, &miner, &args, config).await?
        }
        KeyKind::Edge => {
            let records: Vec<TraceEdge> = read_records(reader)?;
            mine_records(records, EdgeKey::of, &miner, &args, config).await?
        }
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &output).map_err(EpiminerError::Io)?;
        eprintln!("Wrote results to {}", path.display());
    } else {
        print!("{output}");
    }
    Ok(())
}

/// Config file values overridden by whatever was given on the command line.
pub fn effective_miner_config(args: &MineArgs, base: &MinerConfig) -> MinerConfig {
    MinerConfig {
        min_frequency: args.min_frequency.unwrap_or(base.min_frequency),
        min_support: args.min_support.unwrap_or(base.min_support),
        max_episode_length: args.max_length.unwrap_or(base.max_episode_length),
        emit_non_maximal: args.emit_all || base.emit_non_maximal,
    }
}

/// Validated miner for the effective configuration.
pub fn build_miner(args: &MineArgs, base: &MinerConfig) -> Result<EpisodeMiner, EpiminerError> {
    Ok(EpisodeMiner::new(effective_miner_config(args, base))?)
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>, EpiminerError> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let file = std::fs::File::open(input).map_err(|source| EpiminerError::Input {
        path: input.to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Mine `records` and render the report in the requested format.
async fn mine_records<T, K, F>(
    records: Vec<T>,
    key_of: F,
    miner: &EpisodeMiner,
    args: &MineArgs,
    config: &Config,
) -> anyhow::Result<String>
where
    T: ThreadScoped + Send + 'static,
    K: Clone + Eq + Hash + Display + Serialize + Send + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let selected = if args.threads.is_empty() {
        config.threads.selected.clone()
    } else {
        args.threads.clone()
    };
    let per_thread = args.per_thread || !selected.is_empty();
    tracing::debug!(
        records = records.len(),
        per_thread,
        config = ?miner.config(),
        "mining input"
    );

    let threads = if per_thread {
        let mut provider = ThreadPatternProvider::new(selected);
        provider.extend(records);
        if provider.dropped() > 0 {
            tracing::warn!("Skipped {} records outside the thread selection", provider.dropped());
        }
        let sizes: Vec<(i64, usize)> = provider
            .thread_ids()
            .into_iter()
            .map(|tid| (tid, provider.sequence(tid).len()))
            .collect();

        let mut mined: Vec<(i64, Vec<Episode<K>>)> = Vec::new();
        if args.parallel || config.threads.parallel {
            provider.finish_parallel(miner, key_of, &mut mined).await?;
        } else {
            provider.finish(miner, key_of, &mut mined);
        }

        mined
            .into_iter()
            .zip(sizes)
            .map(|((tid, episodes), (_, events))| ThreadReport {
                tid: Some(tid),
                events,
                episodes,
            })
            .collect()
    } else {
        let episodes = miner.mine(&records, key_of);
        vec![ThreadReport {
            tid: None,
            events: records.len(),
            episodes,
        }]
    };

    let report = MiningReport::new(*miner.config(), threads);
    tracing::info!("Found {} episodes", report.episode_count());

    if args.save {
        let path = save_report(&report)?;
        eprintln!("Saved results to {}", path.display());
    }
    render(&report, args.format)
}

fn save_report<K: Display + Serialize>(report: &MiningReport<K>) -> anyhow::Result<PathBuf> {
    let dir = paths::results_dir();
    std::fs::create_dir_all(&dir)?;
    let name = format!("episodes-{}.json", chrono::Utc::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(name);
    std::fs::write(&path, render(report, OutputFormat::Json)?)?;
    Ok(path)
}
