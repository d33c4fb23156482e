// tests/miner_test.rs — Integration test: episode mining scenarios

use pretty_assertions::assert_eq;

use epiminer::episode::{
    compute, compute_mano, compute_mo, select_frequent_symbols, Episode, EpisodeMiner, Occurrence,
};
use epiminer::infra::config::MinerConfig;
use epiminer::infra::errors::MinerError;
use epiminer::trace::{EdgeKey, EdgeType, EventKey, TraceEdge, TraceEvent};

fn occ(list: &[(usize, usize)]) -> Vec<Occurrence> {
    list.iter().copied().map(Occurrence::from).collect()
}

fn config(min_frequency: usize, min_support: usize, max_episode_length: usize) -> MinerConfig {
    MinerConfig {
        min_frequency,
        min_support,
        max_episode_length,
        emit_non_maximal: false,
    }
}

fn events(names: &[&str]) -> Vec<TraceEvent> {
    names.iter().map(|n| TraceEvent::new(*n)).collect()
}

fn key(name: &str) -> EventKey {
    EventKey(name.to_string())
}

#[test]
fn test_alternating_sequence_reports_pair() {
    let seq = events(&["A", "B", "A", "B", "A", "B"]);

    let (frequent, index) = select_frequent_symbols(&seq, EventKey::of, 2);
    assert_eq!(frequent, vec![key("A"), key("B")]);
    assert_eq!(index.frequency(&key("A")), 3);
    assert_eq!(index.frequency(&key("B")), 3);

    let episodes = compute(&seq, EventKey::of, &config(2, 2, 2)).unwrap();
    let ab = episodes
        .iter()
        .find(|e| e.label == vec![key("A"), key("B")])
        .expect("A -> B is reported");
    assert_eq!(ab.occurrences, occ(&[(0, 1), (2, 3), (4, 5)]));
    assert!(episodes.iter().all(|e| e.len() <= 2));
}

#[test]
fn test_single_event_below_threshold() {
    let seq = events(&["X"]);
    let episodes = compute(&seq, EventKey::of, &config(2, 2, 4)).unwrap();
    assert!(episodes.is_empty());
}

#[test]
fn test_minimal_occurrence_windows() {
    let result = compute_mo(&occ(&[(0, 0), (5, 5)]), &occ(&[(2, 2), (10, 10)]));
    assert_eq!(result, occ(&[(0, 2), (5, 10)]));
}

#[test]
fn test_non_overlap_selection() {
    let result = compute_mano(&occ(&[(0, 5), (3, 8), (9, 12)]));
    assert_eq!(result, occ(&[(0, 5), (9, 12)]));
}

#[test]
fn test_zero_support_is_configuration_error() {
    let seq = events(&["A", "B"]);
    let err = compute(&seq, EventKey::of, &config(2, 0, 4)).unwrap_err();
    assert_eq!(
        err,
        MinerError::InvalidConfig {
            parameter: "min_support",
            value: 0
        }
    );
    assert!(err.to_string().contains("min_support"));
}

#[test]
fn test_interleaved_noise() {
    // open/read/close repeats with unrelated events in between.
    let seq = events(&[
        "open", "mmap", "read", "close", "open", "read", "futex", "close", "open", "read",
        "close",
    ]);
    let episodes = compute(&seq, EventKey::of, &config(3, 3, 3)).unwrap();

    let labels: Vec<Vec<EventKey>> = episodes.iter().map(|e| e.label.clone()).collect();
    assert!(labels.contains(&vec![key("open"), key("read"), key("close")]));

    let orc = episodes
        .iter()
        .find(|e| e.label == vec![key("open"), key("read"), key("close")])
        .unwrap();
    assert_eq!(orc.occurrences, occ(&[(0, 3), (4, 7), (8, 10)]));
}

#[test]
fn test_edge_sequence_mining() {
    let edge = |from, to, edge_type| TraceEdge {
        from_tid: Some(from),
        to_tid: Some(to),
        edge_type,
    };
    let path = vec![
        edge(10, 10, EdgeType::Running),
        edge(10, 20, EdgeType::Blocked),
        edge(10, 10, EdgeType::Running),
        edge(10, 20, EdgeType::Blocked),
        edge(10, 10, EdgeType::Running),
        edge(10, 20, EdgeType::Blocked),
    ];
    let episodes = compute(&path, EdgeKey::of, &config(2, 2, 2)).unwrap();
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].label[0].edge_type, EdgeType::Running);
    assert_eq!(episodes[0].label[1].edge_type, EdgeType::Blocked);
    assert_eq!(episodes[0].support(), 3);
}

#[test]
fn test_emit_non_maximal_is_superset() {
    let seq = events(&["A", "B", "C", "A", "B", "C", "A", "B"]);
    let maximal = compute(&seq, EventKey::of, &config(2, 2, 3)).unwrap();

    let mut all_config = config(2, 2, 3);
    all_config.emit_non_maximal = true;
    let all = compute(&seq, EventKey::of, &all_config).unwrap();

    assert!(all.len() > maximal.len());
    for episode in &maximal {
        assert!(all.contains(episode));
    }
}

#[test]
fn test_shared_miner_across_threads() {
    let miner = EpisodeMiner::new(config(2, 2, 3)).unwrap();
    let seq: Vec<char> = "ABCABDABCABD".chars().collect();
    let expected = miner.mine(&seq, |c| *c);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let seq = seq.clone();
            std::thread::spawn(move || miner.mine(&seq, |c| *c))
        })
        .collect();

    for handle in handles {
        let result: Vec<Episode<char>> = handle.join().unwrap();
        assert_eq!(result, expected);
    }
}
