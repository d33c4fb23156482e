// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::{EpiminerError, MinerError};
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub miner: MinerConfig,

    #[serde(default)]
    pub threads: ThreadsConfig,
}

/// Thresholds and output shape of one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Minimum occurrence count for a one-symbol episode to be considered.
    pub min_frequency: usize,
    /// Minimum number of non-overlapping occurrences to keep an episode.
    pub min_support: usize,
    /// Longest episode label the search will build.
    pub max_episode_length: usize,
    /// Also report internal (non-maximal) frequent episodes.
    pub emit_non_maximal: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_frequency: 2,
            min_support: 2,
            max_episode_length: 4,
            emit_non_maximal: false,
        }
    }
}

impl MinerConfig {
    /// Reject zero thresholds, naming the first offending parameter.
    pub fn validate(&self) -> Result<(), MinerError> {
        let checks = [
            ("min_frequency", self.min_frequency),
            ("min_support", self.min_support),
            ("max_episode_length", self.max_episode_length),
        ];
        for (parameter, value) in checks {
            if value < 1 {
                return Err(MinerError::InvalidConfig { parameter, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadsConfig {
    /// Thread ids to mine; empty means every thread seen in the input.
    #[serde(default)]
    pub selected: Vec<i64>,
    /// Mine threads concurrently on blocking worker tasks.
    #[serde(default)]
    pub parallel: bool,
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, EpiminerError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, EpiminerError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| EpiminerError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.miner.min_frequency, 2);
        assert_eq!(c.miner.min_support, 2);
        assert_eq!(c.miner.max_episode_length, 4);
        assert!(!c.miner.emit_non_maximal);
        assert!(c.threads.selected.is_empty());
        assert!(!c.threads.parallel);
    }

    #[test]
    fn test_default_validates() {
        assert!(MinerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_each_zero() {
        let base = MinerConfig::default();
        let cases = [
            (
                MinerConfig {
                    min_frequency: 0,
                    ..base
                },
                "min_frequency",
            ),
            (
                MinerConfig {
                    min_support: 0,
                    ..base
                },
                "min_support",
            ),
            (
                MinerConfig {
                    max_episode_length: 0,
                    ..base
                },
                "max_episode_length",
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(
                config.validate(),
                Err(MinerError::InvalidConfig {
                    parameter: expected,
                    value: 0
                })
            );
        }
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.miner, MinerConfig::default());
    }

    #[test]
    fn test_parse_partial_miner_section() {
        let toml_str = r#"
[miner]
min_support = 8
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.miner.min_support, 8);
        assert_eq!(config.miner.min_frequency, 2);
        assert_eq!(config.miner.max_episode_length, 4);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[miner]
min_frequency = 8
min_support = 8
max_episode_length = 5
emit_non_maximal = true

[threads]
selected = [1234, 42]
parallel = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.miner.min_frequency, 8);
        assert_eq!(config.miner.max_episode_length, 5);
        assert!(config.miner.emit_non_maximal);
        assert_eq!(config.threads.selected, vec![1234, 42]);
        assert!(config.threads.parallel);
    }

    #[test]
    fn test_negative_threshold_rejected_by_parser() {
        let toml_str = r#"
[miner]
min_support = -1
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[miner]\nmax_episode_length = 2\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.miner.max_episode_length, 2);
    }

    #[test]
    fn test_load_from_invalid_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[miner]\nmax_episode_length = \"x\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("config.toml"));
    }
}
