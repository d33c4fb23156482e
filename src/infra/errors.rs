// src/infra/errors.rs — Error types for epiminer

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the episode miner itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinerError {
    #[error("Invalid miner configuration: {parameter} must be at least 1 (got {value})")]
    InvalidConfig {
        parameter: &'static str,
        value: usize,
    },

    #[error("Mining cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum EpiminerError {
    #[error(transparent)]
    Miner(#[from] MinerError),

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot open input '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EpiminerError {
    /// Whether the failure stems from caller-supplied settings rather than data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EpiminerError::Config { .. } | EpiminerError::Miner(MinerError::InvalidConfig { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_names_parameter() {
        let err = MinerError::InvalidConfig {
            parameter: "min_support",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid miner configuration: min_support must be at least 1 (got 0)"
        );
    }

    #[test]
    fn test_is_configuration() {
        let miner: EpiminerError = MinerError::InvalidConfig {
            parameter: "max_episode_length",
            value: 0,
        }
        .into();
        assert!(miner.is_configuration());
        assert!(!EpiminerError::from(MinerError::Cancelled).is_configuration());

        let input = EpiminerError::Input {
            path: "trace.jsonl".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!input.is_configuration());
        assert!(input.to_string().starts_with("Cannot open input 'trace.jsonl'"));
    }
}
