//! Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Unrecoverable failure while analysing a batch. Any of these fails the
/// whole batch; no partial results are returned.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis of segment {index} aborted: {source}")]
    SegmentAborted {
        index: i64,
        #[source]
        source: tokio::task::JoinError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
