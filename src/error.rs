use std::error::Error;
use std::fmt;

/// Error types for loading, clustering and reporting.
#[derive(Debug)]
pub enum ClusterError {
    /// Input file is structurally invalid: wrong token types or fewer
    /// values than the declared record/attribute counts require.
    MalformedInput(String),
    /// Clustering parameters out of range.
    InvalidParameter(String),
    /// `run` was invoked before `configure`.
    NotConfigured,
    /// The dataset holds zero records.
    EmptyDataset,
    /// A file could not be opened, read or written.
    IoUnavailable(String),
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterError::MalformedInput(msg) => write!(f, "malformed input: {}", msg),
            ClusterError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            ClusterError::NotConfigured => write!(f, "clustering parameters not configured"),
            ClusterError::EmptyDataset => write!(f, "dataset holds no records"),
            ClusterError::IoUnavailable(msg) => write!(f, "file unavailable: {}", msg),
        }
    }
}

impl Error for ClusterError {}

pub type ClusterResult<T> = Result<T, ClusterError>;
