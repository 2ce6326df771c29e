use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the dataset or deriving charts from it.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file is missing or unreadable.
    #[error("dataset unavailable at {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed into an [`Observation`](super::model::Observation).
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// Cycle length must be a positive, finite number of years.
    #[error("invalid cycle length {0}: must be a positive number of years")]
    InvalidCycle(f64),
}
