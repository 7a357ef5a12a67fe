use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the benchmark table. All of them are fatal for a run.
#[derive(Error, Debug)]
pub enum TableError {
    /// The input CSV does not exist
    #[error("benchmark data not found at {}", .0.display())]
    MissingResource(PathBuf),

    /// One or more required columns are absent from the header row
    #[error(
        "malformed benchmark table {}: missing column(s) {}",
        .path.display(),
        .missing.join(", ")
    )]
    MalformedTable { path: PathBuf, missing: Vec<String> },

    /// A row could not be read as numbers
    #[error("failed to parse benchmark table {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
