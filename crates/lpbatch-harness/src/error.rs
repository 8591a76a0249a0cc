use std::io;
use std::path::PathBuf;

use lpbatch_solver::BackendError;
use thiserror::Error;

/// Fatal harness errors. Per-problem solve failures are never errors; they
/// are recorded in the statistics instead.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse error in {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("cannot write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("backend returned {actual} solutions for {expected} problems")]
    SolutionCountMismatch { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
