//! Batch file loading.

use std::fs;
use std::path::Path;

use lpbatch_solver::LpProblem;
use serde_json::Value;
use tracing::debug;

use crate::error::HarnessError;

/// Read a JSON batch file into problems, preserving record order.
pub fn load_problems(path: &Path) -> Result<Vec<LpProblem>, HarnessError> {
    let source = fs::read_to_string(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let problems = parse_records(&source, &path.display().to_string())?;
    debug!(path = %path.display(), problems = problems.len(), "loaded batch");
    Ok(problems)
}

/// Parse an in-memory JSON batch.
pub fn parse_problems(source: &str) -> Result<Vec<LpProblem>, HarnessError> {
    parse_records(source, "<input>")
}

fn parse_records(source: &str, origin: &str) -> Result<Vec<LpProblem>, HarnessError> {
    let parse_error = |message: String| HarnessError::Parse {
        origin: origin.to_string(),
        message,
    };

    let document: Value = serde_json::from_str(source).map_err(|e| parse_error(e.to_string()))?;
    let Value::Array(records) = document else {
        return Err(parse_error("expected an array of problem records".to_string()));
    };

    // Records are converted one by one so errors can name the record.
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<LpProblem>(record)
                .map_err(|e| parse_error(format!("record {index}: {e}")))
        })
        .collect()
}
