//! Append-only answer files.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lpbatch_solver::LpSolution;

use crate::dispatch::Mode;
use crate::error::HarnessError;

/// Single writer over one mode's answer file for the length of a run.
///
/// The file is opened in append mode so successive runs accumulate. The
/// handle is flushed by [`AnswerWriter::finish`] and closed on drop.
#[derive(Debug)]
pub struct AnswerWriter {
    path: PathBuf,
    out: BufWriter<File>,
    written: usize,
}

impl AnswerWriter {
    pub fn open(dir: &Path, mode: Mode) -> Result<Self, HarnessError> {
        let path = dir.join(mode.artifact_name());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| HarnessError::Persist {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the solution's text block if it succeeded. Returns whether
    /// anything was written.
    pub fn write(&mut self, solution: &LpSolution) -> Result<bool, HarnessError> {
        if !solution.is_success() {
            return Ok(false);
        }
        self.out
            .write_all(solution.data_string().as_bytes())
            .map_err(|source| HarnessError::Persist {
                path: self.path.clone(),
                source,
            })?;
        self.written += 1;
        Ok(true)
    }

    /// Flush and close, returning the number of blocks written.
    pub fn finish(mut self) -> Result<usize, HarnessError> {
        self.out.flush().map_err(|source| HarnessError::Persist {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpbatch_solver::{LpProblem, SolveStatus};
    use std::fs;

    fn solved() -> LpSolution {
        LpSolution::optimal(LpProblem::minimize(vec![1.0]), vec![0.0], 0)
    }

    fn failed() -> LpSolution {
        LpSolution::failed(LpProblem::minimize(vec![1.0]), SolveStatus::Infeasible, 1)
    }

    fn blocks(path: &Path) -> usize {
        fs::read_to_string(path)
            .unwrap()
            .matches("========== LP problem ==========")
            .count()
    }

    #[test]
    fn test_only_successes_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = AnswerWriter::open(dir.path(), Mode::Serial).unwrap();
        assert!(writer.write(&solved()).unwrap());
        assert!(!writer.write(&failed()).unwrap());
        let path = writer.path().to_path_buf();
        assert_eq!(writer.finish().unwrap(), 1);

        assert_eq!(path, dir.path().join("answer_serial.txt"));
        assert_eq!(blocks(&path), 1);
    }

    #[test]
    fn test_runs_append() {
        let dir = tempfile::tempdir().unwrap();
        for _ in 0..2 {
            let mut writer = AnswerWriter::open(dir.path(), Mode::default()).unwrap();
            writer.write(&solved()).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(blocks(&dir.path().join("answer_parallel.txt")), 2);
    }

    #[test]
    fn test_drop_releases_and_flushes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = AnswerWriter::open(dir.path(), Mode::Serial).unwrap();
            writer.write(&solved()).unwrap();
        }
        assert_eq!(blocks(&dir.path().join("answer_serial.txt")), 1);
    }

    #[test]
    fn test_unopenable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does").join("not").join("exist");
        let err = AnswerWriter::open(&missing, Mode::Serial).unwrap_err();
        assert!(matches!(err, HarnessError::Persist { .. }));
    }
}
