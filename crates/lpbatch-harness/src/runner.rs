//! One end-to-end batch run: load, dispatch, aggregate, persist.

use std::path::PathBuf;

use tracing::info;

use crate::dispatch::{Dispatcher, Mode};
use crate::error::HarnessError;
use crate::loader::load_problems;
use crate::persist::AnswerWriter;
use crate::stats::SolverStatistics;

/// Default batch file name.
pub const DEFAULT_INPUT: &str = "problems.json";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    /// Directory the answer file is appended to
    pub out_dir: PathBuf,
    pub mode: Mode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from("."),
            mode: Mode::default(),
        }
    }
}

/// Run a batch file through the configured backend.
///
/// Load and configuration errors surface before any solving starts, and
/// before the answer file is touched.
pub fn run(config: &RunConfig) -> Result<SolverStatistics, HarnessError> {
    let problems = load_problems(&config.input)?;
    let total = problems.len();

    let outcome = Dispatcher::new(config.mode).dispatch(problems)?;

    let mut writer = AnswerWriter::open(&config.out_dir, config.mode)?;
    let mut stats = SolverStatistics::new(total);
    for solution in &outcome.solutions {
        stats.record(solution);
        writer.write(solution)?;
    }
    let written = writer.finish()?;
    stats.set_wall_clock(outcome.wall_clock);

    info!(
        total,
        solved = stats.success_count,
        failed = stats.fail_count,
        written,
        "batch complete"
    );
    Ok(stats)
}
