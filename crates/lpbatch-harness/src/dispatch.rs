//! Backend selection and timed dispatch of a problem batch.

use std::time::{Duration, Instant};

use lpbatch_solver::{
    BatchSolve, LpProblem, LpSolution, ParallelSolver, SerialSolver, SingleSolve, SolveStatus,
};
use tracing::{debug, info};

use crate::error::HarnessError;

/// Worker count used when none is configured.
pub const DEFAULT_THREADS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Parallel { threads: usize },
    Serial,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Parallel {
            threads: DEFAULT_THREADS,
        }
    }
}

impl Mode {
    pub fn is_parallel(self) -> bool {
        matches!(self, Mode::Parallel { .. })
    }

    /// File that successful answers of this mode are appended to.
    pub fn artifact_name(self) -> &'static str {
        match self {
            Mode::Parallel { .. } => "answer_parallel.txt",
            Mode::Serial => "answer_serial.txt",
        }
    }
}

/// Solutions of one batch, in input order, and how long the backend call took.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub solutions: Vec<LpSolution>,
    pub wall_clock: Duration,
}

/// Runs a batch through the backend selected by its [`Mode`], or through an
/// explicitly supplied one.
pub struct Dispatcher {
    mode: Mode,
    backend: Option<Box<dyn BatchSolve>>,
}

impl Dispatcher {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            backend: None,
        }
    }

    /// Dispatch every batch to `backend` in one call, whatever the mode.
    pub fn with_backend(backend: impl BatchSolve + 'static) -> Self {
        Self {
            mode: Mode::Serial,
            backend: Some(Box::new(backend)),
        }
    }

    pub fn dispatch(&self, problems: Vec<LpProblem>) -> Result<DispatchOutcome, HarnessError> {
        if let Some(backend) = &self.backend {
            return run_batch(backend.as_ref(), problems);
        }
        match self.mode {
            Mode::Parallel { threads } => {
                if threads == 0 {
                    return Err(HarnessError::Config(
                        "parallel mode needs at least one thread".to_string(),
                    ));
                }
                // Pool start-up is part of the measured batch call
                let start = Instant::now();
                let solver = ParallelSolver::new(threads)?;
                let startup = start.elapsed();
                let mut outcome = run_batch(&solver, problems)?;
                outcome.wall_clock += startup;
                Ok(outcome)
            }
            Mode::Serial => run_serial(&SerialSolver::new(), problems),
        }
    }
}

/// Hand the whole batch to `backend` in one call.
pub fn run_batch<B>(backend: &B, problems: Vec<LpProblem>) -> Result<DispatchOutcome, HarnessError>
where
    B: BatchSolve + ?Sized,
{
    let expected = problems.len();
    let start = Instant::now();
    let solutions = backend.solve_batch(problems);
    finish(expected, solutions, start.elapsed())
}

/// Solve problems one by one, in input order.
pub fn run_serial<S>(backend: &S, problems: Vec<LpProblem>) -> Result<DispatchOutcome, HarnessError>
where
    S: SingleSolve + ?Sized,
{
    let expected = problems.len();
    let start = Instant::now();
    let mut solutions = Vec::with_capacity(expected);
    for problem in problems {
        solutions.push(backend.solve(problem));
    }
    finish(expected, solutions, start.elapsed())
}

fn finish(
    expected: usize,
    solutions: Vec<LpSolution>,
    wall_clock: Duration,
) -> Result<DispatchOutcome, HarnessError> {
    if solutions.len() != expected {
        return Err(HarnessError::SolutionCountMismatch {
            expected,
            actual: solutions.len(),
        });
    }
    for (index, solution) in solutions.iter().enumerate() {
        if !solution.is_success() {
            let status = solution.status().map_or("unknown", SolveStatus::label);
            debug!(index, exitflag = solution.exitflag, status, "problem not solved");
        }
    }
    info!(
        problems = expected,
        elapsed_ms = wall_clock.as_secs_f64() * 1000.0,
        "batch dispatched"
    );
    Ok(DispatchOutcome {
        solutions,
        wall_clock,
    })
}
