//! Solving backends: one problem at a time, or a whole batch on a thread pool.

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::problem::LpProblem;
use crate::simplex::Simplex;
use crate::solution::LpSolution;

/// Solve a single problem.
pub trait SingleSolve {
    fn solve(&self, problem: LpProblem) -> LpSolution;
}

/// Solve a batch of problems, returning one solution per problem in input order.
pub trait BatchSolve {
    fn solve_batch(&self, problems: Vec<LpProblem>) -> Vec<LpSolution>;
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Sequential backend, the timing baseline for speedup comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialSolver {
    simplex: Simplex,
}

impl SerialSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_simplex(simplex: Simplex) -> Self {
        Self { simplex }
    }
}

impl SingleSolve for SerialSolver {
    fn solve(&self, problem: LpProblem) -> LpSolution {
        self.simplex.solve(problem)
    }
}

impl BatchSolve for SerialSolver {
    fn solve_batch(&self, problems: Vec<LpProblem>) -> Vec<LpSolution> {
        problems.into_iter().map(|p| self.simplex.solve(p)).collect()
    }
}

/// Concurrent backend owning a dedicated rayon pool of `threads` workers.
pub struct ParallelSolver {
    pool: rayon::ThreadPool,
    simplex: Simplex,
}

impl ParallelSolver {
    pub fn new(threads: usize) -> Result<Self, BackendError> {
        Self::with_simplex(threads, Simplex::default())
    }

    pub fn with_simplex(threads: usize, simplex: Simplex) -> Result<Self, BackendError> {
        if threads == 0 {
            return Err(BackendError::ZeroWorkers);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lp-worker-{i}"))
            .build()?;
        Ok(Self { pool, simplex })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl BatchSolve for ParallelSolver {
    fn solve_batch(&self, problems: Vec<LpProblem>) -> Vec<LpSolution> {
        debug!(problems = problems.len(), threads = self.threads(), "solving batch");
        let simplex = self.simplex;
        // Indexed parallel collect keeps input order
        self.pool
            .install(|| problems.into_par_iter().map(|p| simplex.solve(p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::SolveStatus;

    fn batch() -> Vec<LpProblem> {
        (1..=12)
            .map(|k| {
                let k = f64::from(k);
                // max x subject to x <= k, feasible with optimum k
                let mut problem = LpProblem::maximize(vec![1.0]);
                problem.add_inequality(vec![1.0], k);
                problem.set_bounds(vec![0.0], vec![]);
                problem
            })
            .collect()
    }

    #[test]
    fn test_parallel_preserves_input_order() {
        let solver = ParallelSolver::new(4).unwrap();
        let solutions = solver.solve_batch(batch());
        assert_eq!(solutions.len(), 12);
        for (i, solution) in solutions.iter().enumerate() {
            assert!(solution.is_success());
            assert!((solution.x[0] - (i + 1) as f64).abs() < 1e-9);
            assert_eq!(solution.problem.b[0], (i + 1) as f64);
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut problems = batch();
        let mut infeasible = LpProblem::minimize(vec![1.0]);
        infeasible.add_inequality(vec![1.0], -1.0);
        infeasible.set_bounds(vec![0.0], vec![]);
        problems.insert(3, infeasible);

        let serial: Vec<i32> = SerialSolver::new()
            .solve_batch(problems.clone())
            .iter()
            .map(|s| s.exitflag)
            .collect();
        let parallel: Vec<i32> = ParallelSolver::new(1)
            .unwrap()
            .solve_batch(problems)
            .iter()
            .map(|s| s.exitflag)
            .collect();

        assert_eq!(serial, parallel);
        assert_eq!(serial[3], -2);
    }

    #[test]
    fn test_serial_respects_pivot_limit() {
        let mut problem = LpProblem::maximize(vec![3.0, 2.0]);
        problem.add_inequality(vec![1.0, 1.0], 4.0);
        problem.add_inequality(vec![1.0, 3.0], 6.0);
        problem.add_inequality(vec![1.0, 0.0], 3.0);
        problem.set_bounds(vec![0.0, 0.0], vec![]);

        let limited = SerialSolver::with_simplex(Simplex::new().with_max_iterations(1));
        let solution = limited.solve(problem.clone());
        assert_eq!(solution.exitflag, 0);
        assert_eq!(solution.status().map(SolveStatus::label), Some("iteration limit"));

        assert!(SerialSolver::new().solve(problem).is_success());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(ParallelSolver::new(0), Err(BackendError::ZeroWorkers)));
    }

    #[test]
    fn test_empty_batch() {
        let solver = ParallelSolver::new(2).unwrap();
        assert!(solver.solve_batch(Vec::new()).is_empty());
    }
}
