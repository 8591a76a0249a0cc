use std::time::Duration;

use lpbatch_solver::LpSolution;

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    pub total_problems: usize,
    pub success_count: usize,
    pub fail_count: usize,
    /// Summed over every solution, failed ones included
    pub total_iterations: u64,
    /// Sum of per-problem solve times
    pub total_solve_time_ms: f64,
    /// Duration of the whole dispatch call
    pub wall_clock_time_ms: f64,
}

impl SolverStatistics {
    /// Start a run over `total_problems` inputs, counted before dispatch.
    pub fn new(total_problems: usize) -> Self {
        Self {
            total_problems,
            ..Self::default()
        }
    }

    pub fn record(&mut self, solution: &LpSolution) {
        if solution.is_success() {
            self.success_count += 1;
        } else {
            self.fail_count += 1;
        }
        self.total_iterations += solution.iterations as u64;
        self.total_solve_time_ms += solution.total_time_ms;
    }

    pub fn set_wall_clock(&mut self, elapsed: Duration) {
        self.wall_clock_time_ms = elapsed.as_secs_f64() * 1000.0;
    }

    /// Fold a complete batch.
    pub fn aggregate(total_problems: usize, solutions: &[LpSolution], wall_clock: Duration) -> Self {
        let mut stats = Self::new(total_problems);
        for solution in solutions {
            stats.record(solution);
        }
        stats.set_wall_clock(wall_clock);
        stats
    }

    /// Cumulative solve time over wall-clock time. Non-finite when the
    /// wall clock is zero.
    pub fn speedup(&self) -> f64 {
        self.total_solve_time_ms / self.wall_clock_time_ms
    }

    /// Wall-clock time per problem. Non-finite for an empty batch.
    pub fn average_time_ms(&self) -> f64 {
        self.wall_clock_time_ms / self.total_problems as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpbatch_solver::{LpProblem, SolveStatus};

    fn solution(status: SolveStatus, iterations: usize, time_ms: f64) -> LpSolution {
        let problem = LpProblem::minimize(vec![1.0]);
        let mut solution = match status {
            SolveStatus::Optimal => LpSolution::optimal(problem, vec![0.0], iterations),
            other => LpSolution::failed(problem, other, iterations),
        };
        solution.total_time_ms = time_ms;
        solution
    }

    #[test]
    fn test_aggregate_counts_and_sums() {
        let solutions = vec![
            solution(SolveStatus::Optimal, 3, 1.5),
            solution(SolveStatus::Infeasible, 2, 0.5),
            solution(SolveStatus::Optimal, 4, 2.0),
            solution(SolveStatus::Unbounded, 1, 1.0),
        ];
        let stats = SolverStatistics::aggregate(4, &solutions, Duration::from_millis(2));

        assert_eq!(stats.total_problems, 4);
        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.fail_count, 2);
        assert_eq!(stats.success_count + stats.fail_count, stats.total_problems);
        assert_eq!(stats.total_iterations, 10);
        assert!((stats.total_solve_time_ms - 5.0).abs() < 1e-12);
        assert!((stats.wall_clock_time_ms - 2.0).abs() < 1e-9);
        assert!((stats.speedup() - 2.5).abs() < 1e-9);
        assert!((stats.average_time_ms() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_total_comes_from_input_count() {
        let solutions = vec![solution(SolveStatus::Optimal, 1, 1.0)];
        let stats = SolverStatistics::aggregate(3, &solutions, Duration::ZERO);
        assert_eq!(stats.total_problems, 3);
        assert_eq!(stats.success_count, 1);
    }

    #[test]
    fn test_iteration_limit_counts_as_failure() {
        let solutions = vec![solution(SolveStatus::IterationLimit, 10000, 9.0)];
        let stats = SolverStatistics::aggregate(1, &solutions, Duration::from_millis(9));
        assert_eq!(stats.fail_count, 1);
        assert_eq!(stats.total_iterations, 10000);
    }

    #[test]
    fn test_empty_batch_is_non_finite_not_a_panic() {
        let stats = SolverStatistics::aggregate(0, &[], Duration::ZERO);
        assert_eq!(stats.total_problems, 0);
        assert!(!stats.average_time_ms().is_finite());
        assert!(!stats.speedup().is_finite());
    }
}
