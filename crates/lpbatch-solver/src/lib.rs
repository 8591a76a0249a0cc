mod backend;
mod problem;
mod simplex;
mod solution;

pub use backend::{BackendError, BatchSolve, ParallelSolver, SerialSolver, SingleSolve};
pub use problem::{LpProblem, ProblemShapeError};
pub use simplex::Simplex;
pub use solution::{LpSolution, SolveStatus};
