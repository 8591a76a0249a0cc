pub mod dispatch;
pub mod error;
pub mod generate;
pub mod loader;
pub mod persist;
pub mod report;
pub mod runner;
pub mod stats;

pub use dispatch::{DispatchOutcome, Dispatcher, Mode, DEFAULT_THREADS};
pub use error::HarnessError;
pub use loader::{load_problems, parse_problems};
pub use persist::AnswerWriter;
pub use report::{Report, print_report, render_report};
pub use runner::{run, RunConfig, DEFAULT_INPUT};
pub use stats::SolverStatistics;
