use std::fmt;

use crate::dispatch::Mode;
use crate::stats::SolverStatistics;

const RULE: &str = "======================================";

/// Run summary. Speedup is only shown for parallel runs.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    stats: &'a SolverStatistics,
    mode: Mode,
}

impl<'a> Report<'a> {
    pub fn new(stats: &'a SolverStatistics, mode: Mode) -> Self {
        Self { stats, mode }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        writeln!(f, "\n============ Solve summary ===========")?;
        match self.mode {
            Mode::Parallel { threads } => writeln!(f, "Mode: parallel (threads: {threads})")?,
            Mode::Serial => writeln!(f, "Mode: serial")?,
        }
        writeln!(f, "Total problems: {}", stats.total_problems)?;
        writeln!(f, "Solved: {}", stats.success_count)?;
        writeln!(f, "Failed: {}", stats.fail_count)?;
        writeln!(f, "Total iterations: {}", stats.total_iterations)?;
        writeln!(
            f,
            "Total solve time (sum over problems): {:.2} ms",
            stats.total_solve_time_ms
        )?;
        writeln!(f, "Wall-clock time: {:.2} ms", stats.wall_clock_time_ms)?;
        if self.mode.is_parallel() {
            writeln!(f, "Parallel speedup: {:.2}x", stats.speedup())?;
        }
        writeln!(f, "Answers and problems written to {}", self.mode.artifact_name())?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Average time per problem: {:.2} ms", stats.average_time_ms())?;
        writeln!(f, "{RULE}")
    }
}

pub fn render_report(stats: &SolverStatistics, mode: Mode) -> String {
    Report::new(stats, mode).to_string()
}

pub fn print_report(stats: &SolverStatistics, mode: Mode) {
    print!("{}", Report::new(stats, mode));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SolverStatistics {
        SolverStatistics {
            total_problems: 4,
            success_count: 3,
            fail_count: 1,
            total_iterations: 42,
            total_solve_time_ms: 30.0,
            wall_clock_time_ms: 12.0,
        }
    }

    #[test]
    fn test_parallel_report() {
        let text = render_report(&stats(), Mode::Parallel { threads: 4 });
        assert!(text.contains("Mode: parallel (threads: 4)\n"));
        assert!(text.contains("Total problems: 4\n"));
        assert!(text.contains("Solved: 3\n"));
        assert!(text.contains("Failed: 1\n"));
        assert!(text.contains("Total iterations: 42\n"));
        assert!(text.contains("Total solve time (sum over problems): 30.00 ms\n"));
        assert!(text.contains("Wall-clock time: 12.00 ms\n"));
        assert!(text.contains("Parallel speedup: 2.50x\n"));
        assert!(text.contains("answer_parallel.txt"));
        assert!(text.contains("Average time per problem: 3.00 ms\n"));
    }

    #[test]
    fn test_serial_report_has_no_speedup() {
        let text = render_report(&stats(), Mode::Serial);
        assert!(text.contains("Mode: serial\n"));
        assert!(!text.contains("speedup"));
        assert!(text.contains("answer_serial.txt"));
    }

    #[test]
    fn test_report_display_matches_render() {
        let stats = stats();
        let report = Report::new(&stats, Mode::Serial);
        assert_eq!(format!("{report}"), render_report(&stats, Mode::Serial));
        assert!(report.to_string().ends_with(&format!("{RULE}\n")));
    }

    #[test]
    fn test_empty_batch_renders() {
        let text = render_report(&SolverStatistics::new(0), Mode::default());
        assert!(text.contains("Total problems: 0\n"));
        assert!(text.contains("Parallel speedup: NaNx\n"));
        assert!(text.contains("Average time per problem: NaN ms\n"));
    }
}
