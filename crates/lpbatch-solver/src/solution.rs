use std::fmt;

use crate::problem::LpProblem;

/// The result of solving one LP problem
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Status code, `1` on success (see [`SolveStatus::exitflag`])
    pub exitflag: i32,
    /// Simplex pivots performed across both phases
    pub iterations: usize,
    /// Wall time spent on this problem, in milliseconds
    pub total_time_ms: f64,
    /// Optimal point (empty unless the solve succeeded)
    pub x: Vec<f64>,
    /// Objective value `cᵗx` at `x`
    pub fval: f64,
    /// The problem this solution answers
    pub problem: LpProblem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// An optimal solution was found
    Optimal,
    /// The pivot limit was reached before optimality was proven
    IterationLimit,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The problem data has inconsistent dimensions or crossed bounds
    Malformed,
}

impl SolveStatus {
    pub fn exitflag(self) -> i32 {
        match self {
            SolveStatus::Optimal => 1,
            SolveStatus::IterationLimit => 0,
            SolveStatus::Infeasible => -2,
            SolveStatus::Unbounded => -3,
            SolveStatus::Malformed => -4,
        }
    }

    pub fn from_exitflag(flag: i32) -> Option<Self> {
        match flag {
            1 => Some(SolveStatus::Optimal),
            0 => Some(SolveStatus::IterationLimit),
            -2 => Some(SolveStatus::Infeasible),
            -3 => Some(SolveStatus::Unbounded),
            -4 => Some(SolveStatus::Malformed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::IterationLimit => "iteration limit",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Malformed => "malformed",
        }
    }
}

impl LpSolution {
    pub fn optimal(problem: LpProblem, x: Vec<f64>, iterations: usize) -> Self {
        let fval = problem.c.iter().zip(&x).map(|(c, v)| c * v).sum();
        Self {
            exitflag: SolveStatus::Optimal.exitflag(),
            iterations,
            total_time_ms: 0.0,
            x,
            fval,
            problem,
        }
    }

    pub fn failed(problem: LpProblem, status: SolveStatus, iterations: usize) -> Self {
        let fval = match status {
            SolveStatus::Unbounded if problem.is_maximization => f64::INFINITY,
            SolveStatus::Unbounded => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
        Self {
            exitflag: status.exitflag(),
            iterations,
            total_time_ms: 0.0,
            x: Vec::new(),
            fval,
            problem,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exitflag == SolveStatus::Optimal.exitflag()
    }

    pub fn status(&self) -> Option<SolveStatus> {
        SolveStatus::from_exitflag(self.exitflag)
    }

    /// Render the problem and its solution as a self-describing text block,
    /// terminated by a blank line.
    pub fn data_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LpSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.problem;
        writeln!(f, "========== LP problem ==========")?;
        writeln!(
            f,
            "type: {}",
            if p.is_maximization { "maximize" } else { "minimize" }
        )?;
        writeln!(f, "c: {}", format_vector(&p.c))?;
        writeln!(f, "A:{}", format_matrix(&p.a))?;
        writeln!(f, "b: {}", format_vector(&p.b))?;
        writeln!(f, "Aeq:{}", format_matrix(&p.aeq))?;
        writeln!(f, "beq: {}", format_vector(&p.beq))?;
        writeln!(f, "lb: {}", format_vector(&p.lb))?;
        writeln!(f, "ub: {}", format_vector(&p.ub))?;
        writeln!(f, "---------- solution ----------")?;
        writeln!(f, "exitflag: {}", self.exitflag)?;
        writeln!(f, "iterations: {}", self.iterations)?;
        writeln!(f, "time_ms: {:.3}", self.total_time_ms)?;
        writeln!(f, "fval: {}", self.fval)?;
        writeln!(f, "x: {}", format_vector(&self.x))?;
        writeln!(f)
    }
}

fn format_vector(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
    format!("[{}]", items.join(", "))
}

fn format_matrix(rows: &[Vec<f64>]) -> String {
    if rows.is_empty() {
        return " []".to_string();
    }
    rows.iter()
        .map(|row| format!("\n  {}", format_vector(row)))
        .collect()
}
