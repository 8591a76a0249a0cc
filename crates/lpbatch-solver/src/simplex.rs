use std::time::Instant;

use tracing::debug;

use crate::problem::LpProblem;
use crate::solution::{LpSolution, SolveStatus};

/// Two-phase dense tableau simplex
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Simplex {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Solve one problem, timing the whole attempt.
    pub fn solve(&self, problem: LpProblem) -> LpSolution {
        let start = Instant::now();
        let mut solution = self.solve_untimed(problem);
        solution.total_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        solution
    }

    fn solve_untimed(&self, problem: LpProblem) -> LpSolution {
        if let Err(e) = problem.validate() {
            debug!(error = %e, "rejecting malformed problem");
            return LpSolution::failed(problem, SolveStatus::Malformed, 0);
        }

        let standard = StandardForm::from_problem(&problem);
        let mut tableau = Tableau::build(&standard);
        let mut iterations = 0;

        // Phase 1: Find initial basic feasible solution
        if tableau.n_artificial > 0 {
            match self.phase1(&mut tableau, &mut iterations) {
                SimplexResult::Optimal => {}
                other => return LpSolution::failed(problem, other.status(), iterations),
            }
        }

        // Phase 2: Optimize
        match self.phase2(&mut tableau, &mut iterations) {
            SimplexResult::Optimal => {}
            other => return LpSolution::failed(problem, other.status(), iterations),
        }

        let y = tableau.values(standard.n_columns);
        let x = standard.recover(&y);
        LpSolution::optimal(problem, x, iterations)
    }

    fn phase1(&self, tableau: &mut Tableau, iterations: &mut usize) -> SimplexResult {
        // Auxiliary objective: maximize -sum(artificials)
        let n_constraints = tableau.n_rows();
        let n_cols = tableau.n_cols();
        let art_start = tableau.artificial_start();

        let orig_obj = std::mem::replace(&mut tableau.data[n_constraints], vec![0.0; n_cols]);
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[n_constraints][j] = -1.0;
        }

        // Price out the basic artificials so their reduced costs are zero
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] += tableau.data[i][j];
                }
            }
        }

        match self.iterate(tableau, n_cols - 1, iterations) {
            SimplexResult::Optimal => {}
            // The auxiliary problem is bounded below by zero
            SimplexResult::Unbounded => return SimplexResult::Infeasible,
            other => return other,
        }

        let rhs_col = n_cols - 1;
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start
                && tableau.data[i][rhs_col].abs() > self.tolerance
            {
                return SimplexResult::Infeasible;
            }
        }

        self.drive_out_artificials(tableau, iterations);

        // Restore original objective and price out the new basis
        tableau.data[n_constraints] = orig_obj;
        for i in 0..n_constraints {
            let basic = tableau.basic_vars[i];
            let ratio = tableau.data[n_constraints][basic];
            if ratio.abs() > self.tolerance {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] -= ratio * tableau.data[i][j];
                }
            }
        }

        SimplexResult::Optimal
    }

    /// Pivot zero-level artificials out of the basis. Rows where no
    /// structural column can replace them are redundant and left alone.
    fn drive_out_artificials(&self, tableau: &mut Tableau, iterations: &mut usize) {
        let art_start = tableau.artificial_start();
        for i in 0..tableau.n_rows() {
            if tableau.basic_vars[i] < art_start {
                continue;
            }
            let replacement =
                (0..art_start).find(|&j| tableau.data[i][j].abs() > self.tolerance);
            if let Some(col) = replacement {
                tableau.pivot(i, col);
                *iterations += 1;
            }
        }
    }

    fn phase2(&self, tableau: &mut Tableau, iterations: &mut usize) -> SimplexResult {
        // Artificial columns never re-enter
        let exclude_from = tableau.artificial_start();
        self.iterate(tableau, exclude_from, iterations)
    }

    fn iterate(
        &self,
        tableau: &mut Tableau,
        exclude_from: usize,
        iterations: &mut usize,
    ) -> SimplexResult {
        for _ in 0..self.max_iterations {
            let Some(pivot_col) = self.find_pivot_column(tableau, exclude_from) else {
                return SimplexResult::Optimal;
            };
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col) else {
                return SimplexResult::Unbounded;
            };
            tableau.pivot(pivot_row, pivot_col);
            *iterations += 1;
        }
        SimplexResult::IterationLimit
    }

    fn find_pivot_column(&self, tableau: &Tableau, exclude_from: usize) -> Option<usize> {
        let obj_row = &tableau.data[tableau.n_rows()];

        // Most positive reduced cost improves the objective fastest
        let mut max_val = self.tolerance;
        let mut max_col = None;
        for (j, &value) in obj_row.iter().enumerate().take(exclude_from) {
            if value > max_val {
                max_val = value;
                max_col = Some(j);
            }
        }
        max_col
    }

    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let rhs_col = tableau.n_cols() - 1;

        let mut min_ratio = f64::INFINITY;
        let mut min_row: Option<usize> = None;

        for i in 0..tableau.n_rows() {
            let val = tableau.data[i][col];
            if val > self.tolerance {
                let ratio = tableau.data[i][rhs_col] / val;
                let better = ratio < min_ratio - self.tolerance
                    || (ratio < min_ratio + self.tolerance
                        && min_row.is_some_and(|r| tableau.basic_vars[i] < tableau.basic_vars[r]));
                if better {
                    min_ratio = ratio.min(min_ratio);
                    min_row = Some(i);
                }
            }
        }

        min_row
    }
}

enum SimplexResult {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
}

impl SimplexResult {
    fn status(self) -> SolveStatus {
        match self {
            SimplexResult::Optimal => SolveStatus::Optimal,
            SimplexResult::Unbounded => SolveStatus::Unbounded,
            SimplexResult::Infeasible => SolveStatus::Infeasible,
            SimplexResult::IterationLimit => SolveStatus::IterationLimit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstraintOp {
    Le,
    Eq,
}

struct Row {
    coefficients: Vec<f64>,
    op: ConstraintOp,
    rhs: f64,
}

/// How an original variable is expressed in the nonnegative columns.
struct Substitution {
    offset: f64,
    terms: Vec<(usize, f64)>,
}

/// `min dᵗy  s.t. rows, y >= 0`, with bounds eliminated by substitution.
struct StandardForm {
    n_columns: usize,
    objective: Vec<f64>,
    rows: Vec<Row>,
    substitutions: Vec<Substitution>,
}

impl StandardForm {
    fn from_problem(problem: &LpProblem) -> Self {
        let n = problem.num_variables();
        let mut substitutions = Vec::with_capacity(n);
        let mut bound_rows = Vec::new();
        let mut n_columns = 0;

        for j in 0..n {
            let (lower, upper) = (problem.lower(j), problem.upper(j));
            let substitution = if lower.is_finite() {
                // x = lower + y
                if upper.is_finite() {
                    bound_rows.push((n_columns, upper - lower));
                }
                Substitution { offset: lower, terms: vec![(n_columns, 1.0)] }
            } else if upper.is_finite() {
                // x = upper - y
                Substitution { offset: upper, terms: vec![(n_columns, -1.0)] }
            } else {
                // x = y+ - y-
                n_columns += 1;
                Substitution {
                    offset: 0.0,
                    terms: vec![(n_columns - 1, 1.0), (n_columns, -1.0)],
                }
            };
            n_columns += 1;
            substitutions.push(substitution);
        }

        let sign = if problem.is_maximization { -1.0 } else { 1.0 };
        let mut objective = vec![0.0; n_columns];
        for (j, s) in substitutions.iter().enumerate() {
            for &(col, k) in &s.terms {
                objective[col] += sign * problem.c[j] * k;
            }
        }

        let substitute = |coefficients: &[f64], rhs: f64, op: ConstraintOp| {
            let mut row = vec![0.0; n_columns];
            let mut shifted = rhs;
            for (j, s) in substitutions.iter().enumerate() {
                shifted -= coefficients[j] * s.offset;
                for &(col, k) in &s.terms {
                    row[col] += coefficients[j] * k;
                }
            }
            Row { coefficients: row, op, rhs: shifted }
        };

        let mut rows: Vec<Row> = problem
            .a
            .iter()
            .zip(&problem.b)
            .map(|(coefficients, &rhs)| substitute(coefficients, rhs, ConstraintOp::Le))
            .chain(
                problem
                    .aeq
                    .iter()
                    .zip(&problem.beq)
                    .map(|(coefficients, &rhs)| substitute(coefficients, rhs, ConstraintOp::Eq)),
            )
            .collect();

        for (col, width) in bound_rows {
            let mut coefficients = vec![0.0; n_columns];
            coefficients[col] = 1.0;
            rows.push(Row { coefficients, op: ConstraintOp::Le, rhs: width });
        }

        Self {
            n_columns,
            objective,
            rows,
            substitutions,
        }
    }

    /// Map a point in the substituted columns back to the original variables.
    fn recover(&self, y: &[f64]) -> Vec<f64> {
        self.substitutions
            .iter()
            .map(|s| s.offset + s.terms.iter().map(|&(col, k)| k * y[col]).sum::<f64>())
            .collect()
    }
}

struct Tableau {
    /// Constraint rows followed by the objective row; last column is the RHS
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
    n_slack: usize,
    n_artificial: usize,
}

impl Tableau {
    fn build(standard: &StandardForm) -> Self {
        let n_vars = standard.n_columns;
        let n_constraints = standard.rows.len();

        // A row needs an artificial when its slack cannot start in the basis:
        // equalities, and <= rows whose RHS had to be flipped positive.
        let needs_artificial =
            |row: &Row| row.op == ConstraintOp::Eq || row.rhs < 0.0;
        let n_slack = standard
            .rows
            .iter()
            .filter(|r| r.op == ConstraintOp::Le)
            .count();
        let n_artificial = standard.rows.iter().filter(|r| needs_artificial(r)).count();

        let total_cols = n_vars + n_slack + n_artificial + 1;
        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; n_constraints + 1],
            basic_vars: vec![0; n_constraints],
            n_vars,
            n_slack,
            n_artificial,
        };

        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;
        let rhs_col = total_cols - 1;

        for (i, row) in standard.rows.iter().enumerate() {
            // Keep the RHS non-negative
            let sign = if row.rhs < 0.0 { -1.0 } else { 1.0 };
            for (j, &coef) in row.coefficients.iter().enumerate() {
                tableau.data[i][j] = sign * coef;
            }
            tableau.data[i][rhs_col] = sign * row.rhs;

            if row.op == ConstraintOp::Le {
                tableau.data[i][slack_idx] = sign;
                tableau.basic_vars[i] = slack_idx;
                slack_idx += 1;
            }
            if needs_artificial(row) {
                tableau.data[i][artificial_idx] = 1.0;
                tableau.basic_vars[i] = artificial_idx;
                artificial_idx += 1;
            }
        }

        // The objective row holds reduced costs of the maximization of -dᵗy
        let obj_row = n_constraints;
        for (j, &coef) in standard.objective.iter().enumerate() {
            tableau.data[obj_row][j] = -coef;
        }

        tableau
    }

    fn n_rows(&self) -> usize {
        self.basic_vars.len()
    }

    fn n_cols(&self) -> usize {
        self.n_vars + self.n_slack + self.n_artificial + 1
    }

    fn artificial_start(&self) -> usize {
        self.n_vars + self.n_slack
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let n_cols = self.n_cols();
        self.basic_vars[row] = col;

        let pivot_val = self.data[row][col];
        for j in 0..n_cols {
            self.data[row][j] /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, target) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = target[col];
            if factor != 0.0 {
                for (value, &p) in target.iter_mut().zip(&pivot_row) {
                    *value -= factor * p;
                }
            }
        }
    }

    fn values(&self, n_columns: usize) -> Vec<f64> {
        let rhs_col = self.n_cols() - 1;
        let mut values = vec![0.0; n_columns];
        for (i, &basic) in self.basic_vars.iter().enumerate() {
            if basic < n_columns {
                values[basic] = self.data[i][rhs_col];
            }
        }
        values
    }
}
