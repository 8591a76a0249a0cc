use thiserror::Error;

/// A linear program of the form
/// `min/max cᵗx  s.t.  A·x <= b,  Aeq·x = beq,  lb <= x <= ub`.
///
/// Empty `lb`/`ub` mean every variable is unbounded on that side.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LpProblem {
    /// Objective coefficients
    pub c: Vec<f64>,
    /// Inequality constraint matrix, one row per constraint
    #[cfg_attr(feature = "serde", serde(rename = "A"))]
    pub a: Vec<Vec<f64>>,
    /// Inequality right-hand side
    pub b: Vec<f64>,
    /// Equality constraint matrix
    #[cfg_attr(feature = "serde", serde(rename = "Aeq", default))]
    pub aeq: Vec<Vec<f64>>,
    /// Equality right-hand side
    #[cfg_attr(feature = "serde", serde(default))]
    pub beq: Vec<f64>,
    /// Lower bounds
    #[cfg_attr(feature = "serde", serde(default))]
    pub lb: Vec<f64>,
    /// Upper bounds
    #[cfg_attr(feature = "serde", serde(default))]
    pub ub: Vec<f64>,
    /// Maximize instead of minimize
    #[cfg_attr(feature = "serde", serde(rename = "ismaximization", default))]
    pub is_maximization: bool,
}

/// Shape or value problems that make an [`LpProblem`] unsolvable as stated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemShapeError {
    #[error("objective has no coefficients")]
    EmptyObjective,
    #[error("{matrix} has {rows} rows but its right-hand side has {rhs} entries")]
    RhsLength {
        matrix: &'static str,
        rows: usize,
        rhs: usize,
    },
    #[error("{matrix} row {row} has {found} columns, expected {expected}")]
    RowLength {
        matrix: &'static str,
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("{bound} has {found} entries, expected 0 or {expected}")]
    BoundLength {
        bound: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("variable {index} has lower bound {lower} above upper bound {upper}")]
    CrossedBounds { index: usize, lower: f64, upper: f64 },
    #[error("{0} contains a NaN")]
    NotANumber(&'static str),
}

impl LpProblem {
    /// A minimization problem with no constraints yet.
    pub fn minimize(c: Vec<f64>) -> Self {
        Self {
            c,
            ..Self::default()
        }
    }

    /// A maximization problem with no constraints yet.
    pub fn maximize(c: Vec<f64>) -> Self {
        Self {
            c,
            is_maximization: true,
            ..Self::default()
        }
    }

    pub fn add_inequality(&mut self, row: Vec<f64>, rhs: f64) {
        self.a.push(row);
        self.b.push(rhs);
    }

    pub fn add_equality(&mut self, row: Vec<f64>, rhs: f64) {
        self.aeq.push(row);
        self.beq.push(rhs);
    }

    pub fn set_bounds(&mut self, lb: Vec<f64>, ub: Vec<f64>) {
        self.lb = lb;
        self.ub = ub;
    }

    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.a.len() + self.aeq.len()
    }

    /// Lower bound of variable `j`, `-inf` when no bounds were given.
    pub fn lower(&self, j: usize) -> f64 {
        self.lb.get(j).copied().unwrap_or(f64::NEG_INFINITY)
    }

    /// Upper bound of variable `j`, `+inf` when no bounds were given.
    pub fn upper(&self, j: usize) -> f64 {
        self.ub.get(j).copied().unwrap_or(f64::INFINITY)
    }

    /// Check the dimensional invariants the simplex relies on.
    pub fn validate(&self) -> Result<(), ProblemShapeError> {
        let n = self.num_variables();
        if n == 0 {
            return Err(ProblemShapeError::EmptyObjective);
        }

        check_system("A", &self.a, &self.b, n)?;
        check_system("Aeq", &self.aeq, &self.beq, n)?;

        for (bound, values) in [("lb", &self.lb), ("ub", &self.ub)] {
            if !values.is_empty() && values.len() != n {
                return Err(ProblemShapeError::BoundLength {
                    bound,
                    found: values.len(),
                    expected: n,
                });
            }
            if values.iter().any(|v| v.is_nan()) {
                return Err(ProblemShapeError::NotANumber(bound));
            }
        }
        if self.c.iter().any(|v| v.is_nan()) {
            return Err(ProblemShapeError::NotANumber("c"));
        }

        for j in 0..n {
            let (lower, upper) = (self.lower(j), self.upper(j));
            if lower > upper {
                return Err(ProblemShapeError::CrossedBounds {
                    index: j,
                    lower,
                    upper,
                });
            }
        }

        Ok(())
    }
}

fn check_system(
    matrix: &'static str,
    rows: &[Vec<f64>],
    rhs: &[f64],
    n: usize,
) -> Result<(), ProblemShapeError> {
    if rows.len() != rhs.len() {
        return Err(ProblemShapeError::RhsLength {
            matrix,
            rows: rows.len(),
            rhs: rhs.len(),
        });
    }
    for (row, coefficients) in rows.iter().enumerate() {
        if coefficients.len() != n {
            return Err(ProblemShapeError::RowLength {
                matrix,
                row,
                found: coefficients.len(),
                expected: n,
            });
        }
        if coefficients.iter().any(|v| v.is_nan()) {
            return Err(ProblemShapeError::NotANumber(matrix));
        }
    }
    if rhs.iter().any(|v| v.is_nan()) {
        return Err(ProblemShapeError::NotANumber(matrix));
    }
    Ok(())
}
