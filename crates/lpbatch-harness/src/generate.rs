//! Random LP batch generation for benchmarking the harness.
//!
//! Right-hand sides are built from the absolute row coefficients so most
//! generated problems are feasible, but nothing guarantees it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lpbatch_solver::LpProblem;
use rand::Rng;

use crate::error::HarnessError;

pub fn generate_problem<R: Rng + ?Sized>(rng: &mut R) -> LpProblem {
    let n: usize = rng.gen_range(5..=20);
    let m_ineq = rng.gen_range(1..=n + 2);
    let m_eq = rng.gen_range(0..=(n / 2).max(1));

    let mut problem = LpProblem {
        c: (0..n).map(|_| f64::from(rng.gen_range(-10..=10_i32))).collect(),
        is_maximization: rng.gen_bool(0.5),
        ..LpProblem::default()
    };

    for _ in 0..m_ineq {
        let (row, rhs) = random_row(rng, 5, 3, n);
        problem.add_inequality(row, rhs);
    }
    for _ in 0..m_eq {
        let (row, rhs) = random_row(rng, 3, 2, n);
        problem.add_equality(row, rhs);
    }

    let lb: Vec<f64> = (0..n).map(|_| f64::from(rng.gen_range(0..=3_i32))).collect();
    let ub = lb
        .iter()
        .map(|l| l + f64::from(rng.gen_range(3..=10000_i32)))
        .collect();
    problem.set_bounds(lb, ub);

    problem
}

/// Integer coefficients in `[-coef, coef]`; rhs is `Σ |a_j| * k_j` with `k_j` in `[1, weight]`.
fn random_row<R: Rng + ?Sized>(rng: &mut R, coef: i32, weight: i32, n: usize) -> (Vec<f64>, f64) {
    let row: Vec<i32> = (0..n).map(|_| rng.gen_range(-coef..=coef)).collect();
    let rhs: i32 = row.iter().map(|a| a.abs() * rng.gen_range(1..=weight)).sum();
    (row.into_iter().map(f64::from).collect(), f64::from(rhs))
}

pub fn generate_problems<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<LpProblem> {
    (0..count).map(|_| generate_problem(rng)).collect()
}

/// Write problems as a pretty-printed JSON batch file.
pub fn write_problems(path: &Path, problems: &[LpProblem]) -> Result<(), HarnessError> {
    let persist_error = |source: std::io::Error| HarnessError::Persist {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(persist_error)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, problems)
        .map_err(|e| persist_error(e.into()))?;
    out.write_all(b"\n").map_err(persist_error)?;
    out.flush().map_err(persist_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_problems;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        for problem in generate_problems(50, &mut rng) {
            let n = problem.c.len();
            assert!((5..=20).contains(&n));
            assert!(!problem.a.is_empty() && problem.a.len() <= n + 2);
            assert!(problem.aeq.len() <= (n / 2).max(1));
            assert_eq!(problem.a.len(), problem.b.len());
            assert_eq!(problem.aeq.len(), problem.beq.len());
            for (l, u) in problem.lb.iter().zip(&problem.ub) {
                assert!((0.0..=3.0).contains(l));
                assert!(u - l >= 3.0 && u - l <= 10000.0);
            }
            assert!(problem.b.iter().all(|&b| b >= 0.0));
            assert_eq!(problem.validate(), Ok(()));
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_problems(5, &mut StdRng::seed_from_u64(42));
        let b = generate_problems(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");
        let problems = generate_problems(3, &mut StdRng::seed_from_u64(1));

        write_problems(&path, &problems).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"ismaximization\""));
        assert!(text.contains("\"Aeq\""));

        assert_eq!(load_problems(&path).unwrap(), problems);
    }
}
