//! Munkres (Hungarian) solver for the square linear assignment problem.
//!
//! Given an `n x n` matrix of integer costs, finds a one-to-one assignment of rows to
//! columns with minimum total cost.
//!
//! ```
//! use munkres_assignment::{AssignmentSolver, Matrix, MunkresSolver};
//!
//! let cost = Matrix::from_rows(&[[4, 1, 3], [2, 0, 5], [3, 2, 2]]).unwrap();
//! let (mut solver, mut solution) = MunkresSolver::new(3);
//! solver.solve(&cost, &mut solution).unwrap();
//! assert_eq!(solution.row_to_column, [1, 0, 2]);
//! assert_eq!(solver.get_objective(&cost, &solution), 5);
//! ```
#[cfg(feature = "brute-force")]
pub mod brute_force;
pub mod mask;
pub mod matrix;
pub mod munkres;
pub mod solution;
pub mod solver;

#[cfg(feature = "brute-force")]
pub use brute_force::BruteForceSolver;
pub use mask::Mask;
pub use matrix::Matrix;
pub use munkres::MunkresSolver;
pub use solution::{AssignmentSolution, Cost};
pub use solver::AssignmentSolver;

use anyhow::{ensure, Result};
use std::error::Error;
use std::fmt;

/// Cost matrix has different number of rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError;

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cost matrix must be square")
    }
}

impl Error for ShapeError {}

/// Solves the assignment problem for `cost` with a freshly allocated solver.
///
/// Returns the mask of selected cells, exactly one per row and per column.
pub fn solve<C: Cost>(cost: &Matrix<C>) -> Result<Mask> {
    // the solver preallocates nrows^2 cells
    ensure!(cost.is_square(), ShapeError);
    let (mut solver, mut solution) = MunkresSolver::<C>::new(cost.nrows());
    solver.solve(cost, &mut solution)?;
    Ok(solution.mask)
}

#[cfg(test)]
mod tests {
    use super::{solve, Matrix, ShapeError};
    use test_env_log::test;

    #[test]
    fn test_solve_returns_mask() {
        let cost = Matrix::from_rows(&[[3, 1], [1, 3]]).unwrap();
        let mask = solve(&cost).unwrap();
        assert_eq!(mask.selected().collect::<Vec<_>>(), [(0, 1), (1, 0)]);
    }

    #[test]
    fn test_shape_error_message() {
        let cost = Matrix::new(2, 3, 0u64);
        let err = solve(&cost).unwrap_err();
        assert_eq!(err.downcast_ref::<ShapeError>(), Some(&ShapeError));
        assert_eq!(err.to_string(), "cost matrix must be square");
    }

    #[test]
    fn test_tall_matrix_rejected_before_allocation() {
        let cost = Matrix::new(200_000, 1, 0i64);
        let err = solve(&cost).unwrap_err();
        assert!(err.downcast_ref::<ShapeError>().is_some());
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let cost = Matrix::<i32>::new(0, 0, 0);
        assert!(solve(&cost).is_err());
    }
}
