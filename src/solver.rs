use crate::matrix::Matrix;
use crate::solution::{AssignmentSolution, Cost};
use crate::ShapeError;
use anyhow;
use anyhow::{ensure, Result};
use tracing::trace;

pub trait AssignmentSolver<C: Cost> {
    /// Finds a minimum cost assignment of rows to columns of the square `cost` matrix.
    ///
    /// `solution` is overwritten; its buffers are reused between calls.
    ///
    /// # Errors
    /// [`ShapeError`] if `cost` is not square, in which case `solution` is left untouched.
    /// Also fails for an empty matrix, and when a working cost leaves the range of `C`
    /// (e.g. a row holding both `C::min_value()` and `C::max_value()`).
    fn solve(
        &mut self,
        cost: &Matrix<C>,
        solution: &mut AssignmentSolution,
    ) -> Result<(), anyhow::Error>;

    fn validate_input(&self, cost: &Matrix<C>) -> Result<(), anyhow::Error> {
        ensure!(cost.is_square(), ShapeError);
        ensure!(cost.nrows() > 0, "cost matrix is empty");
        Ok(())
    }

    /// Returns total cost of the selected cells.
    fn get_objective(&self, cost: &Matrix<C>, solution: &AssignmentSolution) -> C {
        let obj = solution
            .assignment()
            .fold(C::zero(), |acc, (i, j)| acc + cost[(i, j)]);
        trace!("OBJECTIVE: {}", obj);
        obj
    }
}
