use crate::matrix::Matrix;
use crate::solution::{AssignmentSolution, Cost};
use crate::solver::AssignmentSolver;
use anyhow;
use anyhow::{ensure, Result};
use tracing::trace;

/// Exhaustive solver which checks all n! permutations.
///
/// Only practical for tiny matrices, it serves as an optimality oracle.
#[derive(Clone)]
pub struct BruteForceSolver<C: Cost> {
    permutation: Vec<usize>,
    best_permutation: Vec<usize>,
    best_cost: Option<C>,
    // Heap's algorithm control stack
    counters: Vec<usize>,
    pub nits: u64,
}

impl<C: Cost> AssignmentSolver<C> for BruteForceSolver<C> {
    fn solve(
        &mut self,
        cost: &Matrix<C>,
        solution: &mut AssignmentSolution,
    ) -> Result<(), anyhow::Error> {
        self.validate_input(cost)?;
        let n = cost.nrows();
        ensure!(
            n <= Self::MAX_SIZE,
            "brute force supports matrices up to {}x{}, got {}x{}",
            Self::MAX_SIZE,
            Self::MAX_SIZE,
            n,
            n
        );
        self.init_solve(n);

        self.evaluate(cost);
        let mut k = 1;
        while k < n {
            if self.counters[k] < k {
                if k % 2 == 0 {
                    self.permutation.swap(0, k);
                } else {
                    self.permutation.swap(self.counters[k], k);
                }
                self.evaluate(cost);
                self.counters[k] += 1;
                k = 1;
            } else {
                self.counters[k] = 0;
                k += 1;
            }
        }

        solution.reset(n);
        for (i, j) in self.best_permutation.iter().enumerate() {
            solution.mask.star(i, *j);
        }
        solution.sync_assignment();
        trace!(
            "best permutation {:?} out of {} with cost {:?}",
            self.best_permutation,
            self.nits,
            self.best_cost
        );
        Ok(())
    }
}

impl<C: Cost> BruteForceSolver<C> {
    pub const MAX_SIZE: usize = 10;

    pub fn new(capacity: usize) -> (Self, AssignmentSolution) {
        (
            Self {
                permutation: Vec::with_capacity(capacity),
                best_permutation: Vec::with_capacity(capacity),
                best_cost: None,
                counters: Vec::with_capacity(capacity),
                nits: 0,
            },
            AssignmentSolution::new(capacity),
        )
    }

    fn init_solve(&mut self, n: usize) {
        self.permutation.clear();
        self.permutation.extend(0..n);
        self.best_permutation.clear();
        self.best_permutation.extend(0..n);
        self.counters.clear();
        self.counters.resize(n, 0);
        self.best_cost = None;
        self.nits = 0;
    }

    fn evaluate(&mut self, cost: &Matrix<C>) {
        self.nits += 1;
        let total = self
            .permutation
            .iter()
            .enumerate()
            .fold(C::zero(), |acc, (i, j)| acc + cost[(i, *j)]);
        if self.best_cost.map_or(true, |best| total < best) {
            self.best_cost = Some(total);
            self.best_permutation.copy_from_slice(&self.permutation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BruteForceSolver;
    use crate::matrix::Matrix;
    use crate::solver::AssignmentSolver;
    use test_env_log::test;

    #[test]
    fn test_visits_every_permutation() {
        let cost = Matrix::new(5, 5, 1u32);
        let (mut solver, mut solution) = BruteForceSolver::new(5);
        solver.solve(&cost, &mut solution).unwrap();
        assert_eq!(solver.nits, 120);
        assert_eq!(solver.get_objective(&cost, &solution), 5);
    }

    #[test]
    fn test_finds_anti_diagonal() {
        let cost = Matrix::from_rows(&[[1, 2, 3], [2, 4, 6], [3, 6, 9]]).unwrap();
        let (mut solver, mut solution) = BruteForceSolver::new(3);
        solver.solve(&cost, &mut solution).unwrap();
        assert_eq!(solution.row_to_column, [2, 1, 0]);
        assert_eq!(solver.get_objective(&cost, &solution), 10);
    }

    #[test]
    fn test_rejects_large_input() {
        let n = BruteForceSolver::<i32>::MAX_SIZE + 1;
        let cost = Matrix::new(n, n, 0i32);
        let (mut solver, mut solution) = BruteForceSolver::new(n);
        assert!(solver.solve(&cost, &mut solution).is_err());
    }
}
