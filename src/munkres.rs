use crate::mask::Mask;
use crate::matrix::Matrix;
use crate::solution::{AssignmentSolution, Cost};
use crate::solver::AssignmentSolver;
use anyhow;
use anyhow::{anyhow as anyhow_error, Result};
use tracing::{debug, trace, warn};

/// Solver for the square assignment problem
/// which finds a minimum cost perfect matching by covering zeros of a reduced cost matrix
/// and growing the set of independent (starred) zeros along augmenting paths.
#[derive(Clone)]
pub struct MunkresSolver<C: Cost> {
    n: usize,
    // working copy of the costs, reduced in place
    costs: Matrix<C>,
    row_cover: Vec<bool>,
    col_cover: Vec<bool>,
    // alternating prime/star chain, only alive during augmentation
    path: Vec<(usize, usize)>,

    pub naugmentations: u32,
    pub nadjustments: u32,
}

impl<C: Cost> AssignmentSolver<C> for MunkresSolver<C> {
    fn solve(
        &mut self,
        cost: &Matrix<C>,
        solution: &mut AssignmentSolution,
    ) -> Result<(), anyhow::Error> {
        self.validate_input(cost)?;
        self.init_solve(cost, solution);

        self.reduce()?;
        trace!("reduced costs: {:?}", self.costs);
        self.star_initial_zeros(&mut solution.mask);
        self.cover_columns_with_stars(&solution.mask);

        while !self.all_columns_covered() {
            let (row, col) = self.find_or_make_uncovered_zero()?;
            solution.mask.prime(row, col);

            if let Some(star_col) = solution.mask.find_star_in_row(row) {
                // tighten covers, no augmentation yet
                self.row_cover[row] = true;
                self.col_cover[star_col] = false;
            } else {
                self.augment_from(&mut solution.mask, row, col);
            }
        }
        debug_assert!(solution.mask.stars_are_independent());

        solution.sync_assignment();
        debug!(
            "solved {}x{}: naugmentations {}, nadjustments {}",
            self.n, self.n, self.naugmentations, self.nadjustments
        );
        trace!("row_to_column: {:?}", solution.row_to_column);
        Ok(())
    }
}

impl<C: Cost> MunkresSolver<C> {
    pub fn new(capacity: usize) -> (Self, AssignmentSolution) {
        (
            Self {
                n: 0,
                costs: Matrix::with_capacity(capacity.saturating_mul(capacity)),
                row_cover: Vec::with_capacity(capacity),
                col_cover: Vec::with_capacity(capacity),
                path: Vec::with_capacity(capacity.saturating_mul(2).saturating_add(1)),
                naugmentations: 0,
                nadjustments: 0,
            },
            AssignmentSolution::new(capacity),
        )
    }

    fn init_solve(&mut self, cost: &Matrix<C>, solution: &mut AssignmentSolution) {
        let n = cost.nrows();
        self.n = n;
        self.costs.reset(n, n, C::zero());
        self.costs.as_mut_slice().copy_from_slice(cost.as_slice());

        self.row_cover.clear();
        self.row_cover.resize(n, false);
        self.col_cover.clear();
        self.col_cover.resize(n, false);
        self.path.clear();

        self.naugmentations = 0;
        self.nadjustments = 0;

        solution.reset(n);
    }

    /// Subtracts row minima, then column minima.
    ///
    /// Fails if a row spans more than the cost type can represent.
    fn reduce(&mut self) -> Result<(), anyhow::Error> {
        for i in 0..self.n {
            let row = self.costs.row_mut(i);
            let min = row.iter().fold(C::max_value(), |acc, v| acc.min(*v));
            for v_ref in row.iter_mut() {
                *v_ref = v_ref.checked_sub(&min).ok_or_else(|| {
                    anyhow_error!("cost overflow while reducing row {} by {}", i, min)
                })?;
            }
        }
        // rows are non-negative now, column minima can't underflow
        for j in 0..self.n {
            let min = (0..self.n).fold(C::max_value(), |acc, i| acc.min(self.costs[(i, j)]));
            for i in 0..self.n {
                self.costs[(i, j)] -= min;
            }
        }
        debug_assert!(self.costs_are_non_negative());
        Ok(())
    }

    /// Greedily stars zeros in row-major order, first zero in a free row and column wins.
    fn star_initial_zeros(&mut self, mask: &mut Mask) {
        for i in 0..self.n {
            for j in 0..self.n {
                if self.costs[(i, j)].is_zero() && !self.row_cover[i] && !self.col_cover[j] {
                    mask.star(i, j);
                    self.row_cover[i] = true;
                    self.col_cover[j] = true;
                }
            }
        }
        self.clear_covers();
    }

    #[inline]
    fn clear_covers(&mut self) {
        self.row_cover.iter_mut().for_each(|c_ref| *c_ref = false);
        self.col_cover.iter_mut().for_each(|c_ref| *c_ref = false);
    }

    fn cover_columns_with_stars(&mut self, mask: &Mask) {
        for j in 0..self.n {
            self.col_cover[j] = mask.find_star_in_col(j).is_some();
        }
    }

    #[inline]
    fn all_columns_covered(&self) -> bool {
        self.col_cover.iter().all(|c| *c)
    }

    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        for i in (0..self.n).filter(|&i| !self.row_cover[i]) {
            for j in 0..self.n {
                if !self.col_cover[j] && self.costs[(i, j)].is_zero() {
                    return Some((i, j));
                }
            }
        }
        None
    }

    fn min_uncovered(&self) -> C {
        let mut min = C::max_value();
        for i in (0..self.n).filter(|&i| !self.row_cover[i]) {
            for j in (0..self.n).filter(|&j| !self.col_cover[j]) {
                min = min.min(self.costs[(i, j)]);
            }
        }
        min
    }

    /// Adds `delta` to covered rows and subtracts it from uncovered columns.
    ///
    /// Both conditions hold for every cell independently, so the net change is
    /// `+delta` for covered row and column, `-delta` for uncovered row and column
    /// and zero otherwise. Only the net change is applied, so a cell never passes
    /// through an intermediate value out of the cost type's range.
    fn adjust(&mut self, delta: C) -> Result<(), anyhow::Error> {
        for i in 0..self.n {
            let row_covered = self.row_cover[i];
            for (j, v_ref) in self.costs.row_mut(i).iter_mut().enumerate() {
                match (row_covered, self.col_cover[j]) {
                    (true, true) => {
                        *v_ref = v_ref.checked_add(&delta).ok_or_else(|| {
                            anyhow_error!("cost overflow while adjusting ({}, {}) by {}", i, j, delta)
                        })?;
                    }
                    // uncovered cells are at least delta
                    (false, false) => *v_ref -= delta,
                    _ => {}
                }
            }
        }
        self.nadjustments += 1;
        debug_assert!(self.costs_are_non_negative());
        Ok(())
    }

    fn find_or_make_uncovered_zero(&mut self) -> Result<(usize, usize), anyhow::Error> {
        loop {
            if let Some(zero) = self.find_uncovered_zero() {
                trace!("uncovered zero: {:?}", zero);
                return Ok(zero);
            }
            let delta = self.min_uncovered();
            debug_assert!(delta > C::zero());
            trace!("no uncovered zero, adjusting by {}", delta);
            self.adjust(delta)?;
        }
    }

    /// Flips the alternating path which starts at the primed zero `(row, col)`,
    /// then restarts covering from the grown set of stars.
    fn augment_from(&mut self, mask: &mut Mask, row: usize, col: usize) {
        self.path.clear();
        self.path.push((row, col));
        let mut col = col;
        while let Some(star_row) = mask.find_star_in_col(col) {
            self.path.push((star_row, col));
            // the star's row was covered when it got primed
            let prime_col = match mask.find_prime_in_row(star_row) {
                Some(prime_col) => prime_col,
                None => {
                    warn!(
                        "starred zero ({}, {}) has no primed zero in its row, path {:?} is cut short",
                        star_row, col, self.path
                    );
                    debug_assert!(false, "starred row {} has no primed zero", star_row);
                    break;
                }
            };
            self.path.push((star_row, prime_col));
            col = prime_col;
        }
        trace!("augmenting path: {:?}", self.path);

        mask.augment(&self.path);
        mask.clear_primes();
        self.path.clear();
        self.naugmentations += 1;
        debug_assert!(mask.stars_are_independent());

        self.clear_covers();
        self.cover_columns_with_stars(mask);
    }

    fn costs_are_non_negative(&self) -> bool {
        self.costs.as_slice().iter().all(|v| *v >= C::zero())
    }
}

#[cfg(test)]
fn cost_matrix<C: Cost>(rows: &[&[i64]]) -> Matrix<C> {
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| C::from(*v).expect("value fits the cost type"))
                .collect::<Vec<C>>()
        })
        .collect::<Vec<_>>();
    Matrix::from_rows(&rows).expect("rows are not ragged")
}
