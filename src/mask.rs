use crate::matrix::Matrix;

/// Cell annotation used by the Munkres solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    None,
    /// zero that is part of the current assignment
    Starred,
    /// candidate zero of an augmenting path
    Primed,
}

///
/// Selected cells of a square assignment
///
/// A finished mask has exactly one selected cell in every row and every column.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    marks: Matrix<Mark>,
}

impl Mask {
    pub(crate) fn with_capacity(capacity: usize) -> Mask {
        Mask {
            marks: Matrix::with_capacity(capacity.saturating_mul(capacity)),
        }
    }

    pub(crate) fn reset(&mut self, n: usize) {
        self.marks.reset(n, n, Mark::None);
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.marks.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.marks.ncols()
    }

    /// Returns true if `(row, col)` is part of the assignment.
    ///
    /// Out of range coordinates are never selected.
    #[inline]
    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.marks.get(row, col) == Some(&Mark::Starred)
    }

    /// Iterates over selected `(row, col)` pairs in row-major order.
    pub fn selected(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let ncols = self.ncols();
        self.marks
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, mark_ref)| **mark_ref == Mark::Starred)
            .map(move |(idx, _)| (idx / ncols, idx % ncols))
    }

    pub fn to_matrix(&self) -> Matrix<bool> {
        self.marks.map(|mark_ref| *mark_ref == Mark::Starred)
    }

    #[cfg(test)]
    pub(crate) fn mark(&self, row: usize, col: usize) -> Mark {
        self.marks[(row, col)]
    }

    #[inline]
    pub(crate) fn star(&mut self, row: usize, col: usize) {
        self.marks[(row, col)] = Mark::Starred;
    }

    #[inline]
    pub(crate) fn prime(&mut self, row: usize, col: usize) {
        self.marks[(row, col)] = Mark::Primed;
    }

    #[inline]
    pub(crate) fn find_star_in_row(&self, row: usize) -> Option<usize> {
        self.marks.row(row).iter().position(|m| *m == Mark::Starred)
    }

    #[inline]
    pub(crate) fn find_star_in_col(&self, col: usize) -> Option<usize> {
        (0..self.nrows()).find(|&i| self.marks[(i, col)] == Mark::Starred)
    }

    #[inline]
    pub(crate) fn find_prime_in_row(&self, row: usize) -> Option<usize> {
        self.marks.row(row).iter().position(|m| *m == Mark::Primed)
    }

    pub(crate) fn clear_primes(&mut self) {
        self.marks
            .as_mut_slice()
            .iter_mut()
            .filter(|mark_ref| **mark_ref == Mark::Primed)
            .for_each(|mark_ref| *mark_ref = Mark::None);
    }

    /// Swaps star and prime roles along an alternating path.
    pub(crate) fn augment(&mut self, path: &[(usize, usize)]) {
        for &(i, j) in path {
            let mark_ref = &mut self.marks[(i, j)];
            *mark_ref = match *mark_ref {
                Mark::Starred => Mark::None,
                Mark::Primed => Mark::Starred,
                Mark::None => Mark::None,
            };
        }
    }

    /// Checks that no row and no column holds more than one star.
    pub(crate) fn stars_are_independent(&self) -> bool {
        let n = self.nrows();
        let mut col_seen = vec![false; self.ncols()];
        for i in 0..n {
            let mut row_seen = false;
            for (j, mark_ref) in self.marks.row(i).iter().enumerate() {
                if *mark_ref == Mark::Starred {
                    if row_seen || col_seen[j] {
                        return false;
                    }
                    row_seen = true;
                    col_seen[j] = true;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Mark, Mask};

    fn mask_3x3() -> Mask {
        let mut mask = Mask::with_capacity(3);
        mask.reset(3);
        mask
    }

    #[test]
    fn test_find_queries() {
        let mut mask = mask_3x3();
        mask.star(0, 1);
        mask.star(2, 0);
        mask.prime(1, 1);
        assert_eq!(mask.find_star_in_row(0), Some(1));
        assert_eq!(mask.find_star_in_row(1), None);
        assert_eq!(mask.find_star_in_col(0), Some(2));
        assert_eq!(mask.find_star_in_col(2), None);
        assert_eq!(mask.find_prime_in_row(1), Some(1));
        assert_eq!(mask.find_prime_in_row(0), None);
        assert!(mask.stars_are_independent());
        // primed cells are not part of the assignment
        assert!(!mask.is_selected(1, 1));
    }

    #[test]
    fn test_augment_swaps_roles() {
        let mut mask = mask_3x3();
        // path: prime (1, 0) -> star (0, 0) -> prime (0, 2)
        mask.star(0, 0);
        mask.prime(1, 0);
        mask.prime(0, 2);
        mask.prime(2, 2);
        mask.augment(&[(1, 0), (0, 0), (0, 2)]);
        mask.clear_primes();
        assert_eq!(mask.mark(0, 0), Mark::None);
        assert_eq!(mask.mark(2, 2), Mark::None);
        assert_eq!(mask.selected().collect::<Vec<_>>(), [(0, 2), (1, 0)]);
        assert!(mask.stars_are_independent());
    }

    #[test]
    fn test_dependent_stars_detected() {
        let mut mask = mask_3x3();
        mask.star(0, 1);
        mask.star(2, 1);
        assert!(!mask.stars_are_independent());
    }

    #[test]
    fn test_to_matrix() {
        let mut mask = mask_3x3();
        mask.star(1, 2);
        let m = mask.to_matrix();
        assert_eq!(m.nrows(), 3);
        assert_eq!(
            m.as_slice(),
            [false, false, false, false, false, true, false, false, false]
        );
        assert!(mask.is_selected(1, 2));
        assert!(!mask.is_selected(3, 0));
    }
}
