use anyhow::{ensure, Result};
use std::ops::{Index, IndexMut};

///
/// Dense matrix stored in row-major order
///
/// The cell at position (r, c) is at index `r * ncols + c` of the backing vector.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Creates `nrows x ncols` matrix with every cell set to `fill`.
    pub fn new(nrows: usize, ncols: usize, fill: T) -> Matrix<T> {
        Matrix {
            nrows,
            ncols,
            data: vec![fill; nrows * ncols],
        }
    }

    /// Builds a matrix from a vector of rows. Fails on ragged input.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Matrix<T>> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure!(
                row.len() == ncols,
                "row {} has {} elements, expected {}",
                i,
                row.len(),
                ncols
            );
            data.extend_from_slice(row);
        }
        Ok(Matrix { nrows, ncols, data })
    }

    /// Sets every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v_ref| *v_ref = value.clone());
    }

    /// Resizes the matrix in place keeping the allocation, every cell is set to `fill`.
    pub fn reset(&mut self, nrows: usize, ncols: usize, fill: T) {
        self.nrows = nrows;
        self.ncols = ncols;
        self.data.clear();
        self.data.resize(nrows * ncols, fill);
    }
}

impl<T> Matrix<T> {
    /// Wraps row-major `data`. Fails if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Matrix<T>> {
        ensure!(
            data.len() == nrows * ncols,
            "expected {} elements for {}x{} matrix, got {}",
            nrows * ncols,
            nrows,
            ncols,
            data.len()
        );
        Ok(Matrix { nrows, ncols, data })
    }

    pub(crate) fn with_capacity(capacity: usize) -> Matrix<T> {
        Matrix {
            nrows: 0,
            ncols: 0,
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.nrows && col < self.ncols {
            self.data.get(row * self.ncols + col)
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.ncols;
        &self.data[start..start + self.ncols]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.ncols;
        &mut self.data[start..start + self.ncols]
    }

    /// Applies `f` to every cell, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(f).collect(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Returns the cells as a flat slice in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.nrows && col < self.ncols);
        &self.data[row * self.ncols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.nrows && col < self.ncols);
        &mut self.data[row * self.ncols + col]
    }
}
