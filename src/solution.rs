use crate::mask::Mask;
use num_traits::{NumAssign, PrimInt};
use std::fmt::{Debug, Display};

/// Integer type usable as an assignment cost
pub trait Cost: PrimInt + NumAssign + Display + Debug {}

impl<C> Cost for C where C: PrimInt + NumAssign + Display + Debug {}

///
/// Solution of the linear assignment problem
///
#[derive(Debug, Clone)]
pub struct AssignmentSolution {
    /// selected cells, exactly one per row and per column
    pub mask: Mask,
    /// index i gives the column assigned to row i
    pub row_to_column: Vec<usize>,
    /// index j gives the row assigned to column j
    pub column_to_row: Vec<usize>,
}

impl AssignmentSolution {
    pub fn new(capacity: usize) -> AssignmentSolution {
        AssignmentSolution {
            mask: Mask::with_capacity(capacity),
            row_to_column: Vec::with_capacity(capacity),
            column_to_row: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn reset(&mut self, n: usize) {
        self.mask.reset(n);
        self.row_to_column.clear();
        self.row_to_column.resize(n, usize::MAX);
        self.column_to_row.clear();
        self.column_to_row.resize(n, usize::MAX);
    }

    /// Fills row/column lookups from the selected cells of the mask.
    pub(crate) fn sync_assignment(&mut self) {
        let n = self.mask.nrows();
        self.row_to_column.clear();
        self.row_to_column.resize(n, usize::MAX);
        self.column_to_row.clear();
        self.column_to_row.resize(self.mask.ncols(), usize::MAX);
        for (i, j) in self.mask.selected() {
            self.row_to_column[i] = j;
            self.column_to_row[j] = i;
        }
    }

    /// Number of rows; every row is assigned once the solver returns successfully.
    #[inline]
    pub fn len(&self) -> usize {
        self.row_to_column.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_to_column.is_empty()
    }

    /// Iterates over assigned `(row, column)` pairs ordered by row.
    pub fn assignment(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_to_column
            .iter()
            .enumerate()
            .filter(|(_, j_ref)| **j_ref != usize::MAX)
            .map(|(i, j_ref)| (i, *j_ref))
    }
}
