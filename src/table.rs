//! Dense row-major storage for DP tables.
//!
//! A `DpTable<T>` owns `rows * cols` cells in one contiguous buffer. The
//! engine fills it one row at a time and only ever needs the previous row
//! while writing the current one, which [`DpTable::split_rows`] exposes
//! without copying.

/// Owned `rows x cols` table stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DpTable<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> DpTable<T> {
    /// Allocate a table with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounds-checked read of cell `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow one full row.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Split out `(previous row, current row)` for filling row `row`.
    ///
    /// The previous row is `None` for row 0.
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    pub fn split_rows(&mut self, row: usize) -> (Option<&[T]>, &mut [T]) {
        assert!(row < self.rows, "row {row} out of bounds ({})", self.rows);
        let start = row * self.cols;
        let (head, tail) = self.cells.split_at_mut(start);
        let current = &mut tail[..self.cols];
        if row == 0 {
            (None, current)
        } else {
            (Some(&head[start - self.cols..]), current)
        }
    }

    /// Size of the cell buffer in bytes.
    pub fn footprint_bytes(&self) -> usize {
        self.cells.len() * std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::DpTable;

    #[test]
    fn zero_sized_table_is_empty() {
        let t = DpTable::new(0, 7, 0u32);
        assert!(t.is_empty());
        assert_eq!(t.get(0, 0), None);
        assert_eq!(t.row(0), None);
    }

    #[test]
    fn get_is_bounds_checked() {
        let t = DpTable::new(2, 3, 9u8);
        assert_eq!(t.get(1, 2), Some(9));
        assert_eq!(t.get(2, 0), None);
        assert_eq!(t.get(0, 3), None);
    }

    #[test]
    fn split_rows_exposes_previous_row() {
        let mut t = DpTable::new(3, 2, 0u32);
        {
            let (prev, cur) = t.split_rows(0);
            assert!(prev.is_none());
            cur.copy_from_slice(&[1, 2]);
        }
        {
            let (prev, cur) = t.split_rows(1);
            assert_eq!(prev, Some(&[1, 2][..]));
            cur.copy_from_slice(&[3, 4]);
        }
        let (prev, _) = t.split_rows(2);
        assert_eq!(prev, Some(&[3, 4][..]));
        assert_eq!(t.row(1), Some(&[3, 4][..]));
        assert_eq!(t.footprint_bytes(), 6 * 4);
    }
}
