use super::{
    cell::{CellId, ROOT},
    ColumnId, Links, Matrix,
};

impl Links {
    /// Cover entire column, and any rows that that appear in this column.
    ///
    /// The header leaves the header ring, then every row with a cell in the
    /// column leaves every other column it touches. Rows are visited top to
    /// bottom and each row left to right.
    pub(crate) fn cover(&mut self, header: CellId) {
        self.cells.cover_horizontal(header);

        let mut row = self.cells[header].down;
        while row != header {
            let mut cell = self.cells[row].right;
            while cell != row {
                self.cells.cover_vertical(cell);
                let column = self.cells[cell].header;
                self.cells[column].size -= 1;

                cell = self.cells[cell].right;
            }

            row = self.cells[row].down;
        }
    }

    /// Uncover entire column, and any rows that appear in this column.
    ///
    /// Exact inverse of [`Links::cover`]: rows bottom to top, each row right
    /// to left, header last.
    pub(crate) fn uncover(&mut self, header: CellId) {
        let mut row = self.cells[header].up;
        while row != header {
            let mut cell = self.cells[row].left;
            while cell != row {
                let column = self.cells[cell].header;
                self.cells[column].size += 1;
                self.cells.uncover_vertical(cell);

                cell = self.cells[cell].left;
            }

            row = self.cells[row].up;
        }

        self.cells.uncover_horizontal(header);
    }

    /// Cover the column of every cell in the row of `row` except `row`
    /// itself, left to right.
    pub(crate) fn cover_row(&mut self, row: CellId) {
        let mut cell = self.cells[row].right;
        while cell != row {
            let header = self.cells[cell].header;
            self.cover(header);

            cell = self.cells[cell].right;
        }
    }

    /// Undo [`Links::cover_row`], right to left.
    pub(crate) fn uncover_row(&mut self, row: CellId) {
        let mut cell = self.cells[row].left;
        while cell != row {
            let header = self.cells[cell].header;
            self.uncover(header);

            cell = self.cells[cell].left;
        }
    }

    /// Return true if the header is currently linked into the header ring.
    pub(crate) fn is_active(&self, header: CellId) -> bool {
        let left = self.cells[header].left;
        header != ROOT && self.cells[left].right == header
    }
}

impl<R> Matrix<R> {
    /// Cover a column: remove it from the header ring and remove every row
    /// that has a cell in it from all other columns.
    ///
    /// Nothing is deallocated; [`Matrix::uncover`] relinks the same cells.
    /// Covers must be undone in LIFO order.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range or already covered.
    pub fn cover(&mut self, column: ColumnId) {
        assert!(column.0 < self.num_columns(), "column out of range");
        let header = column.header();
        assert!(self.links.is_active(header), "column {column} is already covered");

        self.links.cover(header);
    }

    /// Uncover a column, exactly reversing the matching [`Matrix::cover`].
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range or not covered. Uncovering out of
    /// LIFO order is not detected and corrupts the structure.
    pub fn uncover(&mut self, column: ColumnId) {
        assert!(column.0 < self.num_columns(), "column out of range");
        let header = column.header();
        assert!(!self.links.is_active(header), "column {column} is not covered");

        self.links.uncover(header);
    }
}
