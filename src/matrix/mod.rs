//! The sparse exact cover matrix, stored as a toroidal doubly-linked structure
//! inside a single arena of cells.
//!
//! Layout of the arena:
//!  - slot `0` is the root sentinel, whose horizontal ring threads through
//!    every active column header;
//!  - slots `1..=num_columns` are the column headers, in column order;
//!  - every following slot is a row-membership cell, rows in input order and
//!    cells of a row in ascending column order.
//!
//! Cells are never removed from the arena. Covering a column only splices
//! links, so the same cells are relinked when it is uncovered.

pub(crate) mod cell;
mod cover;

use crate::{
    chooser::{ColumnChooser, MinSize},
    error::{Direction, IntegrityError, MatrixError},
    sink::SolutionSink,
    solver::{SearchSummary, Solver},
};
use cell::{iter, CellId, Cells, ROOT};
use std::{collections::HashSet, fmt};

/// Stable identifier of a column: its 0-based position in the header list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub usize);

impl ColumnId {
    pub(crate) fn header(self) -> CellId {
        CellId(self.0 + 1)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a row: its 0-based position in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

/// The linked part of a matrix, which is what a search mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) cells: Cells,
    pub(crate) num_columns: usize,
}

impl Links {
    /// Return true if no column header remains in the root's ring.
    pub(crate) fn is_solved(&self) -> bool {
        self.cells[ROOT].right == ROOT
    }

    pub(crate) fn column_of(&self, header: CellId) -> ColumnId {
        debug_assert!(header.0 >= 1 && header.0 <= self.num_columns);
        ColumnId(header.0 - 1)
    }

    /// Check every link reachable from the root.
    ///
    /// Starting from the header ring, each active column's vertical ring is
    /// walked, and from each member cell its whole row. Cells of covered rows
    /// are not reachable and are not checked.
    pub(crate) fn verify(&self) -> Result<(), IntegrityError> {
        let len = self.cells.len();
        let check_bounds = |id: CellId| -> Result<(), IntegrityError> {
            let cell = &self.cells[id];
            if [cell.left, cell.right, cell.up, cell.down, cell.header]
                .iter()
                .any(|link| link.0 >= len)
            {
                Err(IntegrityError::DanglingLink { cell: id.0 })
            } else {
                Ok(())
            }
        };
        let check_horizontal = |id: CellId| -> Result<(), IntegrityError> {
            let cell = &self.cells[id];
            if self.cells[cell.left].right != id {
                return Err(IntegrityError::LinkAsymmetry {
                    cell: id.0,
                    direction: Direction::Left,
                });
            }
            if self.cells[cell.right].left != id {
                return Err(IntegrityError::LinkAsymmetry {
                    cell: id.0,
                    direction: Direction::Right,
                });
            }
            Ok(())
        };
        let check_vertical = |id: CellId| -> Result<(), IntegrityError> {
            let cell = &self.cells[id];
            if self.cells[cell.up].down != id {
                return Err(IntegrityError::LinkAsymmetry {
                    cell: id.0,
                    direction: Direction::Up,
                });
            }
            if self.cells[cell.down].up != id {
                return Err(IntegrityError::LinkAsymmetry {
                    cell: id.0,
                    direction: Direction::Down,
                });
            }
            Ok(())
        };

        check_bounds(ROOT)?;
        check_horizontal(ROOT)?;

        let mut steps = 0;
        let mut header = self.cells[ROOT].right;
        while header != ROOT {
            // A broken ring could cycle without ever reaching the root.
            steps += 1;
            if steps > len || header.0 > self.num_columns {
                return Err(IntegrityError::DanglingLink { cell: header.0 });
            }

            check_bounds(header)?;
            check_horizontal(header)?;
            check_vertical(header)?;

            let mut counted = 0;
            let mut member = self.cells[header].down;
            while member != header {
                counted += 1;
                if counted > len {
                    return Err(IntegrityError::DanglingLink { cell: member.0 });
                }

                check_bounds(member)?;
                check_vertical(member)?;
                if self.cells[member].header != header || self.cells[member].row.is_none() {
                    return Err(IntegrityError::WrongHeader { cell: member.0 });
                }

                let mut in_row = 0;
                let mut neighbor = member;
                loop {
                    in_row += 1;
                    if in_row > len {
                        return Err(IntegrityError::DanglingLink { cell: neighbor.0 });
                    }
                    check_bounds(neighbor)?;
                    check_horizontal(neighbor)?;
                    check_vertical(neighbor)?;
                    if self.cells[neighbor].row != self.cells[member].row {
                        return Err(IntegrityError::WrongHeader { cell: neighbor.0 });
                    }

                    neighbor = self.cells[neighbor].right;
                    if neighbor == member {
                        break;
                    }
                }

                member = self.cells[member].down;
            }

            let recorded = self.cells[header].size;
            if recorded != counted {
                return Err(IntegrityError::SizeMismatch {
                    column: self.column_of(header).0,
                    recorded,
                    counted,
                });
            }

            header = self.cells[header].right;
        }

        Ok(())
    }
}

/// A sparse boolean matrix prepared for exact cover search.
///
/// `R` is the caller's identifier for a row; it is what a solution reports.
#[derive(Debug, Clone)]
pub struct Matrix<R> {
    pub(crate) links: Links,
    columns: Vec<String>,
    rows: Vec<R>,
}

impl<R> Matrix<R> {
    /// Build a matrix from named columns and rows given as sets of column
    /// indices.
    ///
    /// Rows are linked in input order. The column indices of a row are sorted
    /// before linking, so the row's cells run left to right by column.
    ///
    /// # Errors
    ///
    /// Fails without linking anything if there are no columns, two columns
    /// share a name, or a row names a column out of range or more than once.
    pub fn new<I, C>(
        columns: impl IntoIterator<Item = impl Into<String>>,
        rows: impl IntoIterator<Item = (R, I)>,
    ) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = C>,
        C: Into<usize>,
    {
        let mut builder = MatrixBuilder::new();
        for name in columns {
            builder.column(name);
        }
        for (row, row_columns) in rows {
            builder.row(row, row_columns.into_iter().map(Into::into));
        }
        builder.build()
    }

    /// Build a matrix whose columns are named by their index (`"0"`, `"1"`,
    /// ...).
    pub fn with_column_count<I, C>(
        num_columns: usize,
        rows: impl IntoIterator<Item = (R, I)>,
    ) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = C>,
        C: Into<usize>,
    {
        Self::new((0..num_columns).map(|index| index.to_string()), rows)
    }

    /// Build a matrix from rows encoded as bitmasks, where bit `i` set means
    /// the row includes column `i`.
    pub fn from_bitmasks(
        num_columns: usize,
        rows: impl IntoIterator<Item = (R, u128)>,
    ) -> Result<Self, MatrixError> {
        if num_columns > 128 {
            return Err(MatrixError::BitmaskTooWide { num_columns });
        }

        let mut builder = MatrixBuilder::with_column_count(num_columns);
        for (row, mask) in rows {
            builder.row(row, (0..128).filter(|bit| mask & (1u128 << bit) != 0));
        }
        builder.build()
    }

    /// Number of columns, covered or not.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, including rows without any cells.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of row-membership cells, i.e. the number of `1`s in the matrix.
    pub fn num_cells(&self) -> usize {
        self.links.cells.len() - 1 - self.num_columns()
    }

    /// Name of the given column.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range.
    pub fn column_name(&self, column: ColumnId) -> &str {
        &self.columns[column.0]
    }

    /// Identifier of the given row.
    ///
    /// # Panics
    ///
    /// Panics if the row is out of range.
    pub fn row(&self, row: RowId) -> &R {
        &self.rows[row.0]
    }

    /// All row identifiers, in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of cells currently linked into the given column.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range.
    pub fn column_size(&self, column: ColumnId) -> usize {
        assert!(column.0 < self.num_columns(), "column out of range");
        self.links.cells[column.header()].size
    }

    /// Columns still linked into the header ring, in ring order.
    pub fn active_columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        iter::right(&self.links.cells, ROOT).map(|header| self.links.column_of(header))
    }

    /// Rows still linked into the given column, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range.
    pub fn rows_in_column(&self, column: ColumnId) -> impl Iterator<Item = RowId> + '_ {
        assert!(column.0 < self.num_columns(), "column out of range");
        iter::down(&self.links.cells, column.header()).filter_map(|cell| self.links.cells[cell].row)
    }

    /// Check the link symmetry and size invariants of everything reachable
    /// from the root.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        self.links.verify()
    }

    /// Return a solver over this matrix that picks columns by minimum size.
    pub fn solver(&mut self) -> Solver<'_, R> {
        self.solver_with(MinSize)
    }

    /// Return a solver over this matrix that picks columns with the given
    /// policy.
    pub fn solver_with<C: ColumnChooser>(&mut self, chooser: C) -> Solver<'_, R, C> {
        Solver::new(&mut self.links, &self.rows, chooser)
    }

    /// Search for every exact cover, handing each one to `sink`.
    pub fn search<S>(&mut self, sink: &mut S) -> SearchSummary
    where
        S: SolutionSink<R> + ?Sized,
    {
        self.solver().search(sink)
    }

    /// Return every exact cover, in search order.
    pub fn all_solutions(&mut self) -> Vec<Vec<&R>> {
        self.solver().all_solutions()
    }
}

/// Incremental construction of a [`Matrix`].
///
/// Nothing is validated or linked until [`MatrixBuilder::build`].
#[derive(Debug, Clone)]
pub struct MatrixBuilder<R> {
    columns: Vec<String>,
    rows: Vec<(R, Vec<usize>)>,
}

impl<R> Default for MatrixBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MatrixBuilder<R> {
    /// Create a builder with no columns and no rows.
    pub fn new() -> Self {
        MatrixBuilder {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Create a builder with `num_columns` columns named by their index.
    pub fn with_column_count(num_columns: usize) -> Self {
        let mut builder = Self::new();
        builder.columns = (0..num_columns).map(|index| index.to_string()).collect();
        builder
    }

    /// Append a column and return its identifier.
    pub fn column(&mut self, name: impl Into<String>) -> ColumnId {
        self.columns.push(name.into());
        ColumnId(self.columns.len() - 1)
    }

    /// Append a row covering the given columns and return its identifier.
    pub fn row(&mut self, row: R, columns: impl IntoIterator<Item = usize>) -> RowId {
        self.rows.push((row, columns.into_iter().collect()));
        RowId(self.rows.len() - 1)
    }

    fn validate(&mut self) -> Result<(), MatrixError> {
        if self.columns.is_empty() {
            return Err(MatrixError::NoColumns);
        }

        let mut seen = HashSet::with_capacity(self.columns.len());
        for name in &self.columns {
            if !seen.insert(name.as_str()) {
                return Err(MatrixError::DuplicateColumn { name: name.clone() });
            }
        }

        let num_columns = self.columns.len();
        for (index, (_, row_columns)) in self.rows.iter_mut().enumerate() {
            row_columns.sort_unstable();
            if let Some(&column) = row_columns.iter().find(|column| **column >= num_columns) {
                return Err(MatrixError::ColumnOutOfRange {
                    row: index,
                    column,
                    num_columns,
                });
            }
            if let Some(pair) = row_columns.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(MatrixError::DuplicateRowColumn {
                    row: index,
                    column: pair[0],
                });
            }
        }

        Ok(())
    }

    /// Validate the input and link it into a [`Matrix`].
    ///
    /// # Errors
    ///
    /// See [`Matrix::new`].
    pub fn build(mut self) -> Result<Matrix<R>, MatrixError> {
        self.validate()?;

        let num_columns = self.columns.len();
        let num_cells: usize = self.rows.iter().map(|(_, columns)| columns.len()).sum();
        let mut cells = Cells::with_capacity(1 + num_columns + num_cells);

        let root = cells.alloc(None, None);
        debug_assert_eq!(root, ROOT);
        for _ in 0..num_columns {
            let header = cells.alloc(None, None);
            cells.add_left(ROOT, header);
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        for (index, (row, row_columns)) in self.rows.into_iter().enumerate() {
            let row_id = RowId(index);
            let mut first: Option<CellId> = None;

            for column in row_columns {
                let header = ColumnId(column).header();
                let cell = cells.alloc(Some(header), Some(row_id));

                cells.add_above(header, cell);
                cells[header].size += 1;

                match first {
                    Some(first) => cells.add_left(first, cell),
                    None => first = Some(cell),
                }
            }

            rows.push(row);
        }

        log::debug!(
            "Built matrix with [{}] columns, [{}] rows and [{}] cells.",
            num_columns,
            rows.len(),
            num_cells
        );

        Ok(Matrix {
            links: Links { cells, num_columns },
            columns: self.columns,
            rows,
        })
    }
}
