//! Policies for picking the column to branch on at each step of the search.
//!
//! The choice only changes the order in which the search visits solutions and
//! how much work it does, never which solutions it finds.

use crate::{
    matrix::{
        cell::{iter::RingIter, ROOT},
        Links,
    },
    ColumnId,
};

/// A column still linked into the header ring, with its current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveColumn {
    /// The column.
    pub id: ColumnId,
    /// Number of rows that could still cover this column.
    pub size: usize,
}

/// Iterator over the active columns, in header ring order.
#[derive(Debug, Clone)]
pub struct ActiveColumns<'l> {
    links: &'l Links,
    headers: RingIter<'l>,
}

impl<'l> ActiveColumns<'l> {
    pub(crate) fn new(links: &'l Links) -> Self {
        ActiveColumns {
            links,
            headers: crate::matrix::cell::iter::right(&links.cells, ROOT),
        }
    }
}

impl Iterator for ActiveColumns<'_> {
    type Item = ActiveColumn;

    fn next(&mut self) -> Option<Self::Item> {
        self.headers.next().map(|header| ActiveColumn {
            id: self.links.column_of(header),
            size: self.links.cells[header].size,
        })
    }
}

/// Picks the column to cover next.
pub trait ColumnChooser {
    /// Return one of the given columns. The iterator is never empty.
    ///
    /// Returning `None`, or a column that was not offered, is a defect and
    /// makes the solver panic.
    fn choose(&mut self, columns: ActiveColumns<'_>) -> Option<ColumnId>;
}

impl<F> ColumnChooser for F
where
    F: FnMut(ActiveColumns<'_>) -> Option<ColumnId>,
{
    fn choose(&mut self, columns: ActiveColumns<'_>) -> Option<ColumnId> {
        self(columns)
    }
}

/// Choose the column with the fewest remaining rows, breaking ties by the
/// first one in ring order.
///
/// A column with no rows left is picked immediately, which ends the current
/// branch as soon as possible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinSize;

impl ColumnChooser for MinSize {
    fn choose(&mut self, columns: ActiveColumns<'_>) -> Option<ColumnId> {
        let mut best: Option<ActiveColumn> = None;

        for column in columns {
            if best.map_or(true, |best| column.size < best.size) {
                best = Some(column);
                if column.size == 0 {
                    break;
                }
            }
        }

        best.map(|column| column.id)
    }
}

/// Choose the leftmost active column, without looking at sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstActive;

impl ColumnChooser for FirstActive {
    fn choose(&mut self, mut columns: ActiveColumns<'_>) -> Option<ColumnId> {
        columns.next().map(|column| column.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;

    fn matrix() -> Matrix<u8> {
        Matrix::with_column_count(
            4,
            [
                (0, vec![0usize, 1]),
                (1, vec![0, 2]),
                (2, vec![1, 3]),
                (3, vec![0, 3]),
                (4, vec![2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn min_size_prefers_first_smallest() {
        let matrix = matrix();

        // Sizes are [3, 2, 2, 2]; column 1 is the first of the smallest.
        assert_eq!(
            MinSize.choose(ActiveColumns::new(&matrix.links)),
            Some(ColumnId(1))
        );
    }

    #[test]
    fn min_size_sees_only_active_columns() {
        let mut matrix = matrix();
        matrix.cover(ColumnId(1));

        let offered: Vec<_> = ActiveColumns::new(&matrix.links).collect();
        assert_eq!(
            offered,
            vec![
                ActiveColumn {
                    id: ColumnId(0),
                    size: 2
                },
                ActiveColumn {
                    id: ColumnId(2),
                    size: 2
                },
                ActiveColumn {
                    id: ColumnId(3),
                    size: 1
                },
            ]
        );
        assert_eq!(
            MinSize.choose(ActiveColumns::new(&matrix.links)),
            Some(ColumnId(3))
        );
    }

    #[test]
    fn first_active_and_closures() {
        let mut matrix = matrix();
        matrix.cover(ColumnId(0));

        assert_eq!(
            FirstActive.choose(ActiveColumns::new(&matrix.links)),
            Some(ColumnId(1))
        );

        let mut last = |columns: ActiveColumns<'_>| columns.last().map(|column| column.id);
        assert_eq!(
            last.choose(ActiveColumns::new(&matrix.links)),
            Some(ColumnId(3))
        );
    }
}
