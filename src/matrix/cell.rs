use crate::RowId;

/// Index of a cell inside the matrix arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CellId(pub(crate) usize);

/// The root sentinel always occupies the first slot of the arena.
pub(crate) const ROOT: CellId = CellId(0);

/// A node of the toroidal structure, either a column header (or the root) or
/// a row-membership cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) left: CellId,
    pub(crate) right: CellId,
    pub(crate) up: CellId,
    pub(crate) down: CellId,

    /// Owning column header. Headers and the root point at themselves.
    pub(crate) header: CellId,
    /// Row this cell belongs to, `None` for headers and the root.
    pub(crate) row: Option<RowId>,
    /// Number of member cells currently linked below a header. Unused on
    /// member cells.
    pub(crate) size: usize,
}

impl Cell {
    /// A cell whose four links all point back at itself.
    pub(crate) fn self_linked(id: CellId, header: CellId, row: Option<RowId>) -> Self {
        Cell {
            left: id,
            right: id,
            up: id,
            down: id,
            header,
            row,
            size: 0,
        }
    }
}

/// Arena of cells. Links are indices into `cells`, so every splice is a pair
/// of plain index writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cells {
    cells: Vec<Cell>,
}

impl Cells {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Cells {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Push a fresh self-linked cell and return its index.
    pub(crate) fn alloc(&mut self, header: Option<CellId>, row: Option<RowId>) -> CellId {
        let id = CellId(self.cells.len());
        self.cells
            .push(Cell::self_linked(id, header.unwrap_or(id), row));
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

impl std::ops::Index<CellId> for Cells {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }
}

impl std::ops::IndexMut<CellId> for Cells {
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }
}

// NOTE: each splice reads both neighbours before writing either. When the two
// neighbours are the same cell (a ring of two), the writes still land on the
// correct fields.
impl Cells {
    /// Splice `id` out of its horizontal ring, leaving its own links intact.
    pub(crate) fn cover_horizontal(&mut self, id: CellId) {
        let Cell { left, right, .. } = self[id];

        self[left].right = right;
        self[right].left = left;
    }

    /// Splice `id` out of its vertical ring, leaving its own links intact.
    pub(crate) fn cover_vertical(&mut self, id: CellId) {
        let Cell { up, down, .. } = self[id];

        self[up].down = down;
        self[down].up = up;
    }

    /// Relink `id` between the neighbours it remembers.
    pub(crate) fn uncover_horizontal(&mut self, id: CellId) {
        let Cell { left, right, .. } = self[id];

        self[left].right = id;
        self[right].left = id;
    }

    /// Relink `id` between the neighbours it remembers.
    pub(crate) fn uncover_vertical(&mut self, id: CellId) {
        let Cell { up, down, .. } = self[id];

        self[up].down = id;
        self[down].up = id;
    }
}

macro_rules! add_direction {
    ($name:ident, $direction:ident, $opposite:ident) => {
        /// Insert `neighbor` into the ring of `id`, directly on this side of
        /// `id`.
        pub(crate) fn $name(&mut self, id: CellId, neighbor: CellId) {
            let old = self[id].$direction;

            self[neighbor].$direction = old;
            self[neighbor].$opposite = id;
            self[old].$opposite = neighbor;
            self[id].$direction = neighbor;
        }
    };
}

impl Cells {
    add_direction!(add_above, up, down);

    add_direction!(add_left, left, right);
}

/// Walkers over the rings of a cell. None of them yield the starting cell.
pub(crate) mod iter {
    use super::{Cell, CellId, Cells};

    #[cfg(test)]
    pub(crate) fn up(cells: &Cells, original: CellId) -> RingIter<'_> {
        RingIter::new(cells, original, |cell| cell.up)
    }

    pub(crate) fn down(cells: &Cells, original: CellId) -> RingIter<'_> {
        RingIter::new(cells, original, |cell| cell.down)
    }

    #[cfg(test)]
    pub(crate) fn left(cells: &Cells, original: CellId) -> RingIter<'_> {
        RingIter::new(cells, original, |cell| cell.left)
    }

    pub(crate) fn right(cells: &Cells, original: CellId) -> RingIter<'_> {
        RingIter::new(cells, original, |cell| cell.right)
    }

    #[derive(Debug, Clone)]
    pub(crate) struct RingIter<'c> {
        cells: &'c Cells,
        original: CellId,
        current: CellId,
        direction: fn(&Cell) -> CellId,
    }

    impl<'c> RingIter<'c> {
        fn new(cells: &'c Cells, original: CellId, direction: fn(&Cell) -> CellId) -> Self {
            RingIter {
                cells,
                original,
                current: original,
                direction,
            }
        }
    }

    impl Iterator for RingIter<'_> {
        type Item = CellId;

        fn next(&mut self) -> Option<Self::Item> {
            let next = (self.direction)(&self.cells[self.current]);

            if next == self.original {
                None
            } else {
                self.current = next;
                Some(next)
            }
        }
    }
}
