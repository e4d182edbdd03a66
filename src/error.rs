//! Errors raised while building a [`Matrix`](crate::Matrix) or while checking
//! its link structure.

use thiserror::Error;

/// Reasons a sparse matrix can be rejected during construction.
///
/// Every check runs before the first cell is linked, so a failed build never
/// leaves a partially linked structure behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix has no columns, so there is nothing to cover.
    #[error("matrix must have at least one column")]
    NoColumns,

    /// Two columns share the same name.
    #[error("duplicate column name [{name}]")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// A row refers to a column index past the end of the header list.
    #[error("row {row} names column {column}, but the matrix has {num_columns} columns")]
    ColumnOutOfRange {
        /// Position of the row in input order.
        row: usize,
        /// The offending column index.
        column: usize,
        /// Number of columns in the matrix.
        num_columns: usize,
    },

    /// A row lists the same column more than once.
    #[error("row {row} names column {column} more than once")]
    DuplicateRowColumn {
        /// Position of the row in input order.
        row: usize,
        /// The repeated column index.
        column: usize,
    },

    /// Bitmask rows were requested for more columns than a mask can hold.
    #[error("bitmask rows support at most 128 columns, got {num_columns}")]
    BitmaskTooWide {
        /// Number of columns requested.
        num_columns: usize,
    },

    /// The text encoding contained no rows.
    #[error("matrix text contains no rows")]
    EmptyInput,

    /// A line of the text encoding is not `<row-name> <bitstring>`.
    #[error("line {line} is not of the form `<row-name> <bitstring>`")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
    },

    /// A bitstring differs in width from the first one.
    #[error("line {line} has {found} columns, expected {expected}")]
    InconsistentWidth {
        /// 1-based line number.
        line: usize,
        /// Width fixed by the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A bitstring holds something other than `0` or `1`.
    #[error("line {line} has invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// 1-based line number.
        line: usize,
        /// 0-based position inside the bitstring.
        position: usize,
        /// The offending character.
        character: char,
    },
}

/// Direction of a link inside the toroidal structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the previous cell of a row (or header ring).
    Left,
    /// Towards the next cell of a row (or header ring).
    Right,
    /// Towards the previous cell of a column.
    Up,
    /// Towards the next cell of a column.
    Down,
}

/// A violated structural invariant of the linked matrix.
///
/// These never occur when covers and uncovers are paired in LIFO order. The
/// solver treats any of them as a fatal defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// Following a link and then the opposite link does not return to the
    /// starting cell.
    #[error("cell {cell} is not linked back from its {direction:?} neighbour")]
    LinkAsymmetry {
        /// Arena index of the cell.
        cell: usize,
        /// The link that was followed.
        direction: Direction,
    },

    /// A member cell does not point at the header of the column it sits in.
    #[error("cell {cell} does not reference the header of its column")]
    WrongHeader {
        /// Arena index of the cell.
        cell: usize,
    },

    /// A header's recorded size differs from the length of its column ring.
    #[error("column {column} records size {recorded}, but {counted} cells are linked")]
    SizeMismatch {
        /// Column index.
        column: usize,
        /// The value held by the header.
        recorded: usize,
        /// Number of cells found by walking the ring.
        counted: usize,
    },

    /// A link points outside the cell arena.
    #[error("cell {cell} links outside the arena")]
    DanglingLink {
        /// Arena index of the cell.
        cell: usize,
    },
}
