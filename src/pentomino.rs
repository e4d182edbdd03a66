//! The twelve [pentominoes](https://en.wikipedia.org/wiki/Pentomino) and the
//! classic rectangle tilings built from them.
//!
//! Every tiling of a rectangle has three mirror images that are also tilings.
//! To report each tiling once, the V piece is generated in a single fixed
//! orientation; every other piece may be rotated and reflected freely. Since
//! the V pentomino has exactly four orientations, and the symmetries of a
//! rectangle map them onto each other one to one, exactly one tiling in each
//! group of four keeps V in the fixed orientation.

use crate::polyomino::{PShape, Piece, Polyomino, ShapeTransform};

/// Names of the pentominoes, in the order of [`pieces`].
pub const PIECE_NAMES: [char; 12] = ['f', 'i', 'l', 'n', 'p', 't', 'u', 'v', 'w', 'x', 'y', 'z'];

/// Number of 6x10 tilings with V in its fixed orientation (9356 in total).
pub const SOLUTIONS_6X10: usize = 2339;

/// Number of 3x20 tilings with V in its fixed orientation (8 in total).
pub const SOLUTIONS_3X20: usize = 2;

/// Return the twelve pentominoes, V restricted to one orientation.
pub fn pieces() -> Vec<Piece> {
    use ShapeTransform::{FullSymmetry, NoTransform};

    let shapes: [(char, PShape, ShapeTransform); 12] = [
        ('f', PShape::from([[0, 1, 1], [1, 1, 0], [0, 1, 0]]), FullSymmetry),
        ('i', PShape::from([[1, 1, 1, 1, 1]]), FullSymmetry),
        ('l', PShape::from([[1, 0], [1, 0], [1, 0], [1, 1]]), FullSymmetry),
        ('n', PShape::from([[0, 1], [1, 1], [1, 0], [1, 0]]), FullSymmetry),
        ('p', PShape::from([[1, 1], [1, 1], [1, 0]]), FullSymmetry),
        ('t', PShape::from([[1, 1, 1], [0, 1, 0], [0, 1, 0]]), FullSymmetry),
        ('u', PShape::from([[1, 0, 1], [1, 1, 1]]), FullSymmetry),
        ('v', PShape::from([[1, 0, 0], [1, 0, 0], [1, 1, 1]]), NoTransform),
        ('w', PShape::from([[1, 0, 0], [1, 1, 0], [0, 1, 1]]), FullSymmetry),
        ('x', PShape::from([[0, 1, 0], [1, 1, 1], [0, 1, 0]]), FullSymmetry),
        ('y', PShape::from([[0, 1], [1, 1], [0, 1], [0, 1]]), FullSymmetry),
        ('z', PShape::from([[1, 1, 0], [0, 1, 0], [0, 1, 1]]), FullSymmetry),
    ];

    shapes
        .into_iter()
        .map(|(name, shape, transform)| Piece::new(name, shape, transform))
        .collect()
}

/// Tiling of a `rows` x `columns` board with the twelve pentominoes.
///
/// # Panics
///
/// Panics if a dimension is zero.
pub fn board(rows: usize, columns: usize) -> Polyomino {
    Polyomino::new((rows, columns), pieces())
}
