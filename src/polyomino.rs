//! A [Polyomino tiling puzzle](https://en.wikipedia.org/wiki/Polyomino#Tiling_with_polyominoes)
//! asks for a tiling of a rectangular board with a set of pieces, each used
//! exactly once, without overlaps or gaps.
//!
//! The exact cover encoding has one column per piece and one per board
//! square, and one row per placement of a piece in one of its allowed
//! orientations.

use crate::ExactCover;

/// Shape of a single polyomino, encoded as a binary mask of `height * width`
/// elements stored row after row: the element of row `i` and column `j` is at
/// index `i * width + j`. `1` is a filled square, `0` an empty one.
#[derive(Debug, PartialEq, Eq, Clone, PartialOrd, Ord)]
pub struct PShape {
    /// Width of polyomino
    pub width: usize,
    /// Binary mask encoded in row-first manner.
    pub mask: Vec<u8>,
}

impl PShape {
    /// Create a new `PShape` from a mask of the given width.
    ///
    /// Empty rows and columns around the filled squares are cut off, so the
    /// stored width and mask may be smaller than the ones given.
    ///
    /// # Panics
    ///
    /// Panics if the width is zero, the mask is empty, the mask length is not
    /// a multiple of the width, or the mask has no filled square.
    pub fn new(init_width: usize, init_mask: Vec<u8>) -> Self {
        assert!(init_width != 0, "Width of shape must be non-zero.");
        assert!(!init_mask.is_empty(), "Mask cannot be empty.");
        assert!(
            init_mask.len() % init_width == 0,
            "Mask with incorrect length - incorrect number of elements supplied."
        );

        let filled = || {
            init_mask
                .iter()
                .enumerate()
                .filter(|(_, square)| **square != 0)
                .map(|(index, _)| (index / init_width, index % init_width))
        };

        let top = filled().map(|(row, _)| row).min();
        let Some(top) = top else {
            panic!("No ones found - PShape mask empty!");
        };
        let bottom = filled().map(|(row, _)| row).max().unwrap_or(top);
        let left = filled().map(|(_, col)| col).min().unwrap_or(0);
        let right = filled().map(|(_, col)| col).max().unwrap_or(left);

        let width = right - left + 1;
        let mask = (top..=bottom)
            .flat_map(|row| {
                init_mask[row * init_width + left..=row * init_width + right]
                    .iter()
                    .copied()
            })
            .collect();

        Self { width, mask }
    }

    /// Get PShape width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get PShape height.
    pub fn height(&self) -> usize {
        self.mask.len() / self.width
    }

    /// Number of filled squares.
    pub fn area(&self) -> usize {
        self.mask.iter().filter(|square| **square != 0).count()
    }

    /// Return the shape turned a quarter turn clockwise.
    pub fn rotate(&self) -> PShape {
        let (rows, cols) = (self.height(), self.width());

        let rotated = (0..cols)
            .flat_map(|c| (0..rows).rev().map(move |r| (r, c)))
            .map(|(r, c)| self.mask[r * cols + c])
            .collect();
        PShape::new(rows, rotated)
    }

    /// Return the shape mirrored top to bottom.
    pub fn reflect(&self) -> PShape {
        let reflected = self
            .mask
            .chunks(self.width)
            .rev()
            .flatten()
            .copied()
            .collect();
        PShape::new(self.width, reflected)
    }

    /// Filled squares as `(row, column)` offsets from the top left corner.
    pub fn squares(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, square)| **square != 0)
            .map(|(index, _)| (index / self.width, index % self.width))
    }
}

impl<const W: usize, const H: usize> From<[[u8; W]; H]> for PShape {
    fn from(arr: [[u8; W]; H]) -> Self {
        Self::new(W, arr.iter().flatten().copied().collect())
    }
}

/// Available transformations for polyomino shapes during tiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTransform {
    /// No transformation applied to the shape.
    NoTransform,
    /// Allow rotations of the shape.
    PureRotation,
    /// Allow rotations and reflections of the shape.
    FullSymmetry,
}

impl ShapeTransform {
    /// Return the distinct orientations of `shape` allowed by this
    /// transformation, sorted.
    pub fn orientations(self, shape: &PShape) -> Vec<PShape> {
        let mut orientations = vec![shape.clone()];

        if self != ShapeTransform::NoTransform {
            for _ in 0..3 {
                let next = orientations[orientations.len() - 1].rotate();
                orientations.push(next);
            }
        }
        if self == ShapeTransform::FullSymmetry {
            let reflections: Vec<_> = orientations.iter().map(PShape::reflect).collect();
            orientations.extend(reflections);
        }

        orientations.sort();
        orientations.dedup();
        orientations
    }
}

/// A named piece together with the orientations it may be placed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Letter used for the piece when a board is drawn.
    pub name: char,
    /// Shape of the piece in its reference orientation.
    pub shape: PShape,
    /// Orientations allowed for this piece.
    pub transform: ShapeTransform,
}

impl Piece {
    /// Create a piece.
    pub fn new(name: char, shape: impl Into<PShape>, transform: ShapeTransform) -> Self {
        Piece {
            name,
            shape: shape.into(),
            transform,
        }
    }
}

/// Instance of a polyomino tiling puzzle.
#[derive(Debug)]
pub struct Polyomino {
    /// The list of possible placements of pieces on the board.
    pub possibilities: Vec<Possibility>,
    /// The list of constraints that must be satisfied.
    pub constraints: Vec<Constraint>,
    /// The dimensions of the board, as `(rows, columns)`.
    pub grid_dimensions: (usize, usize),
    /// The pieces to place.
    pub pieces: Vec<Piece>,
}

impl Polyomino {
    /// Create a new instance of the tiling puzzle for the given board and
    /// pieces.
    ///
    /// # Panics
    ///
    /// Panics if a board dimension is zero or there are no pieces.
    pub fn new(grid_dimensions: (usize, usize), pieces: Vec<Piece>) -> Self {
        assert!(
            grid_dimensions.0 > 0 && grid_dimensions.1 > 0,
            "Grid dimensions must be positive."
        );
        assert!(!pieces.is_empty(), "Piece list cannot be empty.");

        let possibilities: Vec<Possibility> = pieces
            .iter()
            .enumerate()
            .flat_map(|(piece_index, piece)| {
                piece
                    .transform
                    .orientations(&piece.shape)
                    .into_iter()
                    .flat_map(move |orientation| {
                        Self::placements(&orientation, grid_dimensions)
                            .map(|cells| Possibility { piece_index, cells })
                            .collect::<Vec<_>>()
                    })
            })
            .collect();
        let constraints: Vec<Constraint> =
            Constraint::all(grid_dimensions, pieces.len()).collect();

        log::debug!(
            "Generated [{}] placements for [{}] pieces on a [{}x{}] board.",
            possibilities.len(),
            pieces.len(),
            grid_dimensions.0,
            grid_dimensions.1
        );

        Self {
            possibilities,
            constraints,
            grid_dimensions,
            pieces,
        }
    }

    /// Every translation of `shape` that fits on the board, as lists of
    /// occupied squares, top to bottom then left to right.
    fn placements(
        shape: &PShape,
        (rows, cols): (usize, usize),
    ) -> impl Iterator<Item = Vec<(usize, usize)>> + '_ {
        let row_range = 0..(rows + 1).saturating_sub(shape.height());
        let col_range = 0..(cols + 1).saturating_sub(shape.width());

        row_range
            .flat_map(move |row| col_range.clone().map(move |col| (row, col)))
            .map(move |(row, col)| {
                shape
                    .squares()
                    .map(|(r, c)| (row + r, col + c))
                    .collect()
            })
    }

    /// Draw a (partial) solution: one line per board row, each square shown
    /// as the name of the piece covering it, or `-` if uncovered.
    pub fn render(&self, solution: &[&Possibility]) -> String {
        let (rows, cols) = self.grid_dimensions;
        let mut board = vec![vec!['-'; cols]; rows];

        for poss in solution {
            let name = self.pieces[poss.piece_index].name;
            for &(row, col) in &poss.cells {
                board[row][col] = name;
            }
        }

        board
            .into_iter()
            .map(|line| line.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ExactCover for Polyomino {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.satisfies(cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// A placement of one piece on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// Index of the piece in the puzzle's list of pieces.
    pub piece_index: usize,
    /// Board squares covered by the piece, as `(row, column)`.
    pub cells: Vec<(usize, usize)>,
}

impl Possibility {
    /// Check if this possibility satisfies a given constraint.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Piece(index) => self.piece_index == *index,
            Constraint::Square(row, col) => self.cells.contains(&(*row, *col)),
        }
    }

    /// Return an iterator over all `Constraint`s that are satisfied by this
    /// `Possibility`.
    pub fn satisfied_constraints(&self) -> impl Iterator<Item = Constraint> + '_ {
        std::iter::once(Constraint::Piece(self.piece_index)).chain(
            self.cells
                .iter()
                .map(|&(row, col)| Constraint::Square(row, col)),
        )
    }
}

/// A condition that must be satisfied in order to solve a tiling puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// The piece with this index must be placed.
    Piece(usize),
    /// The board square at `(row, column)` must be covered.
    Square(usize, usize),
}

impl Constraint {
    /// Return an iterator over all `Constraint`s for a board size and number
    /// of pieces: pieces first, then squares in row-major order.
    pub fn all(grid_size: (usize, usize), piece_count: usize) -> impl Iterator<Item = Constraint> {
        let piece_it = (0..piece_count).map(Constraint::Piece);
        let square_it = (0..grid_size.0)
            .flat_map(move |row| (0..grid_size.1).map(move |col| Constraint::Square(row, col)));

        piece_it.chain(square_it)
    }
}
