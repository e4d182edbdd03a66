#![deny(missing_docs)]

//! Implementation of [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! and [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) for solving
//! [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problems.
//!
//! The sparse matrix lives in a single arena of cells linked by index, so
//! covering and uncovering a column are plain index splices that can be undone
//! exactly. The search keeps its own explicit stack instead of recursing, which
//! makes it resumable (a [`Solver`] is an [`Iterator`] over solutions) and
//! lets it put the matrix back together whenever it stops early.
//!
//! ```
//! use dlx_cover::Matrix;
//!
//! let mut matrix: Matrix<String> = "A 1001001
//!                                   B 1001000
//!                                   C 0001101
//!                                   D 0010110
//!                                   E 0110011
//!                                   F 0100001"
//!     .parse()
//!     .unwrap();
//!
//! let solutions = matrix.all_solutions();
//! assert_eq!(solutions, vec![vec!["B", "D", "F"]]);
//! ```

pub mod chooser;
pub mod error;
pub(crate) mod matrix;
pub mod pentomino;
pub mod polyomino;
pub mod sink;
pub(crate) mod solver;
pub mod text;

pub use chooser::{ColumnChooser, FirstActive, MinSize};
pub use error::{IntegrityError, MatrixError};
pub use matrix::{ColumnId, Matrix, MatrixBuilder, RowId};
pub use sink::{CollectSolutions, CountSolutions, Limit, SolutionSink};
pub use solver::{IntegrityChecks, SearchOptions, SearchSummary, Solver};

/// An instance of an exact cover problem.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug;

    /// Return true if the given `Possibility` will satisfy the given
    /// `Constraint`.
    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Build the sparse matrix of this problem: one column per constraint,
    /// named by its `Debug` form, and one row per possibility.
    ///
    /// # Errors
    ///
    /// Fails if there are no constraints or two constraints print the same.
    fn matrix(&self) -> Result<Matrix<&Self::Possibility>, MatrixError> {
        let constraints = self.constraints();

        let rows = self.possibilities().iter().map(|poss| {
            let columns: Vec<usize> = constraints
                .iter()
                .enumerate()
                .filter(|(_, cons)| self.satisfies(poss, cons))
                .map(|(index, _)| index)
                .collect();
            (poss, columns)
        });

        Matrix::new(constraints.iter().map(|cons| format!("{cons:?}")), rows)
    }

    /// Return all solutions to this instance of the exact cover problem.
    fn solutions(&self) -> Result<Vec<Vec<&Self::Possibility>>, MatrixError> {
        let mut matrix = self.matrix()?;
        let solutions: Vec<Vec<&Self::Possibility>> = matrix
            .solver()
            .map(|solution| solution.into_iter().copied().collect())
            .collect();

        Ok(solutions)
    }

    /// Return the number of solutions, without keeping them.
    fn count_solutions(&self) -> Result<usize, MatrixError> {
        let mut count = CountSolutions::default();
        self.matrix()?.search(&mut count);

        Ok(count.count)
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::satisfies(self, poss, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }
}
