//! Plain text encoding of a sparse matrix.
//!
//! # Expected Format
//!  - One row per line: `<row-name> <bitstring>`, separated by whitespace.
//!  - The bitstring holds one `0` or `1` per column; a `1` at position `i`
//!    means the row includes column `i`.
//!  - Every bitstring has the width of the first one.
//!  - Columns are named by their position: `"0"`, `"1"`, ...
//!  - Surrounding whitespace and blank lines are ignored.
//!
//! ```text
//! A 1001001
//! B 1001000
//! C 0001101
//! ```

use crate::{error::MatrixError, matrix::MatrixBuilder, Matrix};
use std::str::FromStr;

/// Parse the text encoding into a matrix whose rows are identified by name.
///
/// # Errors
///
/// Returns a [`MatrixError`] describing the first malformed line. Nothing is
/// linked unless the whole input is valid.
pub fn parse(input: &str) -> Result<Matrix<String>, MatrixError> {
    let mut builder: Option<MatrixBuilder<String>> = None;
    let mut width = 0;

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(name), Some(bits), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(MatrixError::MalformedLine { line: line_number });
        };

        let builder = builder.get_or_insert_with(|| {
            width = bits.chars().count();
            MatrixBuilder::with_column_count(width)
        });

        let found = bits.chars().count();
        if found != width {
            return Err(MatrixError::InconsistentWidth {
                line: line_number,
                expected: width,
                found,
            });
        }

        let mut columns = Vec::new();
        for (position, character) in bits.chars().enumerate() {
            match character {
                '0' => {}
                '1' => columns.push(position),
                _ => {
                    return Err(MatrixError::InvalidCharacter {
                        line: line_number,
                        position,
                        character,
                    })
                }
            }
        }

        builder.row(name.to_string(), columns);
    }

    builder.ok_or(MatrixError::EmptyInput)?.build()
}

impl FromStr for Matrix<String> {
    type Err = MatrixError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse(input)
    }
}
