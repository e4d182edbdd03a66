mod common;

use common::{init_logging, WIKI_MATRIX};
use dlx_cover::{
    text, ColumnId, CountSolutions, FirstActive, IntegrityChecks, Limit, Matrix, MatrixError,
    SearchOptions,
};
use std::ops::ControlFlow;

#[test]
fn wiki_example_has_single_cover() {
    init_logging();

    let mut matrix = text::parse(WIKI_MATRIX).unwrap();
    log::debug!("Parsed wiki matrix with [{}] cells.", matrix.num_cells());

    let solutions = matrix.all_solutions();
    assert_eq!(solutions.len(), 1);

    let mut names: Vec<&str> = solutions[0].iter().map(|name| name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["B", "D", "F"]);
}

#[test]
fn wiki_example_with_named_columns() {
    let mut matrix = Matrix::new(
        ["1", "2", "3", "4", "5", "6", "7"],
        [
            ('A', vec![0usize, 3, 6]),
            ('B', vec![0, 3]),
            ('C', vec![3, 4, 6]),
            ('D', vec![2, 4, 5]),
            ('E', vec![1, 2, 5, 6]),
            ('F', vec![1, 6]),
        ],
    )
    .unwrap();

    let summary = matrix
        .solver_with(FirstActive)
        .with_options(SearchOptions::default().integrity_checks(IntegrityChecks::EveryBacktrack))
        .search(&mut |rows: &[&char]| {
            let mut rows: Vec<char> = rows.iter().map(|row| **row).collect();
            rows.sort_unstable();
            assert_eq!(rows, vec!['B', 'D', 'F']);
            ControlFlow::Continue(())
        });

    assert_eq!(summary.solutions, 1);
    assert!(!summary.cancelled);
}

#[test]
fn link_state_survives_every_single_cover() {
    let pristine = text::parse(WIKI_MATRIX).unwrap();

    for column in pristine.active_columns() {
        let mut matrix = pristine.clone();
        matrix.cover(column);
        matrix.verify().unwrap();
        assert!(matrix.active_columns().all(|active| active != column));

        matrix.uncover(column);
        matrix.verify().unwrap();
        for index in 0..matrix.num_columns() {
            assert_eq!(
                matrix.column_size(ColumnId(index)),
                pristine.column_size(ColumnId(index))
            );
        }
        assert_eq!(
            matrix.active_columns().collect::<Vec<_>>(),
            pristine.active_columns().collect::<Vec<_>>()
        );
    }
}

#[test]
fn search_can_run_again_after_completion() {
    let mut matrix = text::parse(WIKI_MATRIX).unwrap();

    let mut first = CountSolutions::default();
    let mut second = CountSolutions::default();
    matrix.search(&mut first);
    matrix.search(&mut second);

    assert_eq!(first, second);
    assert_eq!(first.count, 1);
    matrix.verify().unwrap();
}

#[test]
fn limited_search_on_many_solutions() {
    // Every row covers a single column, two rows per column: 2^4 covers.
    let text = "a0 1000\nb0 1000\na1 0100\nb1 0100\na2 0010\nb2 0010\na3 0001\nb3 0001";
    let mut matrix = text::parse(text).unwrap();

    assert_eq!(matrix.solver().count(), 16);

    let mut limited = Limit::new(CountSolutions::default(), 5);
    let summary = matrix.search(&mut limited);
    assert!(summary.cancelled);
    assert_eq!(limited.into_inner().count, 5);
    matrix.verify().unwrap();
    assert_eq!(matrix.active_columns().count(), 4);
}

#[test]
fn empty_column_means_no_solution() {
    let mut matrix = text::parse("a 110\nb 010\nc 100").unwrap();

    let summary = matrix.search(&mut CountSolutions::default());
    assert_eq!(summary.solutions, 0);
    assert_eq!(summary.dead_ends, 1);
}

#[test]
fn single_row_covers_all() {
    let mut matrix = text::parse("only 11111").unwrap();

    let solutions = matrix.all_solutions();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0], vec!["only"]);
}

#[test]
fn malformed_text_is_rejected() {
    assert_eq!(
        text::parse("A 1001001\nB 100100").unwrap_err(),
        MatrixError::InconsistentWidth {
            line: 2,
            expected: 7,
            found: 6
        }
    );
    assert!(matches!(
        "A 10201".parse::<Matrix<String>>(),
        Err(MatrixError::InvalidCharacter { character: '2', .. })
    ));
}
