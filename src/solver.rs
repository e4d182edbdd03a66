use crate::{
    chooser::{ActiveColumns, ColumnChooser, MinSize},
    matrix::{cell::CellId, Links},
    sink::SolutionSink,
};

/// How often the solver checks the link structure of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityChecks {
    /// Never check.
    Off,
    /// Check once, after the search has finished and every cover has been
    /// undone.
    OnExit,
    /// Check after every backtrack. This walks the whole remaining structure
    /// at every step, so it is only meant for tests and fuzzing.
    EveryBacktrack,
}

impl Default for IntegrityChecks {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            IntegrityChecks::OnExit
        } else {
            IntegrityChecks::Off
        }
    }
}

/// Configuration for a [`Solver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// When to verify the matrix. A failed check panics.
    pub integrity_checks: IntegrityChecks,
}

impl SearchOptions {
    /// Set when the matrix is verified.
    pub fn integrity_checks(mut self, integrity_checks: IntegrityChecks) -> Self {
        self.integrity_checks = integrity_checks;
        self
    }
}

/// Statistics about a search, as far as it has progressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Number of exact covers found. This includes a cover the sink received
    /// but refused, so it can exceed the number of solutions a sink kept.
    pub solutions: usize,
    /// Number of columns chosen to branch on.
    pub nodes: usize,
    /// Number of chosen columns that had no rows left.
    pub dead_ends: usize,
    /// Largest number of rows chosen at the same time.
    pub max_depth: usize,
    /// True if a sink stopped the search before it was exhausted.
    pub cancelled: bool,
}

/// Solver that iteratively returns solutions to exact cover problems.
///
/// The solver borrows the matrix mutably for its whole lifetime. Whenever it
/// stops, whether exhausted, cancelled, reset or dropped half way, every
/// cover it made is undone so the matrix is left as it was found.
#[derive(Debug)]
pub struct Solver<'m, R, C = MinSize> {
    links: &'m mut Links,
    rows: &'m [R],
    chooser: C,
    options: SearchOptions,

    // Values used to track the state of solving
    stack: Vec<Frame>,
    partial_solution: Vec<CellId>,
    started: bool,
    finished: bool,
    summary: SearchSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    // Before covering the current row
    Cover,
    // After the current row was covered and explored, before uncovering
    Uncover,
}

/// One level of the search: a covered column and the row of it currently
/// being tried.
#[derive(Debug)]
struct Frame {
    column: CellId,
    row: CellId,
    state: FrameState,
}

impl<'m, R, C> Solver<'m, R, C>
where
    C: ColumnChooser,
{
    pub(crate) fn new(links: &'m mut Links, rows: &'m [R], chooser: C) -> Self {
        Solver {
            links,
            rows,
            chooser,
            options: SearchOptions::default(),

            stack: Vec::new(),
            partial_solution: Vec::new(),
            started: false,
            finished: false,
            summary: SearchSummary::default(),
        }
    }

    /// Replace the search options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Statistics of the search so far.
    pub fn summary(&self) -> SearchSummary {
        self.summary
    }

    /// Undo all progress and start the search again from the beginning.
    pub fn reset(&mut self) {
        self.unwind();
        self.started = false;
        self.finished = false;
        self.summary = SearchSummary::default();
    }

    /// Return all remaining solutions.
    pub fn all_solutions(&mut self) -> Vec<Vec<&'m R>> {
        self.collect()
    }

    /// Run the search to exhaustion, or until `sink` asks to stop.
    ///
    /// Only solutions not yet returned by [`Solver::next_solution`] are passed
    /// to the sink.
    pub fn search<S>(&mut self, sink: &mut S) -> SearchSummary
    where
        S: SolutionSink<R> + ?Sized,
    {
        while let Some(solution) = self.next_solution() {
            if sink.solution(&solution).is_break() {
                self.unwind();
                self.summary.cancelled = true;
                log::info!(
                    "Search cancelled by sink after [{}] solutions.",
                    self.summary.solutions
                );
                self.finish();
                break;
            }
        }

        self.summary
    }

    /// Compute up to the next solution, returning `None` if there are no more.
    ///
    /// The rows of a solution are listed in the order they were chosen.
    pub fn next_solution(&mut self) -> Option<Vec<&'m R>> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;

            if self.links.is_solved() {
                // Nothing left to cover, so the empty selection is the only
                // solution.
                self.summary.solutions += 1;
                self.finish();
                return Some(Vec::new());
            }

            self.descend();
        }

        while let Some(frame) = self.stack.last_mut() {
            match frame.state {
                // Add the current row to the solution and cover every other
                // column it touches, then either report or go one level deeper.
                FrameState::Cover => {
                    let row = frame.row;
                    frame.state = FrameState::Uncover;

                    self.partial_solution.push(row);
                    self.summary.max_depth =
                        self.summary.max_depth.max(self.partial_solution.len());
                    self.links.cover_row(row);

                    if self.links.is_solved() {
                        self.summary.solutions += 1;
                        log::trace!(
                            "Found solution [{}] at depth [{}].",
                            self.summary.solutions,
                            self.partial_solution.len()
                        );

                        return Some(self.current_solution());
                    }

                    self.descend();
                }
                // Undo the current row and move on to the next one, or give
                // the column back once all of its rows have been tried.
                FrameState::Uncover => {
                    let (column, row) = (frame.column, frame.row);

                    self.links.uncover_row(row);
                    self.partial_solution.pop();

                    // The next row is read from the live ring, which is back in
                    // the state it had before `row` was covered.
                    let next = self.links.cells[row].down;
                    if next == column {
                        self.stack.pop();
                        self.links.uncover(column);
                    } else {
                        frame.row = next;
                        frame.state = FrameState::Cover;
                    }

                    if self.options.integrity_checks == IntegrityChecks::EveryBacktrack {
                        self.check_integrity("backtracking");
                    }
                }
            }
        }

        self.finish();
        None
    }

    /// Choose a column, cover it and push a frame for its first row. A column
    /// without rows is uncovered again straight away.
    fn descend(&mut self) {
        let column = self
            .chooser
            .choose(ActiveColumns::new(&*self.links))
            .expect("column chooser returned no column while columns remain");
        let header = column.header();
        assert!(
            self.links.is_active(header),
            "column chooser picked column {column}, which is not active"
        );

        self.summary.nodes += 1;
        log::trace!(
            "Depth [{}]: covering column [{}] with size [{}].",
            self.partial_solution.len(),
            column,
            self.links.cells[header].size
        );

        self.links.cover(header);

        let first = self.links.cells[header].down;
        if first == header {
            self.summary.dead_ends += 1;
            self.links.uncover(header);
        } else {
            self.stack.push(Frame {
                column: header,
                row: first,
                state: FrameState::Cover,
            });
        }
    }

    fn current_solution(&self) -> Vec<&'m R> {
        let rows = self.rows;

        self.partial_solution
            .iter()
            .map(|cell| {
                let row = self.links.cells[*cell]
                    .row
                    .expect("chosen cell belongs to a row");
                &rows[row.0]
            })
            .collect()
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        log::debug!(
            "Search finished with [{}] solutions, [{}] nodes, [{}] dead ends and max depth [{}].",
            self.summary.solutions,
            self.summary.nodes,
            self.summary.dead_ends,
            self.summary.max_depth
        );

        if self.options.integrity_checks != IntegrityChecks::Off {
            self.check_integrity("finishing the search");
        }
    }

    fn check_integrity(&self, during: &str) {
        if let Err(error) = self.links.verify() {
            panic!("matrix corrupted while {during}: {error}");
        }
    }
}

impl<R, C> Solver<'_, R, C> {
    /// Pop every frame, undoing its row and column covers in LIFO order.
    fn unwind(&mut self) {
        while let Some(frame) = self.stack.pop() {
            if frame.state == FrameState::Uncover {
                self.links.uncover_row(frame.row);
                self.partial_solution.pop();
            }
            self.links.uncover(frame.column);
        }

        debug_assert!(self.partial_solution.is_empty());
    }
}

impl<R, C> Drop for Solver<'_, R, C> {
    fn drop(&mut self) {
        self.unwind();
    }
}

impl<'m, R, C> Iterator for Solver<'m, R, C>
where
    C: ColumnChooser,
{
    type Item = Vec<&'m R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chooser::FirstActive,
        sink::{CollectSolutions, CountSolutions, Limit},
        ColumnId, Matrix,
    };
    use std::ops::ControlFlow;

    fn wiki() -> Matrix<char> {
        Matrix::with_column_count(
            7,
            [
                ('A', vec![0usize, 3, 6]),
                ('B', vec![0, 3]),
                ('C', vec![3, 4, 6]),
                ('D', vec![2, 4, 5]),
                ('E', vec![1, 2, 5, 6]),
                ('F', vec![1, 6]),
            ],
        )
        .unwrap()
    }

    /// Three columns, where every subset partition of size one or two exists.
    fn partitions() -> Matrix<&'static str> {
        Matrix::with_column_count(
            3,
            [
                ("abc", vec![0usize, 1, 2]),
                ("ab", vec![0, 1]),
                ("c", vec![2]),
                ("a", vec![0]),
                ("bc", vec![1, 2]),
                ("b", vec![1]),
                ("ac", vec![0, 2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn wiki_has_one_solution_in_choice_order() {
        let mut matrix = wiki();
        let pristine = matrix.links.clone();

        let solutions = matrix.all_solutions();
        // Column 0 (size 2) is chosen first, B is the row that survives, then
        // column 4 picks D, then F is the only row for what is left.
        assert_eq!(solutions, vec![vec![&'B', &'D', &'F']]);
        assert_eq!(matrix.links, pristine);
    }

    #[test]
    fn summary_counts_progress() {
        let mut matrix = wiki();
        let mut count = CountSolutions::default();

        let summary = matrix.search(&mut count);
        assert_eq!(count.count, 1);
        assert_eq!(summary.solutions, 1);
        assert_eq!(summary.max_depth, 3);
        assert!(summary.dead_ends >= 1);
        assert!(!summary.cancelled);
    }

    #[test]
    fn finds_every_partition() {
        let mut matrix = partitions();

        let mut solutions: Vec<Vec<&str>> = matrix
            .all_solutions()
            .into_iter()
            .map(|solution| {
                let mut rows: Vec<&str> = solution.into_iter().copied().collect();
                rows.sort_unstable();
                rows
            })
            .collect();
        solutions.sort();

        assert_eq!(
            solutions,
            vec![
                vec!["a", "b", "c"],
                vec!["a", "bc"],
                vec!["ab", "c"],
                vec!["abc"],
                vec!["ac", "b"],
            ]
        );
    }

    #[test]
    fn chooser_changes_order_not_solutions() {
        let mut matrix = partitions();

        let mut by_size: Vec<Vec<&str>> = matrix
            .solver()
            .map(|solution| solution.into_iter().copied().collect())
            .collect();
        let mut leftmost: Vec<Vec<&str>> = matrix
            .solver_with(FirstActive)
            .map(|solution| solution.into_iter().copied().collect())
            .collect();

        for solution in by_size.iter_mut().chain(leftmost.iter_mut()) {
            solution.sort_unstable();
        }
        by_size.sort();
        leftmost.sort();
        assert_eq!(by_size, leftmost);
    }

    #[test]
    fn cancelled_search_restores_matrix() {
        let mut matrix = partitions();
        let pristine = matrix.links.clone();

        let mut limited = Limit::new(CollectSolutions::default(), 2);
        let summary = matrix
            .solver()
            .with_options(
                SearchOptions::default().integrity_checks(IntegrityChecks::EveryBacktrack),
            )
            .search(&mut limited);

        assert!(summary.cancelled);
        assert_eq!(summary.solutions, 2);
        assert_eq!(limited.into_inner().solutions.len(), 2);
        assert_eq!(matrix.links, pristine);
    }

    #[test]
    fn zero_limit_counts_found_but_forwards_nothing() {
        let mut matrix = partitions();
        let pristine = matrix.links.clone();

        let mut limited = Limit::new(CountSolutions::default(), 0);
        let summary = matrix.search(&mut limited);

        assert!(summary.cancelled);
        assert_eq!(summary.solutions, 1);
        assert_eq!(limited.into_inner().count, 0);
        assert_eq!(matrix.links, pristine);
    }

    #[test]
    fn closure_sink_can_stop_immediately() {
        let mut matrix = partitions();
        let pristine = matrix.links.clone();
        let mut seen = Vec::new();

        let summary = matrix.search(&mut |rows: &[&&str]| {
            seen.push(rows.len());
            ControlFlow::Break(())
        });

        assert!(summary.cancelled);
        assert_eq!(seen.len(), 1);
        assert_eq!(matrix.links, pristine);
    }

    #[test]
    fn dropping_a_partial_iterator_restores_matrix() {
        let mut matrix = partitions();
        let pristine = matrix.links.clone();

        {
            let mut solver = matrix.solver();
            assert!(solver.next().is_some());
            // A solution leaves every column covered.
            assert!(solver.links.is_solved());
        }

        assert_eq!(matrix.links, pristine);
        matrix.verify().unwrap();
    }

    #[test]
    fn reset_starts_over() {
        let mut matrix = partitions();
        let mut solver = matrix.solver();

        let first = solver.next_solution();
        assert!(solver.next_solution().is_some());
        solver.reset();
        assert_eq!(solver.next_solution(), first);
        assert_eq!(solver.count(), 4);
    }

    #[test]
    fn uncoverable_column_yields_nothing() {
        let mut matrix = Matrix::with_column_count(
            3,
            [("a", vec![0usize, 1]), ("b", vec![1]), ("c", vec![0])],
        )
        .unwrap();

        let mut solver = matrix.solver();
        assert_eq!(solver.next_solution(), None);
        let summary = solver.summary();
        assert_eq!(summary.solutions, 0);
        // Column 2 has no rows, so the very first choice is a dead end.
        assert_eq!(summary.nodes, 1);
        assert_eq!(summary.dead_ends, 1);
    }

    #[test]
    fn single_row_covering_everything() {
        let mut matrix =
            Matrix::from_bitmasks(5, [("all", 0b11111u128), ("some", 0b00101)]).unwrap();

        assert_eq!(matrix.all_solutions(), vec![vec![&"all"]]);
    }

    #[test]
    fn already_solved_matrix_reports_empty_solution() {
        let mut matrix = Matrix::with_column_count(1, [("a", vec![0usize])]).unwrap();
        matrix.cover(ColumnId(0));

        let solutions: Vec<Vec<&&str>> = matrix.solver().collect();
        assert_eq!(solutions, vec![Vec::<&&str>::new()]);

        matrix.uncover(ColumnId(0));
        matrix.verify().unwrap();
    }

    #[test]
    #[should_panic(expected = "which is not active")]
    fn chooser_must_pick_active_column() {
        let mut matrix = partitions();
        matrix.cover(ColumnId(0));

        let _ = matrix
            .solver_with(|_: ActiveColumns<'_>| Some(ColumnId(0)))
            .next_solution();
    }
}
