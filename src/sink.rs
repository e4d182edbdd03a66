//! Receivers for the solutions found by a search.
//!
//! A sink sees the identifiers of the chosen rows, in the order they were
//! chosen, once per exact cover. Returning [`ControlFlow::Break`] stops the
//! search; the solver then restores the matrix before returning.

use std::ops::ControlFlow;

/// Receives each exact cover found by a search.
pub trait SolutionSink<R> {
    /// Handle one solution. `rows` holds the chosen rows, shallowest choice
    /// first.
    fn solution(&mut self, rows: &[&R]) -> ControlFlow<()>;
}

impl<R, F> SolutionSink<R> for F
where
    F: FnMut(&[&R]) -> ControlFlow<()>,
{
    fn solution(&mut self, rows: &[&R]) -> ControlFlow<()> {
        self(rows)
    }
}

/// Counts solutions without looking at them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountSolutions {
    /// Number of solutions seen so far.
    pub count: usize,
}

impl<R> SolutionSink<R> for CountSolutions {
    fn solution(&mut self, _rows: &[&R]) -> ControlFlow<()> {
        self.count += 1;
        ControlFlow::Continue(())
    }
}

/// Keeps an owned copy of every solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectSolutions<R> {
    /// Solutions seen so far, in search order.
    pub solutions: Vec<Vec<R>>,
}

impl<R> Default for CollectSolutions<R> {
    fn default() -> Self {
        CollectSolutions {
            solutions: Vec::new(),
        }
    }
}

impl<R: Clone> SolutionSink<R> for CollectSolutions<R> {
    fn solution(&mut self, rows: &[&R]) -> ControlFlow<()> {
        self.solutions
            .push(rows.iter().map(|row| (*row).clone()).collect());
        ControlFlow::Continue(())
    }
}

/// Forwards at most `limit` solutions to another sink, then stops the search.
///
/// With a limit of `0` the first solution found is refused and nothing is
/// forwarded.
#[derive(Debug, Clone)]
pub struct Limit<S> {
    inner: S,
    remaining: usize,
}

impl<S> Limit<S> {
    /// Wrap `inner` so that it receives at most `limit` solutions.
    pub fn new(inner: S, limit: usize) -> Self {
        Limit {
            inner,
            remaining: limit,
        }
    }

    /// Return the wrapped sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<R, S> SolutionSink<R> for Limit<S>
where
    S: SolutionSink<R>,
{
    fn solution(&mut self, rows: &[&R]) -> ControlFlow<()> {
        if self.remaining == 0 {
            return ControlFlow::Break(());
        }

        self.remaining -= 1;
        self.inner.solution(rows)?;

        if self.remaining == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
