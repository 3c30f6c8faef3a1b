use std::time::Duration;

use crate::geom::Pos;
use crate::marks::Marks;
use crate::observer::{Observer, Role};
use crate::CancelToken;

/// Terminal outcome of one solve.
///
/// An unsolved result is a normal outcome: it is what an exhausted search,
/// an enclosed exit or a cancelled run produce. Unsolved results always
/// carry an empty path and no cost.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    pub solved: bool,
    /// Cells from entrance to exit, both inclusive.
    pub path: Vec<Pos>,
    pub total_cost: Option<u64>,
    /// Number of cells on `path`, start included.
    pub steps: Option<usize>,
    pub visited_count: usize,
    pub elapsed: Duration,
}

impl RunResult {
    /// A successful result for `path` with the given cost.
    pub fn solved(
        path: Vec<Pos>,
        total_cost: u64,
        visited_count: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            solved: true,
            steps: Some(path.len()),
            path,
            total_cost: Some(total_cost),
            visited_count,
            elapsed,
        }
    }

    /// An unsolved (exhausted or cancelled) result.
    pub fn unsolved(visited_count: usize, elapsed: Duration) -> Self {
        Self {
            visited_count,
            elapsed,
            ..Self::default()
        }
    }
}

/// Everything a strategy borrows from the run controller for one run.
pub struct RunContext<'a> {
    pub marks: &'a mut Marks,
    pub cancel: &'a CancelToken,
    pub observer: &'a mut dyn Observer,
}

impl<'a> RunContext<'a> {
    pub fn new(
        marks: &'a mut Marks,
        cancel: &'a CancelToken,
        observer: &'a mut dyn Observer,
    ) -> Self {
        Self {
            marks,
            cancel,
            observer,
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Mark every cell of `path` as part of the final path and report it.
    pub fn mark_path(&mut self, path: &[Pos]) {
        for &p in path {
            self.marks.set_result(p);
            self.observer.on_cell(p, Role::Path);
        }
    }
}

impl std::fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("visited", &self.marks.visited_count())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn result_round_trip() {
        let path = vec![Pos::new(0, 0), Pos::new(0, 1)];
        let r = RunResult::solved(path, 1, 2, Duration::from_micros(15));
        let json = serde_json::to_string(&r).unwrap();
        let back: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
