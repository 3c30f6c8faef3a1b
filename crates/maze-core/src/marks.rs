//! Transient per-run exploration state.
//!
//! [`Marks`] holds three boolean layers over a grid. They are scratch state
//! owned by the run controller: cleared at the start of every run, written
//! by the active strategy, and read by whatever front end draws them.

use crate::geom::Pos;
use crate::grid::{Grid, index_in};

/// Which mark layer a cell belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Finalized by a search, or walked by a genetic best path.
    Visited,
    /// Currently highlighted by the animation.
    Frontier,
    /// Part of the final path.
    Result,
}

/// Three boolean layers sized to a grid.
#[derive(Debug, Clone, Default)]
pub struct Marks {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
    frontier: Vec<bool>,
    result: Vec<bool>,
    visited_count: usize,
}

impl Marks {
    /// All-false marks for a `rows` × `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows * cols;
        Self {
            rows,
            cols,
            visited: vec![false; len],
            frontier: vec![false; len],
            result: vec![false; len],
            visited_count: 0,
        }
    }

    /// All-false marks matching `grid`'s size.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Resize to `grid` and clear every layer. Existing allocations are
    /// reused when they are large enough.
    pub fn resize_for(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.cols = grid.cols();
        let len = grid.area();
        for layer in [&mut self.visited, &mut self.frontier, &mut self.result] {
            layer.clear();
            layer.resize(len, false);
        }
        self.visited_count = 0;
    }

    /// Reset every layer to false.
    pub fn clear(&mut self) {
        self.visited.fill(false);
        self.frontier.fill(false);
        self.result.fill(false);
        self.visited_count = 0;
    }

    /// Reset only the frontier layer (used between genetic generations).
    pub fn clear_frontier(&mut self) {
        self.frontier.fill(false);
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells currently marked visited.
    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Mark `p` visited. Returns `true` if it was not visited before;
    /// out-of-bounds positions are ignored and return `false`.
    pub fn visit(&mut self, p: Pos) -> bool {
        let Some(i) = index_in(self.rows, self.cols, p) else {
            return false;
        };
        if self.visited[i] {
            return false;
        }
        self.visited[i] = true;
        self.visited_count += 1;
        true
    }

    /// Set or clear the frontier mark of `p`.
    pub fn set_frontier(&mut self, p: Pos, on: bool) {
        if let Some(i) = index_in(self.rows, self.cols, p) {
            self.frontier[i] = on;
        }
    }

    /// Mark `p` as part of the final path.
    pub fn set_result(&mut self, p: Pos) {
        if let Some(i) = index_in(self.rows, self.cols, p) {
            self.result[i] = true;
        }
    }

    /// Whether `p` carries the mark of `layer`. Out of bounds is `false`.
    pub fn is(&self, layer: Layer, p: Pos) -> bool {
        let Some(i) = index_in(self.rows, self.cols, p) else {
            return false;
        };
        match layer {
            Layer::Visited => self.visited[i],
            Layer::Frontier => self.frontier[i],
            Layer::Result => self.result[i],
        }
    }

    #[inline]
    pub fn is_visited(&self, p: Pos) -> bool {
        self.is(Layer::Visited, p)
    }

    /// Number of cells carrying the mark of `layer`.
    pub fn count(&self, layer: Layer) -> usize {
        let v = match layer {
            Layer::Visited => return self.visited_count,
            Layer::Frontier => &self.frontier,
            Layer::Result => &self.result,
        };
        v.iter().filter(|b| **b).count()
    }
}
