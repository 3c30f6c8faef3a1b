use std::fmt;
use std::time::Instant;

use maze_core::{Grid, Pos, Role, RunContext, RunResult};

use crate::bfs::PathNode;
use crate::frontier::{Frontier, Order};
use crate::traits::{AstarPather, WeightedPather};

/// Which exact search to run. The three share one skeleton and differ only
/// in frontier ordering and step cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// FIFO frontier, every step costs 1. Shortest hop count.
    Bfs,
    /// Frontier ordered by cumulative weighted cost.
    Dijkstra,
    /// Frontier ordered by cost plus Manhattan distance to the goal.
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dijkstra, Strategy::AStar];

    /// Name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
        }
    }

    fn order(self) -> Order {
        match self {
            Self::Bfs => Order::Fifo,
            Self::Dijkstra | Self::AStar => Order::MinKey,
        }
    }

    fn step_cost<P: WeightedPather>(self, pather: &P, from: Pos, to: Pos) -> u64 {
        match self {
            Self::Bfs => 1,
            Self::Dijkstra | Self::AStar => u64::from(pather.cost(from, to).max(1)),
        }
    }

    fn key<P: AstarPather>(self, pather: &P, cost: u64, pos: Pos, goal: Pos) -> u64 {
        match self {
            Self::Bfs | Self::Dijkstra => cost,
            Self::AStar => cost + u64::from(pather.estimate(pos, goal)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the search arena. Nodes are never mutated after creation; a
/// cheaper route to a cell produces a new node instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub pos: Pos,
    /// Cumulative cost from the start.
    pub cost: u64,
    /// Arena index of the predecessor, `None` for the start node.
    pub parent: Option<usize>,
}

// ---------------------------------------------------------------------------
// FrontierSearch
// ---------------------------------------------------------------------------

/// Reusable state for searches over a `rows` × `cols` area.
///
/// `FrontierSearch` owns the node arena, the best-cost map, the closed set
/// and the frontier so that repeated runs only clear them instead of
/// reallocating. The closed set is stamped with a per-run generation, so
/// invalidating it is a counter bump.
#[derive(Debug)]
pub struct FrontierSearch {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    nodes: Vec<SearchNode>,
    best_cost: Vec<Option<u64>>,
    closed: Vec<u32>,
    generation: u32,
    frontier: Frontier,
    // hop-count BFS caches
    pub(crate) hops: Vec<Option<u32>>,
    pub(crate) hop_results: Vec<PathNode>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Pos>,
}

impl FrontierSearch {
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows * cols;
        Self {
            rows,
            cols,
            nodes: Vec::new(),
            best_cost: vec![None; len],
            closed: vec![0; len],
            generation: 0,
            frontier: Frontier::new(),
            hops: vec![None; len],
            hop_results: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Caches sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Change the covered area. Allocations are kept when large enough.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let len = rows * cols;
        self.rows = rows;
        self.cols = cols;
        self.nodes.clear();
        self.best_cost.clear();
        self.best_cost.resize(len, None);
        self.closed.clear();
        self.closed.resize(len, 0);
        self.generation = 0;
        self.hops.clear();
        self.hops.resize(len, None);
        self.hop_results.clear();
    }

    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> Option<usize> {
        if p.row >= 0
            && p.col >= 0
            && (p.row as usize) < self.rows
            && (p.col as usize) < self.cols
        {
            Some(p.row as usize * self.cols + p.col as usize)
        } else {
            None
        }
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with new ones.
            self.closed.fill(0);
            self.generation = 1;
        }
        self.generation
    }

    /// Search from the grid's entrance to its exit.
    pub fn solve(
        &mut self,
        grid: &Grid,
        strategy: Strategy,
        ctx: &mut RunContext<'_>,
    ) -> RunResult {
        if grid.rows() != self.rows || grid.cols() != self.cols {
            self.resize(grid.rows(), grid.cols());
        }
        self.search(grid, grid.entrance(), grid.exit(), strategy, ctx)
    }

    /// Run `strategy` from `from` to `to`.
    ///
    /// Every finalized cell is marked visited and frontier in `ctx.marks`
    /// and reported as [`Role::Exploring`]. Cancellation is polled before
    /// each expansion and right after each event; a cancelled run returns
    /// an unsolved result carrying the number of cells finalized so far.
    /// On success the path is marked in the result layer and reported as
    /// [`Role::Path`].
    pub fn search<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Pos,
        to: Pos,
        strategy: Strategy,
        ctx: &mut RunContext<'_>,
    ) -> RunResult {
        let t0 = Instant::now();
        let (Some(start_idx), Some(_)) = (self.idx(from), self.idx(to)) else {
            log::warn!(
                "{strategy}: {from} -> {to} lies outside {}x{}",
                self.rows,
                self.cols
            );
            return RunResult::unsolved(0, t0.elapsed());
        };

        let cur_gen = self.next_generation();
        self.nodes.clear();
        self.best_cost.fill(None);
        self.frontier.reset(strategy.order());

        self.best_cost[start_idx] = Some(0);
        self.nodes.push(SearchNode {
            pos: from,
            cost: 0,
            parent: None,
        });
        self.frontier.push(0, strategy.key(pather, 0, from, to));

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut visited = 0usize;

        let found = 'search: loop {
            if ctx.is_cancelled() {
                break 'search None;
            }
            let Some(id) = self.frontier.pop() else {
                break 'search None;
            };
            let SearchNode { pos, cost, .. } = self.nodes[id];
            let Some(ci) = self.idx(pos) else {
                continue;
            };

            // Skip stale entries.
            if self.closed[ci] == cur_gen {
                continue;
            }
            self.closed[ci] = cur_gen;
            visited += 1;
            ctx.marks.visit(pos);
            ctx.marks.set_frontier(pos, true);
            ctx.observer.on_cell(pos, Role::Exploring);

            if ctx.is_cancelled() {
                break 'search None;
            }
            if pos == to {
                break 'search Some(id);
            }

            nbuf.clear();
            pather.neighbors(pos, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.closed[ni] == cur_gen {
                    continue;
                }
                let tentative = cost + strategy.step_cost(pather, pos, np);
                if self.best_cost[ni].is_some_and(|best| tentative >= best) {
                    continue;
                }
                self.best_cost[ni] = Some(tentative);
                let nid = self.nodes.len();
                self.nodes.push(SearchNode {
                    pos: np,
                    cost: tentative,
                    parent: Some(id),
                });
                self.frontier.push(nid, strategy.key(pather, tentative, np, to));
            }
        };

        self.nbuf = nbuf;
        let elapsed = t0.elapsed();

        let Some(goal) = found else {
            if ctx.is_cancelled() {
                log::debug!("{strategy}: cancelled after {visited} cells");
            } else {
                log::debug!("{strategy}: no path, {visited} cells reachable");
            }
            return RunResult::unsolved(visited, elapsed);
        };

        let path = self.path_to(goal);
        let cost = self.nodes[goal].cost;
        ctx.mark_path(&path);
        log::debug!(
            "{strategy}: cost {cost}, {} steps, {visited} visited in {elapsed:?}",
            path.len()
        );
        RunResult::solved(path, cost, visited, elapsed)
    }

    /// Walk predecessor links from arena node `id` back to the start.
    fn path_to(&self, id: usize) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(i) = cur {
            let node = &self.nodes[i];
            path.push(node.pos);
            cur = node.parent;
        }
        path.reverse();
        path
    }

    /// Nodes created by the last search, in creation order.
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }
}


#[cfg(test)]
mod props {
    use super::tests::{assert_valid_path, path_cost, run};
    use super::{FrontierSearch, Strategy};
    use maze_core::{Grid, Pos};
    use proptest::prelude::*;
    use proptest::strategy::Strategy as _;

    fn arb_grid() -> impl proptest::strategy::Strategy<Value = Grid> {
        (2usize..9, 2usize..9).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(prop_oneof![1 => Just(0u8), 3 => 1u8..=9], rows * cols)
                .prop_map(move |cells| {
                    let entrance = Pos::new(0, 0);
                    let exit = Pos::new(rows as i32 - 1, cols as i32 - 1);
                    let mut b = Grid::builder(rows, cols);
                    for (i, c) in cells.into_iter().enumerate() {
                        let p = Pos::new((i / cols) as i32, (i % cols) as i32);
                        b = if c == 0 { b.wall(p) } else { b.weight(p, i64::from(c)) };
                    }
                    b.weight(entrance, 1)
                        .weight(exit, 1)
                        .entrance(entrance)
                        .exit(exit)
                        .build()
                        .unwrap()
                })
        })
    }

    proptest! {
        #[test]
        fn exact_strategies_agree(g in arb_grid()) {
            let (bfs, _) = run(&g, Strategy::Bfs);
            let (dij, _) = run(&g, Strategy::Dijkstra);
            let (ast, _) = run(&g, Strategy::AStar);

            prop_assert_eq!(bfs.solved, dij.solved);
            prop_assert_eq!(ast.solved, dij.solved);
            prop_assert_eq!(ast.total_cost, dij.total_cost);
            prop_assert!(ast.visited_count <= dij.visited_count);

            if dij.solved {
                for r in [&bfs, &dij, &ast] {
                    assert_valid_path(&g, r);
                }
                prop_assert!(bfs.steps <= dij.steps);
                prop_assert_eq!(dij.total_cost, Some(path_cost(&g, &dij.path)));
                prop_assert_eq!(ast.total_cost, Some(path_cost(&g, &ast.path)));
            } else {
                let mut fs = FrontierSearch::for_grid(&g);
                let reachable = fs.bfs_map(&g, g.entrance()).len();
                for r in [&bfs, &dij, &ast] {
                    prop_assert_eq!(r.visited_count, reachable);
                }
            }
        }
    }
}
