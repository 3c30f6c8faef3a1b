//! Simulated walks: decoding a genome into a path and a fitness cost.

use maze_core::{Dir, Grid, Pos};
use rand::Rng;

/// Cost of a move into a wall or off the grid. The walker stays put.
pub const WALL_PENALTY: u64 = 50;
/// Cost per unit of Manhattan distance left when a walk ends short of
/// the exit.
pub const DISTANCE_PENALTY: u64 = 120;

/// The cell reached by moving `dir` from `pos`, if it is a Road.
#[inline]
pub(crate) fn advance(grid: &Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    let next = pos.step(dir);
    grid.is_road(next).then_some(next)
}

/// The locally best move toward the exit.
///
/// Picks the valid move that strictly reduces the Manhattan distance to
/// the exit the most, first in [`Dir::ALL`] order on ties. If no valid
/// move gets closer, any valid move is chosen at random, and if the cell
/// is boxed in, any direction at all.
pub fn directed_move<R: Rng>(grid: &Grid, from: Pos, rng: &mut R) -> Dir {
    let goal = grid.exit();
    let mut best = None;
    let mut best_dist = from.manhattan(goal);
    let mut valid = [Dir::North; 4];
    let mut n_valid = 0;

    for d in Dir::ALL {
        let Some(next) = advance(grid, from, d) else {
            continue;
        };
        valid[n_valid] = d;
        n_valid += 1;
        let dist = next.manhattan(goal);
        if dist < best_dist {
            best_dist = dist;
            best = Some(d);
        }
    }

    match best {
        Some(d) => d,
        None if n_valid > 0 => valid[rng.random_range(0..n_valid)],
        None => Dir::from_index(rng.random_range(0..4)),
    }
}

/// Outcome of decoding one genome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Cells actually occupied, starting with the entrance.
    pub path: Vec<Pos>,
    /// Fitness cost, lower is better.
    pub cost: u64,
    /// Whether the walk ended on the exit.
    pub reached: bool,
}

impl Walk {
    /// Where the walk stopped.
    pub fn end(&self) -> Pos {
        self.path.last().copied().unwrap_or_default()
    }
}

/// Walk `genome` from the entrance and score it.
///
/// Before each gene is used, with probability `goal_bias` it is replaced by
/// a [`directed_move`] (the genome itself is left untouched). Blocked moves
/// cost [`WALL_PENALTY`]; valid moves cost the entered cell's weight. The
/// walk stops on the exit; otherwise [`DISTANCE_PENALTY`] per remaining
/// unit of Manhattan distance is added.
pub fn evaluate<R: Rng>(grid: &Grid, genome: &[Dir], goal_bias: f64, rng: &mut R) -> Walk {
    let goal = grid.exit();
    let mut pos = grid.entrance();
    let mut path = vec![pos];
    let mut cost = 0u64;

    if pos != goal {
        for &gene in genome {
            let mv = if rng.random::<f64>() < goal_bias {
                directed_move(grid, pos, rng)
            } else {
                gene
            };
            let next = pos.step(mv);
            match grid.weight(next) {
                None => cost += WALL_PENALTY,
                Some(w) => {
                    pos = next;
                    cost += u64::from(w.max(1));
                    path.push(pos);
                    if pos == goal {
                        break;
                    }
                }
            }
        }
    }

    let reached = pos == goal;
    if !reached {
        cost += DISTANCE_PENALTY * u64::from(pos.manhattan(goal));
    }
    Walk {
        path,
        cost,
        reached,
    }
}

/// Traversal cost of `path`: the weights of every cell after the first.
pub fn path_cost(grid: &Grid, path: &[Pos]) -> u64 {
    path.iter()
        .skip(1)
        .map(|&p| u64::from(grid.weight(p).unwrap_or(1).max(1)))
        .sum()
}
