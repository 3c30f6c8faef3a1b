//! Frontier search over maze grids.
//!
//! Breadth-first search, Dijkstra and A* share a single skeleton,
//! [`FrontierSearch::search`], parameterized by a [`Strategy`] that picks
//! the frontier ordering and the step cost:
//!
//! | Strategy | Frontier | Step cost | Guarantee |
//! |---|---|---|---|
//! | [`Strategy::Bfs`] | FIFO | 1 | fewest steps |
//! | [`Strategy::Dijkstra`] | min cost | cell weight | cheapest path |
//! | [`Strategy::AStar`] | min cost + Manhattan | cell weight | cheapest path, fewer expansions |
//!
//! Finalized cells are skipped when popped again (lazy deletion), so a
//! cheaper route simply pushes a new arena node.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | hop-count maps ([`FrontierSearch::bfs_map`]) |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | all three strategies |

mod bfs;
mod frontier;
mod search;
mod traits;

pub use bfs::PathNode;
pub use search::{FrontierSearch, SearchNode, Strategy};
pub use traits::{AstarPather, Pather, WeightedPather};
