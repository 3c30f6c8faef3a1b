//! Goal-biased genetic maze solver.
//!
//! A genome is a fixed-length list of moves. Genomes are scored by walking
//! them from the entrance, where each move is, with some probability,
//! replaced by the locally best step toward the exit. Elitism plus two
//! directed repair operators keep the population near the goal.
//!
//! ```
//! use maze_core::{CancelToken, Grid, Marks, NoopObserver, RunContext};
//! use maze_genetic::{GeneticParams, GeneticSolver};
//!
//! let grid: Grid = "S...\n.##.\n...G".parse().unwrap();
//! let params = GeneticParams { goal_bias: 1.0, ..GeneticParams::default() };
//! let mut marks = Marks::for_grid(&grid);
//! let cancel = CancelToken::new();
//! let mut obs = NoopObserver;
//! let mut ctx = RunContext::new(&mut marks, &cancel, &mut obs);
//! let result = GeneticSolver::new(params).solve(&grid, &mut ctx);
//! assert!(result.solved);
//! ```

pub mod genome;
pub mod operators;
pub mod params;
pub mod solver;
pub mod walk;

pub use genome::{Genome, estimate_hops, genome_length};
pub use params::{GeneticParams, ParamError};
pub use solver::{Candidate, GeneticSolver};
pub use walk::{Walk, directed_move, evaluate, path_cost};
