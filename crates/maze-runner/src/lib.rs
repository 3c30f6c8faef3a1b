//! **maze-runner** — drives the maze solvers.
//!
//! A [`Controller`] owns a grid and its exploration marks, runs one
//! [`Algorithm`] at a time and returns a [`RunReport`]. A [`Handle`] taken
//! from it can cancel the run or request a reset from an observer or from
//! another thread.
//!
//! ```
//! use maze_core::NoopObserver;
//! use maze_runner::{Algorithm, Controller, RunRequest};
//!
//! let grid = "S..\n.#.\n..G".parse().unwrap();
//! let mut controller = Controller::new(grid);
//! let report = controller
//!     .run(&RunRequest::new(Algorithm::AStar), &mut NoopObserver)
//!     .unwrap();
//! assert_eq!(report.result.total_cost, Some(4));
//! ```

pub mod algorithm;
pub mod controller;

pub use algorithm::{Algorithm, UnknownAlgorithm};
pub use controller::{Controller, Handle, RunError, RunReport, RunRequest, RunState};
