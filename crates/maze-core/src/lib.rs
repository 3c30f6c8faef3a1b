//! **maze-core** — shared types for the maze solver engine.
//!
//! This crate provides the pieces every solver and front end agrees on:
//! coordinates and directions, the immutable [`Grid`], the transient
//! exploration [`Marks`], cooperative cancellation, the [`Observer`]
//! callback used for animation, and the terminal [`RunResult`].

pub mod cancel;
pub mod geom;
pub mod grid;
pub mod marks;
pub mod observer;
pub mod result;

pub use cancel::CancelToken;
pub use geom::{Dir, Pos};
pub use grid::{CellKind, Endpoint, Grid, GridBuilder, GridError};
pub use marks::{Layer, Marks};
pub use observer::{GenerationReport, NoopObserver, Observer, Role};
pub use result::{RunContext, RunResult};
