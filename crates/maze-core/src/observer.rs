//! Streaming callbacks used to animate a run.
//!
//! Solvers call into an [`Observer`] synchronously right after they change
//! a cell's transient marks. Observers have no control over the run apart
//! from cancelling it through a [`CancelToken`](crate::CancelToken) they
//! hold; timing (animation delays) is entirely their own business.

use crate::geom::Pos;

/// Why a cell is being reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// The cell was just finalized by a search, or walked by the current
    /// genetic best candidate.
    Exploring,
    /// The cell belongs to the final path.
    Path,
}

/// Snapshot of the genetic solver's best candidate so far, taken after a
/// generation. Cost, outcome and path all describe the same candidate.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// Zero-based generation number.
    pub generation: u64,
    /// Fitness cost of the best candidate found so far (lower is better).
    pub best_cost: u64,
    /// Whether that candidate reached the exit.
    pub reached: bool,
    /// Cells walked by that candidate.
    pub path: &'a [Pos],
}

/// Receiver of exploration events.
pub trait Observer {
    /// A cell changed role.
    fn on_cell(&mut self, _pos: Pos, _role: Role) {}

    /// A genetic generation finished.
    fn on_generation(&mut self, _report: &GenerationReport<'_>) {}
}

/// An observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

impl<F: FnMut(Pos, Role)> Observer for F {
    fn on_cell(&mut self, pos: Pos, role: Role) {
        self(pos, role)
    }
}
