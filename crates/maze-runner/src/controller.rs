use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maze_core::{CancelToken, Grid, Marks, Observer, RunContext, RunResult};
use maze_genetic::{GeneticParams, GeneticSolver, ParamError};
use maze_paths::FrontierSearch;

use crate::algorithm::Algorithm;

// ---------------------------------------------------------------------------
// Requests, reports, errors
// ---------------------------------------------------------------------------

/// What to run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRequest {
    pub algorithm: Algorithm,
    /// Genetic tunables. `None` keeps the controller's current ones; `Some`
    /// replaces them.
    pub genetic: Option<GeneticParams>,
}

impl RunRequest {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            genetic: None,
        }
    }

    pub fn with_genetic(mut self, params: GeneticParams) -> Self {
        self.genetic = Some(params);
        self
    }
}

/// A finished run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub result: RunResult,
}

/// Why a run was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    InvalidParams(ParamError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(e) => write!(f, "invalid genetic parameters: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
        }
    }
}

impl From<ParamError> for RunError {
    fn from(e: ParamError) -> Self {
        Self::InvalidParams(e)
    }
}

// ---------------------------------------------------------------------------
// Run state shared with handles
// ---------------------------------------------------------------------------

/// Lifecycle of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    /// Cancellation was requested and the solver has not exited yet.
    Cancelling,
    /// The solver exited; final metrics are being recorded.
    Done,
}

/// The state together with the cancel flag of the current run. Each run
/// gets a fresh flag; both change under one lock.
#[derive(Debug, Default)]
struct Slot {
    state: RunState,
    cancel: CancelToken,
}

#[derive(Debug, Default)]
struct Shared {
    slot: Mutex<Slot>,
    reset_pending: AtomicBool,
}

impl Shared {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> RunState {
        self.slot().state
    }

    fn set_state(&self, state: RunState) {
        self.slot().state = state;
    }

    /// Enter `Running` with a new, lowered cancel flag and return it.
    fn begin(&self) -> CancelToken {
        let mut slot = self.slot();
        slot.cancel = CancelToken::new();
        slot.state = RunState::Running;
        slot.cancel.clone()
    }

    fn cancel(&self) {
        let mut slot = self.slot();
        if slot.state == RunState::Running {
            slot.state = RunState::Cancelling;
            slot.cancel.cancel();
        }
    }
}

/// A cheap, thread-safe remote for a [`Controller`].
///
/// Handles can be cloned freely, captured by observers or sent to other
/// threads.
#[derive(Clone, Debug)]
pub struct Handle {
    shared: Arc<Shared>,
}

impl Handle {
    /// Ask the running solve to stop. Has no effect unless a run is in
    /// progress; calling it again while cancelling changes nothing.
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    /// Cancel any running solve, then clear the marks and restore the
    /// default tunables as soon as the controller is free.
    pub fn request_reset(&self) {
        self.shared.reset_pending.store(true, Ordering::Release);
        self.shared.cancel();
    }

    pub fn state(&self) -> RunState {
        self.shared.state()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns a grid, its marks and the solver workspaces, and runs one solve at
/// a time.
#[derive(Debug)]
pub struct Controller {
    grid: Grid,
    marks: Marks,
    search: FrontierSearch,
    params: GeneticParams,
    shared: Arc<Shared>,
}

impl Controller {
    pub fn new(grid: Grid) -> Self {
        Self {
            marks: Marks::for_grid(&grid),
            search: FrontierSearch::for_grid(&grid),
            grid,
            params: GeneticParams::default(),
            shared: Arc::new(Shared::default()),
        }
    }

    /// Replace the grid. Marks are resized and cleared.
    pub fn set_grid(&mut self, grid: Grid) {
        self.marks.resize_for(&grid);
        self.search.resize(grid.rows(), grid.cols());
        self.grid = grid;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Marks left by the last run.
    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Current genetic tunables.
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    pub fn set_params(&mut self, params: GeneticParams) -> Result<(), RunError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn handle(&self) -> Handle {
        Handle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn state(&self) -> RunState {
        self.shared.state()
    }

    /// Clear the marks and restore the default tunables.
    pub fn reset(&mut self) {
        self.shared.reset_pending.store(false, Ordering::Release);
        self.marks.clear();
        self.params = GeneticParams::default();
        log::debug!("controller reset");
    }

    /// Perform a reset requested through a [`Handle`], if any. Returns
    /// whether one was pending.
    pub fn apply_pending_reset(&mut self) -> bool {
        if self.shared.reset_pending.swap(false, Ordering::AcqRel) {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Run one solve to completion, streaming events to `observer`.
    ///
    /// Parameters are checked before anything changes. A cancelled or
    /// unsolvable run is a normal report with an unsolved result.
    pub fn run(
        &mut self,
        request: &RunRequest,
        observer: &mut dyn Observer,
    ) -> Result<RunReport, RunError> {
        if let Some(params) = &request.genetic {
            params.validate()?;
        } else if request.algorithm == Algorithm::Genetic {
            self.params.validate()?;
        }
        self.apply_pending_reset();
        if let Some(params) = &request.genetic {
            self.params = params.clone();
        }

        self.marks.clear();
        let cancel = self.shared.begin();
        log::info!(
            "{}: solving {}x{} grid from {} to {}",
            request.algorithm,
            self.grid.rows(),
            self.grid.cols(),
            self.grid.entrance(),
            self.grid.exit()
        );

        let mut ctx = RunContext::new(&mut self.marks, &cancel, observer);
        let result = match request.algorithm.strategy() {
            Some(strategy) => self.search.solve(&self.grid, strategy, &mut ctx),
            None => GeneticSolver::new(self.params.clone()).solve(&self.grid, &mut ctx),
        };

        let cancelled = self.shared.state() == RunState::Cancelling;
        self.shared.set_state(RunState::Done);
        log_metrics(request.algorithm, &result, cancelled);

        self.apply_pending_reset();
        self.shared.set_state(RunState::Idle);
        Ok(RunReport {
            algorithm: request.algorithm,
            result,
        })
    }
}

fn log_metrics(algorithm: Algorithm, result: &RunResult, cancelled: bool) {
    let ms = result.elapsed.as_secs_f64() * 1000.0;
    if result.solved {
        log::info!(
            "{algorithm}: solved, {} steps, cost {}, {} visited, {ms:.2} ms",
            result.steps.unwrap_or_default(),
            result.total_cost.unwrap_or_default(),
            result.visited_count
        );
    } else if cancelled {
        log::info!(
            "{algorithm}: cancelled, {} visited, {ms:.2} ms",
            result.visited_count
        );
    } else {
        log::info!(
            "{algorithm}: no path, {} visited, {ms:.2} ms",
            result.visited_count
        );
    }
}
