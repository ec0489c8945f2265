// THEORY:
// The `estimator` module is the top-level API of the crate. `ShelfShareEstimator`
// owns one grid session: the resolution, the visibility flag and the set of cells
// the operator has marked. Everything else in the crate is either a data type it
// composes (`Grid`, `Selection`, `ShareResult`) or a driver around it (`EventQueue`,
// `EstimatorSession`).
//
// Key architectural principles:
// 1.  **Pull Is the Source of Truth**: `current_share()` is a pure function of the
//     grid and the selection. Listeners are a convenience fed from it after each
//     mutation; they never hold state of their own that could drift.
// 2.  **Synchronous Notification**: Every call that actually changes the grid or
//     the selection invokes all listeners before returning, so a listener always
//     sees the final value of any sequence of calls before the next read.
// 3.  **Small State Machine**: Hidden, Visible-Empty and Visible-WithSelection.
//     `show()` and `configure()` always land on an empty selection because the
//     operator starts over, or because cell identities changed meaning.
// 4.  **Decidable Failures**: Invalid input is rejected with an `EstimatorError`
//     and leaves every piece of state untouched. Nothing is clamped silently.

use crate::config::ShelfShareConfig;
use crate::core_modules::grid::{Cell, Grid};
use crate::core_modules::image_ref::ImageRef;
use crate::core_modules::overlay::Overlay;
use crate::core_modules::selection::Selection;
use crate::core_modules::share::ShareResult;
use crate::error::EstimatorError;
use crate::events::GridEvent;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Observable state of the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorState {
    /// The grid is not shown; cells cannot be toggled.
    Hidden,
    /// The grid is shown and nothing is marked.
    VisibleEmpty,
    /// The grid is shown and at least one cell is marked.
    VisibleWithSelection,
}

/// Receives the recomputed share after every effective mutation.
pub trait ShareListener {
    fn on_share_changed(&mut self, share: ShareResult);
}

impl<F> ShareListener for F
where
    F: FnMut(ShareResult),
{
    fn on_share_changed(&mut self, share: ShareResult) {
        self(share)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Read-only view of an estimator, suitable for attaching to a visit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorSnapshot {
    pub grid: Grid,
    pub state: EstimatorState,
    pub selected: Selection,
    pub share: ShareResult,
    pub competitor_share: u8,
}

/// Overlay grid estimator for one shelf photo at a time.
pub struct ShelfShareEstimator {
    grid: Grid,
    selection: Selection,
    visible: bool,
    listeners: Vec<(ListenerId, Box<dyn ShareListener + Send>)>,
    next_listener_id: u64,
}

impl ShelfShareEstimator {
    /// A hidden estimator with an empty selection.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            selection: Selection::new(),
            visible: false,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn from_config(config: &ShelfShareConfig) -> Result<Self, EstimatorError> {
        Ok(Self::new(config.grid.to_grid()?))
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> EstimatorState {
        match (self.visible, self.selection.is_empty()) {
            (false, _) => EstimatorState::Hidden,
            (true, true) => EstimatorState::VisibleEmpty,
            (true, false) => EstimatorState::VisibleWithSelection,
        }
    }

    /// Changes the grid resolution and clears the selection.
    ///
    /// A zero dimension is rejected with `InvalidConfiguration`; the previous grid
    /// stays in place and no listener fires. Visibility is not affected.
    pub fn configure(&mut self, rows: u32, cols: u32) -> Result<(), EstimatorError> {
        let grid = Grid::new(rows, cols).inspect_err(|err| warn!("configure rejected: {err}"))?;
        let grid_changed = grid != self.grid;
        self.grid = grid;
        let cleared = self.selection.clear();
        debug!("grid configured to {rows}x{cols}");
        if grid_changed || cleared {
            self.notify();
        }
        Ok(())
    }

    /// Shows the grid with an empty selection.
    pub fn show(&mut self) {
        self.visible = true;
        let cleared = self.selection.clear();
        debug!("grid shown");
        if cleared {
            self.notify();
        }
    }

    /// Hides the grid. The last reported share stands; toggling is refused until `show()`.
    pub fn hide(&mut self) {
        self.visible = false;
        debug!("grid hidden");
    }

    /// Flips the membership of `(row, col)` and returns whether it is now selected.
    ///
    /// Fails with `GridHidden` while hidden and with `InvalidCell` outside the grid;
    /// neither failure touches the selection.
    pub fn toggle_cell(&mut self, row: u32, col: u32) -> Result<bool, EstimatorError> {
        if !self.visible {
            warn!("toggle of ({row}, {col}) refused: grid hidden");
            return Err(EstimatorError::GridHidden);
        }
        let cell = self
            .grid
            .check(Cell::new(row, col))
            .inspect_err(|err| warn!("toggle rejected: {err}"))?;
        let selected = self.selection.toggle(cell);
        self.notify();
        Ok(selected)
    }

    /// Clears the selection, whether or not the grid is visible.
    pub fn reset(&mut self) {
        if self.selection.clear() {
            debug!("selection reset");
            self.notify();
        }
    }

    pub fn current_share(&self) -> ShareResult {
        ShareResult::from_counts(self.selection.len() as u64, self.grid.total_cells())
    }

    pub fn competitor_share(&self) -> u8 {
        self.current_share().competitor()
    }

    /// Lays the current grid over a photo, for drawing and hit-testing clicks.
    pub fn overlay(&self, image: ImageRef) -> Overlay {
        Overlay::new(image, self.grid)
    }

    pub fn snapshot(&self) -> EstimatorSnapshot {
        let share = self.current_share();
        EstimatorSnapshot {
            grid: self.grid,
            state: self.state(),
            selected: self.selection.clone(),
            share,
            competitor_share: share.competitor(),
        }
    }

    /// Applies one UI event and returns the share afterwards.
    pub fn apply(&mut self, event: GridEvent) -> Result<ShareResult, EstimatorError> {
        match event {
            GridEvent::Configure { rows, cols } => self.configure(rows, cols)?,
            GridEvent::Show => self.show(),
            GridEvent::Hide => self.hide(),
            GridEvent::Toggle { row, col } => {
                self.toggle_cell(row, col)?;
            }
            GridEvent::Reset => self.reset(),
        }
        Ok(self.current_share())
    }

    /// Registers a listener, called synchronously after every call that changes the
    /// grid or the selection.
    ///
    /// A call is not a guarantee of a new value: reconfiguring an empty grid reports
    /// 0% again, and a toggle on a large grid can leave the rounded share unchanged.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: ShareListener + Send + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let share = self.current_share();
        debug!("shelf share now {share} ({} of {} cells)", self.selection.len(), self.grid.total_cells());
        for (_, listener) in &mut self.listeners {
            listener.on_share_changed(share);
        }
    }
}

impl Default for ShelfShareEstimator {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

impl fmt::Debug for ShelfShareEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShelfShareEstimator")
            .field("grid", &self.grid)
            .field("selection", &self.selection)
            .field("visible", &self.visible)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
