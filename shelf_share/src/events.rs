// THEORY:
// A UI may deliver input re-entrantly: a click handler can fire while a previous
// handler is still running. The estimator itself is synchronous, so the only
// requirement is ordering. Every operator action is recorded as a `GridEvent`,
// appended to an `EventQueue` and drained one at a time, strictly in arrival
// order. Events are never reordered or coalesced, because two toggles of the
// same cell are two observable actions, not zero.

use crate::core_modules::share::ShareResult;
use crate::error::EstimatorError;
use crate::estimator::ShelfShareEstimator;
use std::collections::VecDeque;
use tracing::debug;

/// One operator action on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Configure { rows: u32, cols: u32 },
    Show,
    Hide,
    Toggle { row: u32, col: u32 },
    Reset,
}

/// What happened when an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub event: GridEvent,
    /// Share after the event, or the reason it was rejected.
    pub result: Result<ShareResult, EstimatorError>,
}

/// FIFO of pending grid events.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<GridEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GridEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies every pending event in arrival order. A rejected event is reported
    /// in its outcome and does not stop the drain.
    pub fn drain_into(&mut self, estimator: &mut ShelfShareEstimator) -> Vec<EventOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(event) = self.pending.pop_front() {
            let result = estimator.apply(event);
            debug!("applied {event:?}: {result:?}");
            outcomes.push(EventOutcome { event, result });
        }
        outcomes
    }
}

impl Extend<GridEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = GridEvent>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
