// THEORY:
// The `Selection` is the operator's annotation: the set of cells marked as
// occupied by the tracked brand. It is a "dumb" container in the same sense as
// the grid: it knows nothing about visibility, listeners or percentages, only
// set membership. Ordering is row-major so renderers and reports iterate it
// deterministically.

use crate::core_modules::grid::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of cells marked as brand-occupied. No duplicates, order irrelevant to meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    cells: BTreeSet<Cell>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `cell`. Returns `true` if the cell is selected afterwards.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Empties the set. Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_cells = !self.cells.is_empty();
        self.cells.clear();
        had_cells
    }

    /// Selected cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Cell> for Selection {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
