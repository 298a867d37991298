//! Categorized cell sets derived from a grid snapshot.

use alloc::vec::Vec;

use crate::cellset::Cells;
use crate::common::PlanError;
use crate::grid::{CellState, Dimensions, Grid};

/// Immutable planner input: every index sits in exactly one of the four
/// state sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub dims: Dimensions,
    /// Unknown cells that may still be targeted.
    pub available: Cells,
    pub missed: Cells,
    /// Hit cells not yet part of a sunk ship.
    pub hit: Cells,
    pub sunk: Cells,
    /// Lengths of ships still afloat; zero lengths are dropped.
    pub remaining_ships: Vec<usize>,
}

impl Features {
    /// Partition the grid and record the remaining fleet. A fleet with more
    /// segments than the board has cells is rejected as `InvalidDimensions`.
    pub fn extract(grid: &Grid, remaining_ships: &[usize]) -> Result<Self, PlanError> {
        let dims = grid.dims();
        let segments = remaining_ships
            .iter()
            .try_fold(0usize, |acc, &len| acc.checked_add(len))
            .unwrap_or(usize::MAX);
        if segments > dims.cells() {
            return Err(PlanError::InvalidDimensions {
                width: dims.width(),
                height: dims.height(),
                cells: segments,
            });
        }
        let of_state = |wanted: CellState| {
            Cells::try_from_indices(
                dims.cells(),
                grid.iter().filter(move |&(_, s)| s == wanted).map(|(i, _)| i),
            )
        };
        let available = of_state(CellState::Unknown)?;
        let missed = of_state(CellState::Miss)?;
        let hit = of_state(CellState::Hit)?;
        let sunk = of_state(CellState::Sunk)?;
        Ok(Self {
            dims,
            available,
            missed,
            hit,
            sunk,
            remaining_ships: remaining_ships.iter().copied().filter(|&l| l > 0).collect(),
        })
    }

    /// State of `index` as recorded in the partition.
    pub fn state_of(&self, index: usize) -> Option<CellState> {
        if self.available.contains(index) {
            Some(CellState::Unknown)
        } else if self.hit.contains(index) {
            Some(CellState::Hit)
        } else if self.missed.contains(index) {
            Some(CellState::Miss)
        } else if self.sunk.contains(index) {
            Some(CellState::Sunk)
        } else {
            None
        }
    }

    /// Cells a ship segment may still occupy.
    pub fn open(&self) -> Cells {
        self.available | self.hit
    }

    /// True when `index` touches an unresolved hit orthogonally.
    pub fn is_hit_adjacent(&self, index: usize) -> bool {
        self.dims.neighbors4(index).any(|n| self.hit.contains(n))
    }

    /// True when `index` touches a sunk cell orthogonally.
    pub fn is_sunk_adjacent(&self, index: usize) -> bool {
        self.dims.neighbors4(index).any(|n| self.sunk.contains(n))
    }
}
