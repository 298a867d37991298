//! Attack shapes and their availability.

use alloc::vec::Vec;

use crate::config::{AIRSTRIKE_REQUIRED_HITS, BOMBARDMENT_REQUIRED_HITS};
use crate::features::Features;
use crate::grid::Dimensions;

/// Attack pattern fired from an anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotType {
    Single,
    AirstrikeUpRight,
    AirstrikeDownRight,
    Bombardment,
}

const SINGLE: [(isize, isize); 1] = [(0, 0)];
const AIRSTRIKE_UP_RIGHT: [(isize, isize); 3] = [(0, 0), (1, -1), (2, -2)];
const AIRSTRIKE_DOWN_RIGHT: [(isize, isize); 3] = [(0, 0), (1, 1), (2, 2)];
const BOMBARDMENT: [(isize, isize); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

impl ShotType {
    /// `(dx, dy)` offsets relative to the anchor, anchor first.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            ShotType::Single => &SINGLE,
            ShotType::AirstrikeUpRight => &AIRSTRIKE_UP_RIGHT,
            ShotType::AirstrikeDownRight => &AIRSTRIKE_DOWN_RIGHT,
            ShotType::Bombardment => &BOMBARDMENT,
        }
    }

    /// Wire code: 0 single, 1 airstrike (either orientation), 2 bombardment.
    pub fn code(self) -> u8 {
        match self {
            ShotType::Single => 0,
            ShotType::AirstrikeUpRight | ShotType::AirstrikeDownRight => 1,
            ShotType::Bombardment => 2,
        }
    }

    pub fn is_airstrike(self) -> bool {
        matches!(self, ShotType::AirstrikeUpRight | ShotType::AirstrikeDownRight)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShotType::Single => "Single",
            ShotType::AirstrikeUpRight => "AirstrikeUpRight",
            ShotType::AirstrikeDownRight => "AirstrikeDownRight",
            ShotType::Bombardment => "Bombardment",
        }
    }

    /// Covered cells in ascending order, or `None` if any offset leaves the
    /// board.
    pub fn cells(self, dims: Dimensions, anchor: usize) -> Option<Vec<usize>> {
        if anchor >= dims.cells() {
            return None;
        }
        let mut cells = self
            .offsets()
            .iter()
            .map(|&(dx, dy)| dims.offset(anchor, dx, dy))
            .collect::<Option<Vec<_>>>()?;
        cells.sort_unstable();
        Some(cells)
    }

    /// Cells covered at `anchor` when the shape is legal there: on the board
    /// and touching only unknown or unresolved-hit cells.
    pub fn legal_cells(self, features: &Features, anchor: usize) -> Option<Vec<usize>> {
        let cells = self.cells(features.dims, anchor)?;
        let open = features.open();
        cells.iter().all(|&c| open.contains(c)).then_some(cells)
    }
}

/// Special attack flags and counters supplied with each snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub airstrike_allowed: bool,
    pub bombardment_allowed: bool,
    pub airstrike_hit_count: u32,
    pub bombardment_hit_count: u32,
    pub airstrike_available: bool,
    pub bombardment_available: bool,
}

impl Availability {
    /// Nothing but single shots.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn airstrike_usable(&self) -> bool {
        self.airstrike_available
            || (self.airstrike_allowed && self.airstrike_hit_count >= AIRSTRIKE_REQUIRED_HITS)
    }

    pub fn bombardment_usable(&self) -> bool {
        self.bombardment_available
            || (self.bombardment_allowed
                && self.bombardment_hit_count >= BOMBARDMENT_REQUIRED_HITS)
    }

    pub fn is_usable(&self, shot: ShotType) -> bool {
        match shot {
            ShotType::Single => true,
            ShotType::AirstrikeUpRight | ShotType::AirstrikeDownRight => self.airstrike_usable(),
            ShotType::Bombardment => self.bombardment_usable(),
        }
    }
}
