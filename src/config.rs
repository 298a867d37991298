use alloc::string::String;

use crate::cellset::Cells;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 10;

/// Largest board the cell sets can hold.
pub const MAX_CELLS: usize = Cells::CAPACITY;

/// Standard fleet: carrier, battleship, cruiser, submarine, destroyer.
pub const DEFAULT_SHIPS: [usize; 5] = [5, 4, 3, 3, 2];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Hits needed before an allowed airstrike becomes usable.
pub const AIRSTRIKE_REQUIRED_HITS: u32 = 5;
/// Hits needed before an allowed bombardment becomes usable.
pub const BOMBARDMENT_REQUIRED_HITS: u32 = 7;

/// Weight multiplier per unresolved hit covered by a placement.
pub const DEFAULT_HIT_WEIGHT: f64 = 2.0;

/// Tunables for one planning call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    pub width: usize,
    pub height: usize,
    pub hit_weight: f64,
}

impl PlannerConfig {
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            hit_weight: DEFAULT_HIT_WEIGHT,
        }
    }

    /// Replace the hit weight. Weights that are not finite and positive are
    /// ignored and the current weight is kept.
    pub fn with_hit_weight(mut self, hit_weight: f64) -> Self {
        if is_valid_hit_weight(hit_weight) {
            self.hit_weight = hit_weight;
        }
        self
    }
}

pub fn is_valid_hit_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

/// Parse a hit weight from the command line, rejecting NaN, infinities and
/// anything not above zero.
pub fn parse_hit_weight(s: &str) -> Result<f64, String> {
    use alloc::format;

    let weight: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid hit weight `{}`: {}", s, e))?;
    if is_valid_hit_weight(weight) {
        Ok(weight)
    } else {
        Err(format!("hit weight must be finite and positive, got {}", s))
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
