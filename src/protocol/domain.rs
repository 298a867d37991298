#[cfg(not(feature = "std"))]
use alloc::string::String;
use alloc::vec::Vec;

use crate::common::PlanError;
use crate::config::DEFAULT_SHIPS;
use crate::shot::{Availability, ShotType};

#[cfg(feature = "std")]
fn default_ships() -> Vec<usize> {
    DEFAULT_SHIPS.to_vec()
}

/// One targeting snapshot sent by the game engine.
///
/// Field names follow the engine's JSON; the PascalCase aliases accept the
/// older request model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Row-major cell codes: 0 unknown, 1 miss, 2 hit, 3 sunk.
    #[cfg_attr(feature = "std", serde(alias = "Grid"))]
    pub grid: Vec<i32>,
    #[cfg_attr(
        feature = "std",
        serde(default = "default_ships", alias = "RemainingShipSizes")
    )]
    pub remaining_ships: Vec<usize>,
    #[cfg_attr(feature = "std", serde(default, alias = "ShipsCanTouch"))]
    pub ships_can_touch: bool,
    #[cfg_attr(
        feature = "std",
        serde(default, rename = "airstrike", alias = "AirstrikeAllowed")
    )]
    pub airstrike_allowed: bool,
    #[cfg_attr(
        feature = "std",
        serde(default, rename = "bombardment", alias = "BombardmentAllowed")
    )]
    pub bombardment_allowed: bool,
    #[cfg_attr(feature = "std", serde(default, alias = "AirstrikeHitCount"))]
    pub airstrike_hit_count: u32,
    #[cfg_attr(feature = "std", serde(default, alias = "BombardmentHitCount"))]
    pub bombardment_hit_count: u32,
    #[cfg_attr(feature = "std", serde(default, alias = "AirstrikeAvailable"))]
    pub airstrike_available: bool,
    #[cfg_attr(feature = "std", serde(default, alias = "BombardmentAvailable"))]
    pub bombardment_available: bool,
}

impl GameState {
    /// Snapshot with the standard fleet and no special attacks.
    pub fn new(grid: Vec<i32>) -> Self {
        Self {
            grid,
            remaining_ships: DEFAULT_SHIPS.to_vec(),
            ships_can_touch: false,
            airstrike_allowed: false,
            bombardment_allowed: false,
            airstrike_hit_count: 0,
            bombardment_hit_count: 0,
            airstrike_available: false,
            bombardment_available: false,
        }
    }

    pub fn availability(&self) -> Availability {
        Availability {
            airstrike_allowed: self.airstrike_allowed,
            bombardment_allowed: self.bombardment_allowed,
            airstrike_hit_count: self.airstrike_hit_count,
            bombardment_hit_count: self.bombardment_hit_count,
            airstrike_available: self.airstrike_available,
            bombardment_available: self.bombardment_available,
        }
    }
}

/// The chosen move returned to the game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResponse {
    /// Cell the pattern is fired from.
    #[cfg_attr(feature = "std", serde(rename = "CellIndex"))]
    pub cell_index: usize,
    /// Unknown cell the move is aimed at; differs from `cell_index` only for
    /// a shifted special.
    #[cfg_attr(feature = "std", serde(rename = "TargetIndex"))]
    pub target: usize,
    /// 0 single, 1 airstrike, 2 bombardment.
    #[cfg_attr(feature = "std", serde(rename = "ShotType"))]
    pub shot_type: u8,
    /// Exact pattern, including the airstrike orientation.
    #[cfg_attr(feature = "std", serde(rename = "Pattern"))]
    pub pattern: ShotType,
    #[cfg_attr(feature = "std", serde(rename = "Cells"))]
    pub cells: Vec<usize>,
}

/// Category of a failed decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    InvalidDimensions,
    InvalidCellState,
    NoLegalMove,
    InternalPlanningError,
    /// The request itself could not be understood.
    BadRequest,
}

/// A decision that could not be made. The engine applies its own fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

impl From<&PlanError> for FailureKind {
    fn from(err: &PlanError) -> Self {
        match err {
            PlanError::InvalidDimensions { .. } => FailureKind::InvalidDimensions,
            PlanError::InvalidCellState { .. } => FailureKind::InvalidCellState,
            PlanError::NoLegalMove => FailureKind::NoLegalMove,
            PlanError::InternalPlanningError(_) => FailureKind::InternalPlanningError,
        }
    }
}

impl From<&PlanError> for Failure {
    fn from(err: &PlanError) -> Self {
        use alloc::string::ToString;
        Failure {
            kind: err.into(),
            detail: err.to_string(),
        }
    }
}

impl core::fmt::Display for Failure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.detail)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Failure {}
