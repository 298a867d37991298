//! Common types for the planner: errors surfaced to callers.

use crate::cellset::CellSetError;

/// Errors returned by the planning pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Grid length does not match the declared dimensions, or the dimensions
    /// cannot be represented.
    InvalidDimensions {
        width: usize,
        height: usize,
        cells: usize,
    },
    /// A cell carried a code outside `0..=3`.
    InvalidCellState { index: usize, code: i32 },
    /// No Unknown cell is left to target.
    NoLegalMove,
    /// An internal invariant was violated while planning.
    InternalPlanningError(&'static str),
}

impl PlanError {
    /// Stable name of the error kind, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::InvalidDimensions { .. } => "InvalidDimensions",
            PlanError::InvalidCellState { .. } => "InvalidCellState",
            PlanError::NoLegalMove => "NoLegalMove",
            PlanError::InternalPlanningError(_) => "InternalPlanningError",
        }
    }
}

impl From<CellSetError> for PlanError {
    fn from(err: CellSetError) -> Self {
        match err {
            CellSetError::SizeTooLarge { cells, .. } => PlanError::InvalidDimensions {
                width: 0,
                height: 0,
                cells,
            },
            CellSetError::IndexOutOfBounds { .. } => {
                PlanError::InternalPlanningError("cell index outside the board")
            }
        }
    }
}

impl core::fmt::Display for PlanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlanError::InvalidDimensions {
                width,
                height,
                cells,
            } => write!(
                f,
                "Invalid dimensions: {} cells for a {}x{} board",
                cells, width, height
            ),
            PlanError::InvalidCellState { index, code } => {
                write!(f, "Invalid cell state {} at index {}", code, index)
            }
            PlanError::NoLegalMove => write!(f, "No unknown cells left to target"),
            PlanError::InternalPlanningError(msg) => write!(f, "Internal planning error: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlanError {}

#[cfg(feature = "std")]
impl std::error::Error for CellSetError {}
