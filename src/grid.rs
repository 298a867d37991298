//! Targeting grid: cell states addressed by linear index or `(x, y)`.

use alloc::vec::Vec;

use crate::common::PlanError;
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH, MAX_CELLS};

/// Outcome recorded for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Unknown,
    Miss,
    Hit,
    Sunk,
}

impl CellState {
    /// Decode a wire code (`0..=3`).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(CellState::Unknown),
            1 => Some(CellState::Miss),
            2 => Some(CellState::Hit),
            3 => Some(CellState::Sunk),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            CellState::Unknown => 0,
            CellState::Miss => 1,
            CellState::Hit => 2,
            CellState::Sunk => 3,
        }
    }
}

/// Board geometry shared by every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    /// The classic 10×10 board.
    pub const STANDARD: Dimensions = Dimensions {
        width: BOARD_WIDTH,
        height: BOARD_HEIGHT,
    };

    /// Validate a `width × height` board.
    pub fn new(width: usize, height: usize) -> Result<Self, PlanError> {
        let cells = width.checked_mul(height).unwrap_or(usize::MAX);
        if width == 0 || height == 0 || cells > MAX_CELLS {
            return Err(PlanError::InvalidDimensions {
                width,
                height,
                cells,
            });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of `(x, y)`, if on the board.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// `(x, y)` of a row-major index. The index must be on the board.
    #[inline]
    pub fn coord_of(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Index reached by moving `(dx, dy)` from `index`, or `None` when that
    /// leaves the board. Rows never wrap.
    pub fn offset(&self, index: usize, dx: isize, dy: isize) -> Option<usize> {
        let (x, y) = self.coord_of(index);
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if self.in_bounds(nx, ny) {
            Some(ny as usize * self.width + nx as usize)
        } else {
            None
        }
    }

    /// Orthogonal neighbours (left, right, up, down) that exist on the board.
    pub fn neighbors4(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(index, dx, dy))
    }
}

/// A parsed snapshot of the targeting grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    /// Parse a row-major sequence of cell codes.
    pub fn parse(codes: &[i32], width: usize, height: usize) -> Result<Self, PlanError> {
        let dims = Dimensions::new(width, height)?;
        if codes.len() != dims.cells() {
            return Err(PlanError::InvalidDimensions {
                width,
                height,
                cells: codes.len(),
            });
        }
        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                CellState::from_code(code).ok_or(PlanError::InvalidCellState { index, code })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { dims, cells })
    }

    /// Build a grid from already decoded states.
    pub fn from_states(states: Vec<CellState>, dims: Dimensions) -> Result<Self, PlanError> {
        if states.len() != dims.cells() {
            return Err(PlanError::InvalidDimensions {
                width: dims.width(),
                height: dims.height(),
                cells: states.len(),
            });
        }
        Ok(Self { dims, cells: states })
    }

    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State of the cell at `index`, or `None` off the board.
    #[inline]
    pub fn state_of(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    #[inline]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        self.dims.in_bounds(x, y)
    }

    pub fn neighbors4(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.dims.neighbors4(index)
    }

    /// Iterator over `(index, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, CellState)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    /// Record a new state for `index`; off-board indices are ignored.
    pub(crate) fn set(&mut self, index: usize, state: CellState) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = state;
        }
    }

    /// Wire codes in row-major order.
    pub fn to_codes(&self) -> Vec<i32> {
        self.cells.iter().map(|s| s.code()).collect()
    }
}
