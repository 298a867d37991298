//! Hypothetical ship placements used for probability estimation.

use crate::grid::Dimensions;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Step between consecutive segments as `(dx, dy)`.
    #[inline]
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// A contiguous run of `length` cells starting at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub length: usize,
    pub orientation: Orientation,
}

impl Placement {
    /// Returns the placement if it lies entirely on the board. Lengths too
    /// large to fit never overflow, they are simply rejected.
    pub fn new(
        dims: Dimensions,
        x: usize,
        y: usize,
        length: usize,
        orientation: Orientation,
    ) -> Option<Self> {
        if length == 0 {
            return None;
        }
        let (dx, dy) = orientation.step();
        let end_x = x.checked_add(dx.checked_mul(length - 1)?)?;
        let end_y = y.checked_add(dy.checked_mul(length - 1)?)?;
        if end_x >= dims.width() || end_y >= dims.height() {
            return None;
        }
        Some(Self {
            x,
            y,
            length,
            orientation,
        })
    }

    /// Linear indices covered, from the anchor outwards.
    pub fn cells(self, dims: Dimensions) -> impl Iterator<Item = usize> {
        let (dx, dy) = self.orientation.step();
        let width = dims.width();
        (0..self.length).map(move |k| (self.y + dy * k) * width + self.x + dx * k)
    }

    /// Every on-board placement of a ship of `length`, horizontal first, in
    /// row-major anchor order.
    pub fn enumerate(dims: Dimensions, length: usize) -> impl Iterator<Item = Placement> {
        Orientation::ALL.into_iter().flat_map(move |orientation| {
            (0..dims.height()).flat_map(move |y| {
                (0..dims.width())
                    .filter_map(move |x| Placement::new(dims, x, y, length, orientation))
            })
        })
    }
}
