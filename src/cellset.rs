//! A fixed-capacity set of cell indices packed into an unsigned integer.
//!
//! The type is `no_std` friendly and avoids heap allocations. Unlike a square
//! bitboard the number of cells is decided at runtime, so one set type serves
//! any `width × height` board that fits into `T::BITS`.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by cell set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSetError {
    /// Requested cell count exceeds capacity of `T::BITS`.
    SizeTooLarge { cells: usize, capacity: usize },
    /// Cell index is out of bounds [0..cells).
    IndexOutOfBounds { index: usize, cells: usize },
}

impl fmt::Display for CellSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellSetError::SizeTooLarge { cells, capacity } => {
                write!(f, "SizeTooLarge: {} cells exceeds T::BITS={}", cells, capacity)
            }
            CellSetError::IndexOutOfBounds { index, cells } => {
                write!(f, "IndexOutOfBounds: index={}, cells={}", index, cells)
            }
        }
    }
}

/// A set of cell indices in `[0, len)` stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CellSet<T = u128>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    len: usize,
}

impl<T> CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of bits available in `T`.
    pub const CAPACITY: usize = mem::size_of::<T>() * 8;

    #[inline]
    fn mask(len: usize) -> T {
        if len == Self::CAPACITY {
            !T::zero()
        } else {
            (T::one() << len) - T::one()
        }
    }

    /// Create an empty set over `len` cells.
    pub fn try_new(len: usize) -> Result<Self, CellSetError> {
        if len > Self::CAPACITY {
            Err(CellSetError::SizeTooLarge {
                cells: len,
                capacity: Self::CAPACITY,
            })
        } else {
            Ok(CellSet {
                bits: T::zero(),
                len,
            })
        }
    }

    /// Creates a set from an iterator over cell indices.
    pub fn try_from_indices<I>(len: usize, iter: I) -> Result<Self, CellSetError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::try_new(len)?;
        for index in iter {
            set.insert(index)?;
        }
        Ok(set)
    }

    /// Number of cells the set ranges over.
    #[inline]
    pub fn universe(&self) -> usize {
        self.len
    }

    /// Returns the number of cells present.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no cell is present.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Membership test. Indices outside the universe are never members.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && ((self.bits >> index) & T::one()) != T::zero()
    }

    /// Adds `index` to the set.
    pub fn insert(&mut self, index: usize) -> Result<(), CellSetError> {
        self.check_bounds(index)?;
        self.bits = self.bits | (T::one() << index);
        Ok(())
    }

    /// Removes `index` from the set.
    pub fn remove(&mut self, index: usize) -> Result<(), CellSetError> {
        self.check_bounds(index)?;
        self.bits = self.bits & !(T::one() << index);
        Ok(())
    }

    #[inline]
    fn check_bounds(&self, index: usize) -> Result<(), CellSetError> {
        if index >= self.len {
            Err(CellSetError::IndexOutOfBounds {
                index,
                cells: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// Lowest index present, if any.
    pub fn first(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.bits.trailing_zeros() as usize)
        }
    }

    /// Iterator over the present indices in ascending order.
    #[inline]
    pub fn iter(&self) -> Indices<'_, T> {
        Indices { set: self, idx: 0 }
    }

    #[inline]
    fn with_bits(&self, bits: T) -> Self {
        CellSet {
            bits: bits & Self::mask(self.len),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the indices of a cell set.
#[derive(Clone, Copy)]
pub struct Indices<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    set: &'a CellSet<T>,
    idx: usize,
}

impl<'a, T> Iterator for Indices<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < self.set.len {
            let idx = self.idx;
            self.idx += 1;
            if ((self.set.bits >> idx) & T::one()) != T::zero() {
                return Some(idx);
            }
        }
        None
    }
}

impl<'a, T> IntoIterator for &'a CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = usize;
    type IntoIter = Indices<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Binary operators assume both operands share a universe; the left operand's
// universe wins.

impl<T> BitAnd for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.with_bits(self.bits & rhs.bits)
    }
}

impl<T> BitOr for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.with_bits(self.bits | rhs.bits)
    }
}

impl<T> BitXor for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        self.with_bits(self.bits ^ rhs.bits)
    }
}

/// Complement within the universe.
impl<T> Not for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        self.with_bits(!self.bits)
    }
}

impl<T> BitAndAssign for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<T> BitOrAssign for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<T> BitXorAssign for CellSet<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

/// Cell set used by the planner pipeline.
pub type Cells = CellSet<u128>;
