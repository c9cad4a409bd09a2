//! A set of board points packed into a `u32`.
//!
//! The type is `no_std` friendly and avoids heap allocations. Bit `i` stands
//! for point `i`; only the low 24 bits are ever set. Used for occupancy,
//! mill masks, adjacency and the result sets of the rules queries.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::common::Point;
use crate::config::NUM_POINTS;

const MASK: u32 = (1 << NUM_POINTS) - 1;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitBoard {
    bits: u32,
}

impl BitBoard {
    /// Empty set.
    #[inline]
    pub const fn new() -> Self {
        BitBoard { bits: 0 }
    }

    /// Every point on the board.
    #[inline]
    pub const fn full() -> Self {
        BitBoard { bits: MASK }
    }

    /// Set holding exactly `p`. Out-of-range points yield the empty set.
    #[inline]
    pub const fn single(p: Point) -> Self {
        if p < NUM_POINTS {
            BitBoard { bits: 1 << p }
        } else {
            BitBoard::new()
        }
    }

    pub const fn from_points(points: &[Point]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < points.len() {
            if points[i] < NUM_POINTS {
                bits |= 1 << points[i];
            }
            i += 1;
        }
        BitBoard { bits }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p < NUM_POINTS && (self.bits >> p) & 1 == 1
    }

    #[inline]
    pub fn insert(&mut self, p: Point) {
        self.bits |= Self::single(p).bits;
    }

    #[inline]
    pub fn remove(&mut self, p: Point) {
        self.bits &= !Self::single(p).bits;
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True when every point of `other` is also in `self`.
    #[inline]
    pub fn is_superset(&self, other: BitBoard) -> bool {
        self.bits & other.bits == other.bits
    }

    #[inline]
    pub fn into_raw(self) -> u32 {
        self.bits
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        BitBoard { bits: raw & MASK }
    }

    /// Points in ascending order.
    pub fn iter(&self) -> Points {
        Points { bits: self.bits }
    }
}

impl FromIterator<Point> for BitBoard {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = BitBoard::new();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

impl IntoIterator for BitBoard {
    type Item = Point;
    type IntoIter = Points;

    fn into_iter(self) -> Points {
        self.iter()
    }
}

/// Iterator over the points of a [`BitBoard`].
#[derive(Debug, Clone, Copy)]
pub struct Points {
    bits: u32,
}

impl Iterator for Points {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.bits == 0 {
            return None;
        }
        let p = self.bits.trailing_zeros() as Point;
        self.bits &= self.bits - 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Points {}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitAnd for BitBoard {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits & rhs.bits }
    }
}

impl BitOr for BitBoard {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits | rhs.bits }
    }
}

/// Complement within the 24 board points.
impl Not for BitBoard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self::from_raw(!self.bits)
    }
}

impl BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}
