//! Board occupancy: one [`BitBoard`] per color.

use crate::bitboard::BitBoard;
use crate::common::{Color, Point};
use crate::config::{FLYING_THRESHOLD, NUM_POINTS};
use crate::topology::{self, MILLS};

/// What stands on a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    #[default]
    Empty,
    White,
    Black,
}

impl From<Color> for Occupant {
    fn from(c: Color) -> Self {
        match c {
            Color::White => Occupant::White,
            Color::Black => Occupant::Black,
        }
    }
}

/// Stones on the 24 points. Mutators do not check rules; that is the job of
/// the rules engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    stones: [BitBoard; 2],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stones of one color.
    pub fn stones(&self, color: Color) -> BitBoard {
        self.stones[color.index()]
    }

    pub fn occupied(&self) -> BitBoard {
        self.stones[0] | self.stones[1]
    }

    pub fn empty(&self) -> BitBoard {
        !self.occupied()
    }

    pub fn count(&self, color: Color) -> usize {
        self.stones(color).count_ones()
    }

    pub fn get(&self, p: Point) -> Occupant {
        if self.stones[0].contains(p) {
            Occupant::White
        } else if self.stones[1].contains(p) {
            Occupant::Black
        } else {
            Occupant::Empty
        }
    }

    pub fn color_at(&self, p: Point) -> Option<Color> {
        match self.get(p) {
            Occupant::White => Some(Color::White),
            Occupant::Black => Some(Color::Black),
            Occupant::Empty => None,
        }
    }

    pub fn put(&mut self, p: Point, color: Color) {
        self.stones[color.index()].insert(p);
    }

    pub fn take(&mut self, p: Point) {
        self.stones[0].remove(p);
        self.stones[1].remove(p);
    }

    pub fn shift(&mut self, from: Point, to: Point, color: Color) {
        let set = &mut self.stones[color.index()];
        set.remove(from);
        set.insert(to);
    }

    /// Whether `color` is down to the flying threshold.
    pub fn is_flying(&self, color: Color) -> bool {
        self.count(color) == FLYING_THRESHOLD
    }

    /// Bitmask of mill indices fully held by `color`.
    pub fn mills(&self, color: Color) -> u16 {
        topology::closed_mills(self.stones(color))
    }

    pub fn mill_count(&self, color: Color) -> usize {
        self.mills(color).count_ones() as usize
    }

    /// Mills with two stones of `color` and an empty third point.
    pub fn open_twos(&self, color: Color) -> usize {
        self.open_two_points(color).len()
    }

    /// The empty third point of every two-of-three mill held by `color`,
    /// one entry per mill (a point may repeat).
    pub fn open_two_points(&self, color: Color) -> alloc::vec::Vec<Point> {
        let own = self.stones(color);
        let empty = self.empty();
        MILLS
            .iter()
            .filter_map(|mill| {
                let owned = mill.iter().filter(|&&p| own.contains(p)).count();
                let gap = mill.iter().copied().find(|&p| empty.contains(p));
                match (owned, gap) {
                    (2, Some(p)) => Some(p),
                    _ => None,
                }
            })
            .collect()
    }

    /// Empty destinations reachable by `color`: every empty point when
    /// flying, otherwise the empty neighbours summed over all stones.
    pub fn mobility(&self, color: Color) -> usize {
        let empty = self.empty();
        if self.is_flying(color) {
            return empty.count_ones();
        }
        self.stones(color)
            .iter()
            .map(|p| (topology::adjacency(p) & empty).count_ones())
            .sum()
    }

    /// Compact key of the full position, used by the repetition table.
    pub fn key(&self) -> u64 {
        (u64::from(self.stones[0].into_raw()) << 32) | u64::from(self.stones[1].into_raw())
    }

    /// Occupancy per point, index-aligned with the board.
    pub fn occupants(&self) -> [Occupant; NUM_POINTS] {
        core::array::from_fn(|p| self.get(p))
    }
}
