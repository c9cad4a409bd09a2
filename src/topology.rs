//! Static board topology: three concentric rings of eight points each.
//!
//! Points 0-7 form the outer ring, 8-15 the middle and 16-23 the inner ring,
//! numbered clockwise from the top-left corner. Even offsets are corners, odd
//! offsets are ring midpoints; only midpoints connect across rings.

use crate::bitboard::BitBoard;
use crate::common::Point;
use crate::config::{NUM_MILLS, NUM_POINTS};

const RING_SIZE: usize = 8;

/// The 16 mill triples: four sides per ring, then the four radial lines.
pub const MILLS: [[Point; 3]; NUM_MILLS] = [
    [0, 1, 2],
    [2, 3, 4],
    [4, 5, 6],
    [6, 7, 0],
    [8, 9, 10],
    [10, 11, 12],
    [12, 13, 14],
    [14, 15, 8],
    [16, 17, 18],
    [18, 19, 20],
    [20, 21, 22],
    [22, 23, 16],
    [1, 9, 17],
    [3, 11, 19],
    [5, 13, 21],
    [7, 15, 23],
];

/// Each mill as a point mask, in the order of [`MILLS`].
pub const MILL_MASKS: [BitBoard; NUM_MILLS] = {
    let mut masks = [BitBoard::new(); NUM_MILLS];
    let mut i = 0;
    while i < NUM_MILLS {
        masks[i] = BitBoard::from_points(&MILLS[i]);
        i += 1;
    }
    masks
};

const ADJACENCY: [BitBoard; NUM_POINTS] = build_adjacency();

const fn build_adjacency() -> [BitBoard; NUM_POINTS] {
    let mut raw = [0u32; NUM_POINTS];
    let mut p = 0;
    while p < NUM_POINTS {
        let ring = p / RING_SIZE;
        let offset = p % RING_SIZE;
        let next = ring * RING_SIZE + (offset + 1) % RING_SIZE;
        let prev = ring * RING_SIZE + (offset + RING_SIZE - 1) % RING_SIZE;
        raw[p] |= (1 << next) | (1 << prev);
        if offset % 2 == 1 {
            if ring > 0 {
                raw[p] |= 1 << (p - RING_SIZE);
            }
            if ring < 2 {
                raw[p] |= 1 << (p + RING_SIZE);
            }
        }
        p += 1;
    }
    let mut out = [BitBoard::new(); NUM_POINTS];
    let mut i = 0;
    while i < NUM_POINTS {
        out[i] = BitBoard::from_raw(raw[i]);
        i += 1;
    }
    out
}

/// Points directly connected to `p`. Empty for out-of-range points.
pub fn adjacency(p: Point) -> BitBoard {
    ADJACENCY.get(p).copied().unwrap_or_default()
}

/// The fixed mill triples in canonical order.
pub fn mills() -> &'static [[Point; 3]; NUM_MILLS] {
    &MILLS
}

/// Bitmask of the mill indices that contain `p`.
pub fn mills_through(p: Point) -> u16 {
    let mut out = 0u16;
    for (i, mask) in MILL_MASKS.iter().enumerate() {
        if mask.contains(p) {
            out |= 1 << i;
        }
    }
    out
}

/// Bitmask of mill indices whose three points all lie in `stones`.
pub fn closed_mills(stones: BitBoard) -> u16 {
    let mut out = 0u16;
    for (i, mask) in MILL_MASKS.iter().enumerate() {
        if stones.is_superset(*mask) {
            out |= 1 << i;
        }
    }
    out
}

/// Union of the points covered by the mills in `mill_bits`.
pub fn mill_points(mill_bits: u16) -> BitBoard {
    let mut out = BitBoard::new();
    for (i, mask) in MILL_MASKS.iter().enumerate() {
        if mill_bits & (1 << i) != 0 {
            out |= *mask;
        }
    }
    out
}
