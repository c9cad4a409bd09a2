//! Mutable game state. All mutation goes through the operations in
//! [`crate::rules`]; this module holds the data, its accessors and the
//! read-only snapshot handed to renderers.

use alloc::collections::BTreeMap;

use crate::{
    board::{Board, Occupant},
    common::{Color, Outcome, Point, Ruleset},
    config::{NUM_POINTS, STONES_PER_PLAYER},
};

/// Where the game stands. `Removing` interrupts `Placing` or `Moving` after a
/// mill forms; which of the two resumes follows from the stones left in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placing,
    Moving,
    Removing { remover: Color },
    Over(Outcome),
}

/// One half-move or the capture completing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    Place(Point),
    Slide { from: Point, to: Point },
    Remove(Point),
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) in_hand: [u8; 2],
    pub(crate) removed: [u8; 2],
    pub(crate) phase: Phase,
    pub(crate) turn: Color,
    pub(crate) last_move: [Option<(Point, Point)>; 2],
    pub(crate) ruleset: Ruleset,
    /// (board key, side to move) -> occurrences, filled once moving begins.
    pub(crate) repetitions: BTreeMap<(u64, Color), u8>,
    pub(crate) halfmove_clock: u32,
    /// Mill indices each side held after the last completed mutation.
    pub(crate) standing_mills: [u16; 2],
    pub(crate) last_was_slide: bool,
    pub(crate) half_moves: u32,
}

/// Read-only view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: [Occupant; NUM_POINTS],
    pub phase: Phase,
    pub turn: Color,
    pub pending_removal: Option<Color>,
    pub in_hand: [u8; 2],
    pub on_board: [u8; 2],
    pub removed: [u8; 2],
    pub ruleset: Ruleset,
    pub halfmove_clock: u32,
    pub repetition_count: u8,
    pub half_moves: u32,
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Fresh game: empty board, nine stones in each hand, White to place.
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            board: Board::new(),
            in_hand: [STONES_PER_PLAYER; 2],
            removed: [0; 2],
            phase: Phase::Placing,
            turn: Color::White,
            last_move: [None; 2],
            ruleset,
            repetitions: BTreeMap::new(),
            halfmove_clock: 0,
            standing_mills: [0; 2],
            last_was_slide: false,
            half_moves: 0,
        }
    }

    /// Build a position directly, for analysis and tests. Stones not on the
    /// board and not in hand count as removed. Returns `None` when a point is
    /// out of range, doubly occupied, or a side would exceed nine stones.
    pub fn from_position(
        ruleset: Ruleset,
        white: &[Point],
        black: &[Point],
        turn: Color,
        in_hand: [u8; 2],
    ) -> Option<Self> {
        let mut state = Self::new(ruleset);
        for (color, points) in [(Color::White, white), (Color::Black, black)] {
            for &p in points {
                if p >= NUM_POINTS || state.board.color_at(p).is_some() {
                    return None;
                }
                state.board.put(p, color);
            }
            let used = state.board.count(color) + usize::from(in_hand[color.index()]);
            if used > usize::from(STONES_PER_PLAYER) {
                return None;
            }
            state.removed[color.index()] = STONES_PER_PLAYER - used as u8;
        }
        state.in_hand = in_hand;
        state.turn = turn;
        state.phase = if in_hand == [0, 0] {
            Phase::Moving
        } else {
            Phase::Placing
        };
        state.standing_mills = [state.board.mills(Color::White), state.board.mills(Color::Black)];
        Some(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose half-move is in progress.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Side that must act now: the remover while a capture is pending,
    /// otherwise the turn owner.
    pub fn actor(&self) -> Color {
        match self.phase {
            Phase::Removing { remover } => remover,
            _ => self.turn,
        }
    }

    pub fn pending_removal(&self) -> Option<Color> {
        match self.phase {
            Phase::Removing { remover } => Some(remover),
            _ => None,
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn in_hand(&self, color: Color) -> u8 {
        self.in_hand[color.index()]
    }

    pub fn on_board(&self, color: Color) -> u8 {
        self.board.count(color) as u8
    }

    pub fn removed(&self, color: Color) -> u8 {
        self.removed[color.index()]
    }

    /// `(from, to)` of the most recent slide by `color`.
    pub fn last_move(&self, color: Color) -> Option<(Point, Point)> {
        self.last_move[color.index()]
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Occurrences of the current board with the current side to move.
    pub fn repetition_count(&self) -> u8 {
        self.repetitions
            .get(&(self.board.key(), self.turn))
            .copied()
            .unwrap_or(0)
    }

    /// Mill indices currently credited to `color`.
    pub fn standing_mills(&self, color: Color) -> u16 {
        self.standing_mills[color.index()]
    }

    /// Completed half-moves, captures not counted separately.
    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.occupants(),
            phase: self.phase,
            turn: self.turn,
            pending_removal: self.pending_removal(),
            in_hand: self.in_hand,
            on_board: [self.on_board(Color::White), self.on_board(Color::Black)],
            removed: self.removed,
            ruleset: self.ruleset,
            halfmove_clock: self.halfmove_clock,
            repetition_count: self.repetition_count(),
            half_moves: self.half_moves,
            outcome: self.outcome(),
        }
    }
}
