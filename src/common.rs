//! Common types for Nine Men's Morris: colors, rulesets, outcomes and move errors.

/// Index of one of the 24 intersections, `0..24`.
pub type Point = usize;

/// Side owning a stone. White always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Array slot used for per-color counters.
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Player number used on the wire: 1 = White, 2 = Black.
    pub fn wire_id(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 2,
        }
    }

    pub fn from_wire_id(id: u8) -> Option<Color> {
        match id {
            1 => Some(Color::White),
            2 => Some(Color::Black),
            _ => None,
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Rule variant agreed for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Ruleset {
    /// Plain rules: no draws, no anti-pendulum.
    #[default]
    Relaxed,
    /// Adds anti-pendulum, threefold repetition and the halfmove rule.
    Tournament,
}

/// Final result of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win(Color),
    Draw,
}

/// Reasons a placement, slide or removal is refused. Every variant is an
/// IllegalMove: the caller re-prompts and the state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The operation does not belong to the current phase.
    WrongPhase,
    /// Point index outside `0..24`.
    InvalidPoint,
    /// Target point already holds a stone.
    Occupied,
    /// Source point does not hold a stone of the side to move.
    NotOwnStone,
    /// Removal target is not an opponent stone.
    NotOpponentStone,
    /// Destination is neither adjacent nor reachable by flying.
    NotReachable,
    /// Tournament anti-pendulum: immediate reversal of the previous slide.
    Pendulum,
    /// Opponent stone sits in a standing mill while others do not.
    Protected,
    /// The side to move has no stones left to place.
    NoStonesInHand,
    /// Command issued by the side that is not entitled to act.
    WrongPlayer,
    /// The game already has an outcome.
    GameOver,
}

impl core::fmt::Display for MoveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MoveError::WrongPhase => write!(f, "Move not allowed in the current phase"),
            MoveError::InvalidPoint => write!(f, "Point is out of range"),
            MoveError::Occupied => write!(f, "Point is already occupied"),
            MoveError::NotOwnStone => write!(f, "No own stone on the source point"),
            MoveError::NotOpponentStone => write!(f, "No opponent stone on that point"),
            MoveError::NotReachable => write!(f, "Destination is not reachable"),
            MoveError::Pendulum => write!(f, "Reversing the previous slide is not allowed"),
            MoveError::Protected => write!(f, "Stone is protected by a mill"),
            MoveError::NoStonesInHand => write!(f, "No stones left to place"),
            MoveError::WrongPlayer => write!(f, "It is not this player's turn"),
            MoveError::GameOver => write!(f, "The game is already over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}
