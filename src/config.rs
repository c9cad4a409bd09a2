//! Fixed rule constants and the network node configuration.

/// Number of intersections on the board.
pub const NUM_POINTS: usize = 24;
/// Stones each side brings to the game.
pub const STONES_PER_PLAYER: u8 = 9;
/// Number of fixed mill triples.
pub const NUM_MILLS: usize = 16;
/// A side reduced to this many stones on board flies instead of sliding.
pub const FLYING_THRESHOLD: usize = 3;
/// Consecutive capture-free half-moves that draw a tournament game.
pub const HALFMOVE_LIMIT: u32 = 100;
/// Occurrences of one (board, side-to-move) pair that draw a tournament game.
pub const REPETITION_LIMIT: u8 = 3;
/// Game wins needed to take a best-of-3 match.
pub const WINS_TO_TAKE_MATCH: u8 = 2;
/// Upper bound on games in one match.
pub const MAX_GAMES_PER_MATCH: u8 = 3;
/// Faces on the die rolled to decide who plays White.
pub const DIE_FACES: u8 = 6;
/// Longest protocol line accepted before the buffer is discarded.
pub const MAX_LINE_LEN: usize = 256;

#[cfg(feature = "std")]
pub use node::*;

#[cfg(feature = "std")]
mod node {
    use std::time::Duration;

    /// How a peer treats commands received from the other side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum SyncPolicy {
        /// Remote moves are applied as reported. One the local rules refuse
        /// is logged and forced onto the board so both sides stay in step.
        #[default]
        TrustPeer,
        /// A remote command the local rules reject aborts the game as
        /// diverged.
        Validate,
    }

    /// Settings for a [`crate::PeerNode`] polling loop.
    #[derive(Debug, Clone, Copy)]
    pub struct NodeConfig {
        /// Pause between iterations when there is nothing to do.
        pub poll_interval: Duration,
        pub sync_policy: SyncPolicy,
    }

    impl Default for NodeConfig {
        fn default() -> Self {
            Self {
                poll_interval: Duration::from_millis(10),
                sync_policy: SyncPolicy::TrustPeer,
            }
        }
    }

    impl NodeConfig {
        pub fn with_policy(sync_policy: SyncPolicy) -> Self {
            Self {
                sync_policy,
                ..Self::default()
            }
        }
    }
}
