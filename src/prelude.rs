//! Commonly used types and utilities for ease of import.

pub use crate::{
    choose_move, play_local_game, play_local_match, AiPlayer, Color, Difficulty, GameState, Move,
    MoveError, Outcome, Phase, Player, Ruleset,
};

#[cfg(feature = "std")]
pub use crate::{print_player_view, CliPlayer, NodeConfig, PeerNode, Role, SyncPolicy};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
