use crate::{
    common::MoveError,
    game::{GameState, Move},
};
use rand::rngs::SmallRng;

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Choose the next action for the side that must act in `state`:
    /// a placement, a slide, or the capture owed after a mill. `None` means
    /// the player abandons the game.
    fn choose_move(&mut self, rng: &mut SmallRng, state: &GameState) -> Option<Move>;

    /// Inform the player that its last choice was refused.
    fn handle_rejected(&mut self, _mv: Move, _err: MoveError) {}

    /// Inform the player of a move made by the other side.
    fn handle_opponent_move(&mut self, _mv: Move, _state: &GameState) {}
}
