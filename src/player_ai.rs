use crate::{
    ai::{self, Difficulty},
    game::{GameState, Move},
};
use rand::rngs::SmallRng;

use crate::player::Player;

/// Computer player backed by the heuristic opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiPlayer {
    difficulty: Difficulty,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl Player for AiPlayer {
    fn choose_move(&mut self, rng: &mut SmallRng, state: &GameState) -> Option<Move> {
        ai::choose_move(state, self.difficulty, rng)
    }
}
