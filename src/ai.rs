// Heuristic opponent at three difficulty levels.
// Trial moves are played on clones of the state and thrown away, so the
// committed game is never touched before a choice is returned.

use alloc::vec::Vec;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::{
    board::Board,
    common::Color,
    game::{GameState, Move, Phase},
};

/// Strength of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// Close a mill if possible, else block one, else random.
    #[default]
    Medium,
    /// One-ply greedy search over [`evaluate`].
    Hard,
}

const MILL_WEIGHT: i32 = 50;
const OPP_MILL_WEIGHT: i32 = 45;
const OPEN_TWO_WEIGHT: i32 = 12;
const MOBILITY_WEIGHT: i32 = 2;
const MATERIAL_WEIGHT: i32 = 3;

/// Static score of `board` from the point of view of `player`.
pub fn evaluate(board: &Board, player: Color) -> i32 {
    let opp = player.opponent();
    let count = |n: usize| n as i32;
    MILL_WEIGHT * count(board.mill_count(player))
        + OPEN_TWO_WEIGHT * count(board.open_twos(player))
        - OPP_MILL_WEIGHT * count(board.mill_count(opp))
        - OPEN_TWO_WEIGHT * count(board.open_twos(opp))
        + MOBILITY_WEIGHT * (count(board.mobility(player)) - count(board.mobility(opp)))
        + MATERIAL_WEIGHT * (count(board.count(player)) - count(board.count(opp)))
}

/// Recommend a move for the side that must act. `None` once the game is over
/// or when that side has nothing legal to do.
pub fn choose_move<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    match state.phase() {
        Phase::Over(_) => None,
        Phase::Removing { .. } => choose_removal(state, rng),
        Phase::Placing | Phase::Moving => {
            let moves = state.legal_moves();
            match difficulty {
                Difficulty::Easy => moves.choose(rng).copied(),
                Difficulty::Medium => choose_medium(state, &moves, rng),
                Difficulty::Hard => choose_hard(state, &moves, rng),
            }
        }
    }
}

/// Uniform pick among the opponent stones that may be taken. The rules
/// already restrict these to stones outside mills when any exist.
pub fn choose_removal<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Move> {
    let candidates: Vec<_> = state.legal_removals().iter().collect();
    candidates.choose(rng).copied().map(Move::Remove)
}

fn destination(mv: &Move) -> Option<usize> {
    match *mv {
        Move::Place(p) => Some(p),
        Move::Slide { to, .. } => Some(to),
        Move::Remove(_) => None,
    }
}

/// Whether playing `mv` closes a mill that earns a capture.
fn closes_mill(state: &GameState, mv: Move) -> bool {
    let mut trial = state.clone();
    matches!(trial.apply(mv), Ok(true))
}

fn choose_medium<R: Rng + ?Sized>(state: &GameState, moves: &[Move], rng: &mut R) -> Option<Move> {
    let closing: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&mv| closes_mill(state, mv))
        .collect();
    if let Some(mv) = closing.choose(rng) {
        return Some(*mv);
    }

    let threats = state.board().open_two_points(state.actor().opponent());
    let blocking: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|mv| destination(mv).is_some_and(|p| threats.contains(&p)))
        .collect();
    if let Some(mv) = blocking.choose(rng) {
        return Some(*mv);
    }

    moves.choose(rng).copied()
}

fn choose_hard<R: Rng + ?Sized>(state: &GameState, moves: &[Move], rng: &mut R) -> Option<Move> {
    let player = state.actor();
    let mut best_score = i32::MIN;
    let mut best: Vec<Move> = Vec::new();
    for &mv in moves {
        let mut trial = state.clone();
        if trial.apply(mv).is_err() {
            continue;
        }
        let score = evaluate(trial.board(), player);
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(mv);
        } else if score == best_score {
            best.push(mv);
        }
    }
    best.choose(rng).copied()
}
