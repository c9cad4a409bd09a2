#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;

use crate::{
    ai::{self, Difficulty},
    board::{Board, Occupant},
    common::{Color, MoveError, Point},
    config::NUM_POINTS,
    game::{GameState, Move, Phase},
};
use rand::rngs::SmallRng;

use crate::player::Player;

/// Grid cell (row, column) of every point on the 7x7 drawing.
#[rustfmt::skip]
const LAYOUT: [(usize, usize); NUM_POINTS] = [
    (0, 0), (0, 3), (0, 6), (3, 6), (6, 6), (6, 3), (6, 0), (3, 0),
    (1, 1), (1, 3), (1, 5), (3, 5), (5, 5), (5, 3), (5, 1), (3, 1),
    (2, 2), (2, 3), (2, 4), (3, 4), (4, 4), (4, 3), (4, 2), (3, 2),
];

/// Human player typing moves on stdin. An empty line accepts the suggested
/// move, `q` abandons the game.
pub struct CliPlayer {
    hint: Difficulty,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self {
            hint: Difficulty::Medium,
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn occupant_char(o: Occupant) -> char {
    match o {
        Occupant::Empty => '.',
        Occupant::White => 'W',
        Occupant::Black => 'B',
    }
}

fn point_at(row: usize, col: usize) -> Option<Point> {
    LAYOUT.iter().position(|&cell| cell == (row, col))
}

/// Print the stones next to a legend of point numbers.
pub fn print_board(board: &Board) {
    for row in 0..7 {
        let mut stones = String::new();
        let mut legend = String::new();
        for col in 0..7 {
            match point_at(row, col) {
                Some(p) => {
                    stones.push_str(&std::format!("  {}", occupant_char(board.get(p))));
                    legend.push_str(&std::format!(" {:>2}", p));
                }
                None => {
                    stones.push_str("   ");
                    legend.push_str("   ");
                }
            }
        }
        std::println!("{}        {}", stones, legend);
    }
}

/// Board plus a status line for the side that must act.
pub fn print_player_view(state: &GameState) {
    print_board(state.board());
    let status = match state.phase() {
        Phase::Placing => std::format!(
            "{} to place ({} in hand)",
            state.turn(),
            state.in_hand(state.turn())
        ),
        Phase::Moving if state.board().is_flying(state.turn()) => {
            std::format!("{} to move (flying)", state.turn())
        }
        Phase::Moving => std::format!("{} to move", state.turn()),
        Phase::Removing { remover } => std::format!("{} closed a mill and removes a stone", remover),
        Phase::Over(outcome) => std::format!("Game over: {:?}", outcome),
    };
    std::println!(
        "{}  [White {} on board / {} removed, Black {} on board / {} removed]",
        status,
        state.on_board(Color::White),
        state.removed(Color::White),
        state.on_board(Color::Black),
        state.removed(Color::Black),
    );
}

fn describe(mv: Move) -> String {
    match mv {
        Move::Place(p) => std::format!("{}", p),
        Move::Slide { from, to } => std::format!("{} {}", from, to),
        Move::Remove(p) => std::format!("{}", p),
    }
}

/// Read one move for `phase` from `line`: a single point when placing or
/// removing, `from to` when moving. Optional leading verbs are accepted.
pub fn parse_move(phase: Phase, line: &str) -> Option<Move> {
    let numbers: Vec<Point> = line
        .split_whitespace()
        .filter(|tok| !matches!(tok.to_ascii_lowercase().as_str(), "place" | "move" | "remove"))
        .map(|tok| tok.parse().ok())
        .collect::<Option<_>>()?;
    match (phase, numbers.as_slice()) {
        (Phase::Placing, [p]) => Some(Move::Place(*p)),
        (Phase::Moving, [from, to]) => Some(Move::Slide {
            from: *from,
            to: *to,
        }),
        (Phase::Removing { .. }, [p]) => Some(Move::Remove(*p)),
        _ => None,
    }
}

impl Player for CliPlayer {
    fn choose_move(&mut self, rng: &mut SmallRng, state: &GameState) -> Option<Move> {
        let suggestion = ai::choose_move(state, self.hint, rng)?;
        let stdin = io::stdin();
        loop {
            std::println!();
            print_player_view(state);
            std::print!("Your move [{}]: ", describe(suggestion));
            io::stdout().flush().ok()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).ok()? == 0 {
                return None;
            }
            let line = line.trim();
            if line.is_empty() {
                return Some(suggestion);
            }
            if line.eq_ignore_ascii_case("q") {
                return None;
            }
            match parse_move(state.phase(), line) {
                Some(mv) => return Some(mv),
                None => std::println!("Invalid input"),
            }
        }
    }

    fn handle_rejected(&mut self, mv: Move, err: MoveError) {
        std::println!("{} refused: {}", describe(mv), err);
    }

    fn handle_opponent_move(&mut self, mv: Move, _state: &GameState) {
        std::println!("Opponent played {:?}", mv);
    }
}
