//! Dice, best-of-3 scoring and the local game loop. Participants are
//! identified by index (0 or 1) so scores follow people, not colors.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    common::{Color, Outcome, Ruleset},
    config::{DIE_FACES, MAX_GAMES_PER_MATCH, WINS_TO_TAKE_MATCH},
    game::GameState,
    player::Player,
};

/// Result of the pre-game dice: one die per participant, never tied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    pub rolls: [u8; 2],
}

impl DiceRoll {
    /// Participant with the higher roll, who plays White.
    pub fn white(&self) -> usize {
        if self.rolls[0] > self.rolls[1] {
            0
        } else {
            1
        }
    }

    /// Color assigned to `participant`.
    pub fn color_of(&self, participant: usize) -> Color {
        if participant == self.white() {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Roll one die per participant, repeating until the values differ.
pub fn roll_for_start<R: Rng + ?Sized>(rng: &mut R) -> DiceRoll {
    loop {
        let a = rng.random_range(1..=DIE_FACES);
        let b = rng.random_range(1..=DIE_FACES);
        if a != b {
            return DiceRoll { rolls: [a, b] };
        }
        log::debug!("dice tied at {}, rolling again", a);
    }
}

/// Final verdict of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    Winner(usize),
    Drawn,
}

/// Best-of-3 score keeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    wins: [u8; 2],
    draws: u8,
    games: u8,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished game in which participant `white` played White.
    pub fn record(&mut self, white: usize, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win(Color::White) => self.wins[white] += 1,
            Outcome::Win(Color::Black) => self.wins[1 - white] += 1,
            Outcome::Draw => self.draws += 1,
        }
        log::info!(
            "game {} finished: {:?}, score {}-{} ({} drawn)",
            self.games,
            outcome,
            self.wins[0],
            self.wins[1],
            self.draws
        );
    }

    pub fn wins(&self, participant: usize) -> u8 {
        self.wins[participant]
    }

    pub fn draws(&self) -> u8 {
        self.draws
    }

    pub fn games_played(&self) -> u8 {
        self.games
    }

    /// Two wins for one side, or three games played.
    pub fn is_over(&self) -> bool {
        self.wins.iter().any(|&w| w >= WINS_TO_TAKE_MATCH) || self.games >= MAX_GAMES_PER_MATCH
    }

    /// `None` while the match is still running.
    pub fn result(&self) -> Option<MatchResult> {
        if !self.is_over() {
            return None;
        }
        Some(
            match self.wins.iter().position(|&w| w >= WINS_TO_TAKE_MATCH) {
                Some(p) => MatchResult::Winner(p),
                None => MatchResult::Drawn,
            },
        )
    }
}

/// Play one game between two local players, participant `white` taking
/// White. Refused moves are reported back and the same player asked again.
/// Returns `None` when a player abandons the game.
pub fn play_local_game(
    players: &mut [&mut dyn Player; 2],
    white: usize,
    ruleset: Ruleset,
    rng: &mut SmallRng,
) -> Option<Outcome> {
    let mut state = GameState::new(ruleset);
    loop {
        if let Some(outcome) = state.outcome() {
            return Some(outcome);
        }
        let seat = match state.actor() {
            Color::White => white,
            Color::Black => 1 - white,
        };
        let Some(mv) = players[seat].choose_move(rng, &state) else {
            log::info!("participant {} abandoned the game", seat);
            return None;
        };
        match state.apply(mv) {
            Ok(_) => players[1 - seat].handle_opponent_move(mv, &state),
            Err(err) => players[seat].handle_rejected(mv, err),
        }
    }
}

/// Best-of-3 between two local players with fresh dice before every game.
pub fn play_local_match(
    players: &mut [&mut dyn Player; 2],
    ruleset: Ruleset,
    rng: &mut SmallRng,
) -> Option<MatchResult> {
    let mut score = Match::new();
    while !score.is_over() {
        let dice = roll_for_start(rng);
        log::info!(
            "dice {} vs {}: participant {} plays White",
            dice.rolls[0],
            dice.rolls[1],
            dice.white()
        );
        let outcome = play_local_game(players, dice.white(), ruleset, rng)?;
        score.record(dice.white(), outcome);
    }
    score.result()
}
