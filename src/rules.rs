//! Rules engine: legality queries, mill detection, captures and the
//! win/draw evaluation. Queries never mutate; mutators either apply the whole
//! half-move step or return a [`MoveError`] with the state untouched.

use alloc::vec::Vec;

use crate::{
    bitboard::BitBoard,
    common::{Color, MoveError, Outcome, Point, Ruleset},
    config::{HALFMOVE_LIMIT, NUM_POINTS, REPETITION_LIMIT},
    game::{GameState, Move, Phase},
    topology,
};

impl GameState {
    /// Empty points the side to move may place on. Empty outside the placing
    /// phase or when that side has nothing left in hand.
    pub fn legal_placements(&self) -> BitBoard {
        if self.phase != Phase::Placing || self.in_hand(self.turn) == 0 {
            return BitBoard::new();
        }
        self.board.empty()
    }

    /// Place a stone for the side to move. Returns whether a new mill formed
    /// and a capture is now pending.
    pub fn place_stone(&mut self, point: Point) -> Result<bool, MoveError> {
        self.ensure_running()?;
        if self.phase != Phase::Placing {
            return Err(MoveError::WrongPhase);
        }
        if point >= NUM_POINTS {
            return Err(MoveError::InvalidPoint);
        }
        if self.board.occupied().contains(point) {
            return Err(MoveError::Occupied);
        }
        let mover = self.turn;
        if self.in_hand(mover) == 0 {
            return Err(MoveError::NoStonesInHand);
        }
        self.board.put(point, mover);
        self.in_hand[mover.index()] -= 1;
        self.last_was_slide = false;
        log::debug!("{} places on {}", mover, point);
        Ok(self.settle_after_move(mover, point))
    }

    /// Destinations for the stone on `from`. Adjacent empty points, or every
    /// empty point when the mover is down to three stones. Under tournament
    /// rules the reversal of the mover's previous slide is left out unless it
    /// is the only slide the mover has.
    pub fn legal_slides(&self, from: Point) -> BitBoard {
        if self.phase != Phase::Moving {
            return BitBoard::new();
        }
        let mover = self.turn;
        if self.board.color_at(from) != Some(mover) {
            return BitBoard::new();
        }
        let mut dests = self.reach(from, mover);
        if let Some((blocked_from, blocked_to)) = self.pendulum_block(mover) {
            if blocked_from == from {
                dests.remove(blocked_to);
            }
        }
        dests
    }

    /// Every legal `(from, to)` slide for the side to move.
    pub fn all_slides(&self) -> Vec<(Point, Point)> {
        self.board
            .stones(self.turn)
            .iter()
            .flat_map(|from| self.legal_slides(from).iter().map(move |to| (from, to)))
            .collect()
    }

    /// Move a stone of the side to move. Same contract as [`place_stone`].
    ///
    /// [`place_stone`]: GameState::place_stone
    pub fn slide_stone(&mut self, from: Point, to: Point) -> Result<bool, MoveError> {
        self.ensure_running()?;
        if self.phase != Phase::Moving {
            return Err(MoveError::WrongPhase);
        }
        if from >= NUM_POINTS || to >= NUM_POINTS {
            return Err(MoveError::InvalidPoint);
        }
        let mover = self.turn;
        if self.board.color_at(from) != Some(mover) {
            return Err(MoveError::NotOwnStone);
        }
        if self.board.occupied().contains(to) {
            return Err(MoveError::Occupied);
        }
        if !self.reach(from, mover).contains(to) {
            return Err(MoveError::NotReachable);
        }
        if !self.legal_slides(from).contains(to) {
            return Err(MoveError::Pendulum);
        }
        self.board.shift(from, to, mover);
        self.last_move[mover.index()] = Some((from, to));
        self.last_was_slide = true;
        log::debug!("{} slides {} -> {}", mover, from, to);
        Ok(self.settle_after_move(mover, to))
    }

    /// True while the last placement or slide owes a capture.
    pub fn must_remove(&self) -> bool {
        matches!(self.phase, Phase::Removing { .. })
    }

    /// Opponent stones the pending remover may take: those outside standing
    /// mills, or all of them when every one is in a mill.
    pub fn legal_removals(&self) -> BitBoard {
        let Phase::Removing { remover } = self.phase else {
            return BitBoard::new();
        };
        let victim = remover.opponent();
        let stones = self.board.stones(victim);
        let protected = topology::mill_points(self.board.mills(victim));
        let free = stones & !protected;
        if free.is_empty() {
            stones
        } else {
            free
        }
    }

    /// Take an opponent stone and complete the half-move.
    pub fn remove_stone(&mut self, point: Point) -> Result<(), MoveError> {
        self.ensure_running()?;
        let Phase::Removing { remover } = self.phase else {
            return Err(MoveError::WrongPhase);
        };
        if point >= NUM_POINTS {
            return Err(MoveError::InvalidPoint);
        }
        let victim = remover.opponent();
        if self.board.color_at(point) != Some(victim) {
            return Err(MoveError::NotOpponentStone);
        }
        if !self.legal_removals().contains(point) {
            return Err(MoveError::Protected);
        }
        self.take_stone(remover, point);
        Ok(())
    }

    /// Result of the position after a completed half-move, judged for the
    /// side now to move. Nothing is decided while stones are still being
    /// placed or a capture is pending.
    pub fn evaluate_terminal(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Over(outcome) => return Some(outcome),
            Phase::Placing | Phase::Removing { .. } => return None,
            Phase::Moving => {}
        }
        let mover = self.turn;
        let opponent = mover.opponent();
        if self.board.count(mover) < 3 {
            return Some(Outcome::Win(opponent));
        }
        if self.board.count(opponent) < 3 {
            return Some(Outcome::Win(mover));
        }
        if !self.has_slide(mover) {
            return Some(Outcome::Win(opponent));
        }
        if self.ruleset == Ruleset::Tournament
            && (self.repetition_count() >= REPETITION_LIMIT || self.halfmove_clock >= HALFMOVE_LIMIT)
        {
            return Some(Outcome::Draw);
        }
        None
    }

    /// Every legal action for [`GameState::actor`] in the current phase.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.phase {
            Phase::Placing => self.legal_placements().iter().map(Move::Place).collect(),
            Phase::Moving => self
                .all_slides()
                .into_iter()
                .map(|(from, to)| Move::Slide { from, to })
                .collect(),
            Phase::Removing { .. } => self.legal_removals().iter().map(Move::Remove).collect(),
            Phase::Over(_) => Vec::new(),
        }
    }

    /// Apply a move for whoever is to act. Returns whether a capture is now
    /// pending.
    pub fn apply(&mut self, mv: Move) -> Result<bool, MoveError> {
        match mv {
            Move::Place(p) => self.place_stone(p),
            Move::Slide { from, to } => self.slide_stone(from, to),
            Move::Remove(p) => self.remove_stone(p).map(|()| false),
        }
    }

    /// Like [`GameState::apply`] but refuses moves from the side not
    /// entitled to act.
    pub fn apply_as(&mut self, color: Color, mv: Move) -> Result<bool, MoveError> {
        self.ensure_running()?;
        if self.actor() != color {
            return Err(MoveError::WrongPlayer);
        }
        self.apply(mv)
    }

    /// Apply a peer's move for `color` as reported. A move the local rules
    /// accept goes through [`GameState::apply_as`]; anything else is forced
    /// onto the board with turn, counters and mill credit updated as if it
    /// were legal. A stone on the target point is displaced and counted as
    /// removed. Only moves that cannot be carried out at all are refused:
    /// a finished game, an out-of-range point, a missing source stone, or a
    /// placement with no stone left to place.
    pub fn apply_trusted(&mut self, color: Color, mv: Move) -> Result<bool, MoveError> {
        match self.apply_as(color, mv) {
            Err(MoveError::GameOver) => Err(MoveError::GameOver),
            Err(err) => {
                log::warn!("forcing {:?} by {}: {}", mv, color, err);
                self.force(color, mv)
            }
            ok => ok,
        }
    }

    /// End the game with an externally decided result (peer announcement or
    /// resignation).
    pub fn declare_outcome(&mut self, outcome: Outcome) {
        log::info!("game ends: {:?}", outcome);
        self.phase = Phase::Over(outcome);
    }

    fn force(&mut self, color: Color, mv: Move) -> Result<bool, MoveError> {
        let (a, b) = match mv {
            Move::Place(p) | Move::Remove(p) => (p, p),
            Move::Slide { from, to } => (from, to),
        };
        if a >= NUM_POINTS || b >= NUM_POINTS {
            return Err(MoveError::InvalidPoint);
        }
        let idx = color.index();
        match mv {
            Move::Place(p) => {
                if self.in_hand[idx] > 0 {
                    self.in_hand[idx] -= 1;
                } else if self.removed[idx] > 0 {
                    self.removed[idx] -= 1;
                } else {
                    return Err(MoveError::NoStonesInHand);
                }
                self.turn = color;
                self.displace(p);
                self.board.put(p, color);
                self.last_was_slide = false;
                Ok(self.settle_after_move(color, p))
            }
            Move::Slide { from, to } => {
                if self.board.color_at(from) != Some(color) {
                    return Err(MoveError::NotOwnStone);
                }
                self.turn = color;
                if from != to {
                    self.displace(to);
                    self.board.shift(from, to, color);
                }
                self.last_move[idx] = Some((from, to));
                self.last_was_slide = true;
                Ok(self.settle_after_move(color, to))
            }
            Move::Remove(p) => {
                if self.board.color_at(p) != Some(color.opponent()) {
                    return Err(MoveError::NotOpponentStone);
                }
                self.turn = color;
                self.take_stone(color, p);
                Ok(false)
            }
        }
    }

    /// Clear `point`, counting whatever stood there as removed.
    fn displace(&mut self, point: Point) {
        if let Some(owner) = self.board.color_at(point) {
            self.board.take(point);
            self.removed[owner.index()] += 1;
        }
    }

    /// Capture the stone on `point` for `remover` and complete the half-move.
    fn take_stone(&mut self, remover: Color, point: Point) {
        let victim = remover.opponent();
        self.board.take(point);
        self.removed[victim.index()] += 1;
        if matches!(self.last_move[victim.index()], Some((_, to)) if to == point) {
            self.last_move[victim.index()] = None;
        }
        if self.ruleset == Ruleset::Tournament {
            self.halfmove_clock = 0;
        }
        log::debug!("{} removes {} stone on {}", remover, victim, point);
        self.finish_half_move(true);
    }

    fn ensure_running(&self) -> Result<(), MoveError> {
        if self.is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Raw destinations for a stone of `color` on `from`, ignoring the
    /// anti-pendulum rule.
    fn reach(&self, from: Point, color: Color) -> BitBoard {
        let empty = self.board.empty();
        if self.board.is_flying(color) {
            empty
        } else {
            topology::adjacency(from) & empty
        }
    }

    fn raw_slide_count(&self, color: Color) -> usize {
        self.board
            .stones(color)
            .iter()
            .map(|from| self.reach(from, color).count_ones())
            .sum()
    }

    /// The slide `color` may not play because it reverses its previous one.
    /// `None` when the rule does not apply or when that slide is the only one
    /// available, so the restriction alone never leaves a side without moves.
    fn pendulum_block(&self, color: Color) -> Option<(Point, Point)> {
        if self.ruleset != Ruleset::Tournament {
            return None;
        }
        let (prev_from, prev_to) = self.last_move[color.index()]?;
        if self.board.color_at(prev_to) != Some(color) || !self.reach(prev_to, color).contains(prev_from) {
            return None;
        }
        if self.raw_slide_count(color) <= 1 {
            return None;
        }
        Some((prev_to, prev_from))
    }

    fn has_slide(&self, color: Color) -> bool {
        // The pendulum block only bites when another slide exists.
        self.raw_slide_count(color) > 0
    }

    /// Credit newly formed mills through `point` and either open the capture
    /// sub-phase or complete the half-move.
    fn settle_after_move(&mut self, mover: Color, point: Point) -> bool {
        let before = self.standing_mills[mover.index()];
        let now = self.board.mills(mover);
        let created = now & !before & topology::mills_through(point);
        self.standing_mills[mover.index()] = now;
        let victim_stones = self.board.stones(mover.opponent());
        if created != 0 && !victim_stones.is_empty() {
            log::debug!("{} closes a mill at {}", mover, point);
            self.phase = Phase::Removing { remover: mover };
            true
        } else {
            self.finish_half_move(false);
            false
        }
    }

    fn finish_half_move(&mut self, captured: bool) {
        self.standing_mills = [self.board.mills(Color::White), self.board.mills(Color::Black)];
        self.turn = self.turn.opponent();
        self.half_moves += 1;
        self.phase = if self.in_hand == [0, 0] {
            Phase::Moving
        } else {
            Phase::Placing
        };
        if self.ruleset == Ruleset::Tournament && self.last_was_slide {
            if !captured {
                self.halfmove_clock += 1;
            }
            *self.repetitions.entry((self.board.key(), self.turn)).or_insert(0) += 1;
        }
        if let Some(outcome) = self.evaluate_terminal() {
            log::info!("game ends after {} half-moves: {:?}", self.half_moves, outcome);
            self.phase = Phase::Over(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_position(ruleset: Ruleset) -> GameState {
        GameState::from_position(ruleset, &[0, 10, 12, 20], &[6, 14, 18, 22], Color::White, [0, 0])
            .unwrap()
    }

    #[test]
    fn hundredth_quiet_half_move_draws_tournament_game() {
        let mut state = quiet_position(Ruleset::Tournament);
        state.halfmove_clock = HALFMOVE_LIMIT - 1;
        assert_eq!(state.slide_stone(0, 1), Ok(false));
        assert_eq!(state.halfmove_clock(), HALFMOVE_LIMIT);
        assert_eq!(state.repetition_count(), 1);
        assert_eq!(state.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn ninety_ninth_quiet_half_move_does_not_draw() {
        let mut state = quiet_position(Ruleset::Tournament);
        state.halfmove_clock = HALFMOVE_LIMIT - 2;
        state.slide_stone(0, 1).unwrap();
        assert_eq!(state.halfmove_clock(), HALFMOVE_LIMIT - 1);
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn relaxed_game_ignores_halfmove_clock() {
        let mut state = quiet_position(Ruleset::Relaxed);
        state.halfmove_clock = HALFMOVE_LIMIT - 1;
        state.slide_stone(0, 1).unwrap();
        assert_eq!(state.outcome(), None);
        assert_eq!(state.phase(), Phase::Moving);
    }

    #[test]
    fn trusted_placement_on_occupied_point_displaces_stone() {
        let mut state = GameState::new(Ruleset::Relaxed);
        state.place_stone(14).unwrap();
        assert_eq!(state.apply_trusted(Color::Black, Move::Place(14)), Ok(false));
        assert_eq!(state.board().color_at(14), Some(Color::Black));
        assert_eq!(state.removed(Color::White), 1);
        assert_eq!(state.in_hand(Color::Black), 8);
        assert_eq!(state.turn(), Color::White);
        for color in Color::BOTH {
            let total = state.on_board(color) + state.in_hand(color) + state.removed(color);
            assert_eq!(total, 9);
        }
    }

    #[test]
    fn trusted_move_out_of_turn_takes_the_turn() {
        let mut state = GameState::new(Ruleset::Relaxed);
        assert_eq!(state.apply_trusted(Color::Black, Move::Place(3)), Ok(false));
        assert_eq!(state.board().color_at(3), Some(Color::Black));
        assert_eq!(state.turn(), Color::White);
        assert_eq!(state.half_moves(), 1);
    }

    #[test]
    fn trusted_slide_closing_a_mill_opens_capture() {
        // 5 -> 2 is not a legal slide; forcing it completes [0, 1, 2].
        let mut state = GameState::from_position(
            Ruleset::Relaxed,
            &[0, 1, 5, 13],
            &[8, 16, 20, 22],
            Color::White,
            [0, 0],
        )
        .unwrap();
        assert_eq!(state.apply_trusted(Color::White, Move::Slide { from: 5, to: 2 }), Ok(true));
        assert_eq!(state.pending_removal(), Some(Color::White));
        assert_eq!(state.apply_trusted(Color::White, Move::Remove(8)), Ok(false));
        assert_eq!(state.turn(), Color::Black);
        assert_eq!(state.removed(Color::Black), 1);
    }

    #[test]
    fn trusted_moves_that_cannot_happen_are_refused() {
        let mut state = quiet_position(Ruleset::Relaxed);
        let before = state.clone();
        assert_eq!(
            state.apply_trusted(Color::White, Move::Slide { from: 2, to: 3 }),
            Err(MoveError::NotOwnStone)
        );
        assert_eq!(state.apply_trusted(Color::White, Move::Remove(0)), Err(MoveError::NotOpponentStone));
        assert_eq!(state, before);

        state.declare_outcome(Outcome::Draw);
        assert_eq!(state.apply_trusted(Color::White, Move::Place(2)), Err(MoveError::GameOver));
    }
}
