use morris::{Color, GameState, Move, MoveError, Outcome, Phase, Ruleset};

fn moving(ruleset: Ruleset, white: &[usize], black: &[usize], turn: Color) -> GameState {
    GameState::from_position(ruleset, white, black, turn, [0, 0]).unwrap()
}

fn slide(state: &mut GameState, from: usize, to: usize) -> bool {
    state.apply(Move::Slide { from, to }).unwrap()
}

#[test]
fn fresh_game_starts_with_white_placing() {
    let state = GameState::new(Ruleset::Relaxed);
    assert_eq!(state.phase(), Phase::Placing);
    assert_eq!(state.turn(), Color::White);
    assert_eq!(state.in_hand(Color::White), 9);
    assert_eq!(state.in_hand(Color::Black), 9);
    assert_eq!(state.legal_placements().count_ones(), 24);
    assert!(state.legal_removals().is_empty());
    assert!(state.outcome().is_none());
}

#[test]
fn radial_mill_in_placing_phase_requires_removal() {
    let mut state = GameState::new(Ruleset::Relaxed);
    for p in [1, 0, 9, 2] {
        assert!(!state.place_stone(p).unwrap());
    }
    assert!(state.place_stone(17).unwrap());
    assert!(state.must_remove());
    assert_eq!(state.pending_removal(), Some(Color::White));
    assert_eq!(state.actor(), Color::White);
    assert_eq!(state.turn(), Color::White);
    assert_ne!(state.board().mills(Color::White), 0);
    assert_eq!(state.legal_removals().iter().collect::<Vec<_>>(), vec![0, 2]);

    // Nothing else is allowed until the capture is made.
    assert_eq!(state.place_stone(5), Err(MoveError::WrongPhase));

    state.remove_stone(2).unwrap();
    assert_eq!(state.phase(), Phase::Placing);
    assert_eq!(state.turn(), Color::Black);
    assert_eq!(state.removed(Color::Black), 1);
    assert_eq!(state.on_board(Color::Black), 1);
}

#[test]
fn placement_errors_leave_state_untouched() {
    let mut state = GameState::new(Ruleset::Relaxed);
    state.place_stone(4).unwrap();
    let before = state.clone();
    assert_eq!(state.place_stone(4), Err(MoveError::Occupied));
    assert_eq!(state.place_stone(24), Err(MoveError::InvalidPoint));
    assert_eq!(state.slide_stone(4, 5), Err(MoveError::WrongPhase));
    assert_eq!(state.remove_stone(4), Err(MoveError::WrongPhase));
    assert_eq!(state.apply_as(Color::White, Move::Place(5)), Err(MoveError::WrongPlayer));
    assert_eq!(state, before);
}

#[test]
fn last_placements_switch_to_moving() {
    let mut state =
        GameState::from_position(Ruleset::Relaxed, &[0, 3, 8, 12], &[16, 19, 22, 5], Color::White, [1, 1])
            .unwrap();
    assert!(!state.place_stone(14).unwrap());
    assert_eq!(state.phase(), Phase::Placing);
    assert!(!state.place_stone(10).unwrap());
    assert_eq!(state.phase(), Phase::Moving);
    assert_eq!(state.turn(), Color::White);
    assert!(state.legal_placements().is_empty());
    assert!(!state.all_slides().is_empty());
}

#[test]
fn stone_counts_add_up_to_nine() {
    let state =
        GameState::from_position(Ruleset::Relaxed, &[0, 3], &[5], Color::Black, [4, 6]).unwrap();
    for c in Color::BOTH {
        assert_eq!(state.on_board(c) + state.in_hand(c) + state.removed(c), 9);
    }
    assert!(GameState::from_position(Ruleset::Relaxed, &[0, 0], &[], Color::White, [0, 0]).is_none());
    assert!(GameState::from_position(Ruleset::Relaxed, &[0, 1], &[], Color::White, [8, 0]).is_none());
}

#[test]
fn slides_follow_adjacency() {
    let state = moving(Ruleset::Relaxed, &[0, 12, 14, 22], &[4, 6, 18, 20], Color::White);
    assert_eq!(state.legal_slides(0).iter().collect::<Vec<_>>(), vec![1, 7]);
    assert_eq!(state.legal_slides(12).iter().collect::<Vec<_>>(), vec![11, 13]);
    // Not our stone, and an empty point.
    assert!(state.legal_slides(4).is_empty());
    assert!(state.legal_slides(1).is_empty());

    let mut state = state;
    assert_eq!(state.slide_stone(0, 2), Err(MoveError::NotReachable));
    assert_eq!(state.slide_stone(4, 3), Err(MoveError::NotOwnStone));
    assert_eq!(state.slide_stone(12, 14), Err(MoveError::Occupied));
    assert_eq!(state.place_stone(1), Err(MoveError::WrongPhase));
}

#[test]
fn three_stones_fly_anywhere() {
    let state = moving(Ruleset::Relaxed, &[0, 1, 10], &[5, 14, 16, 20], Color::White);
    assert!(state.board().is_flying(Color::White));
    assert_eq!(state.legal_slides(10).count_ones(), 24 - 7);
}

#[test]
fn standing_mill_does_not_grant_capture() {
    let mut state = moving(Ruleset::Relaxed, &[0, 1, 2, 12], &[5, 14, 19], Color::White);
    assert!(!slide(&mut state, 12, 11));
    assert!(!state.must_remove());
    assert_eq!(state.turn(), Color::Black);
}

#[test]
fn reopening_and_closing_a_mill_captures_again() {
    let mut state = moving(Ruleset::Relaxed, &[0, 1, 2, 12], &[5, 14, 19], Color::White);
    assert!(!slide(&mut state, 1, 9));
    assert!(!slide(&mut state, 5, 4));
    assert!(slide(&mut state, 9, 1));
    assert_eq!(state.pending_removal(), Some(Color::White));
    assert_eq!(state.legal_removals().count_ones(), 3);
}

#[test]
fn capture_down_to_two_stones_wins() {
    let mut state = moving(Ruleset::Relaxed, &[0, 1, 10], &[5, 14, 16], Color::White);
    assert!(slide(&mut state, 10, 2));
    state.apply(Move::Remove(5)).unwrap();
    assert_eq!(state.outcome(), Some(Outcome::Win(Color::White)));
    assert!(state.is_over());
    assert!(state.legal_moves().is_empty());
    assert_eq!(state.apply(Move::Slide { from: 0, to: 7 }), Err(MoveError::GameOver));
}

#[test]
fn mill_stones_are_protected_while_others_exist() {
    let mut state =
        GameState::from_position(Ruleset::Relaxed, &[0, 1], &[8, 9, 10, 20], Color::White, [3, 3])
            .unwrap();
    assert!(state.place_stone(2).unwrap());
    assert_eq!(state.legal_removals().iter().collect::<Vec<_>>(), vec![20]);
    assert_eq!(state.remove_stone(9), Err(MoveError::Protected));
    assert_eq!(state.remove_stone(0), Err(MoveError::NotOpponentStone));
    assert_eq!(state.remove_stone(3), Err(MoveError::NotOpponentStone));
    state.remove_stone(20).unwrap();
    assert_eq!(state.turn(), Color::Black);
}

#[test]
fn mill_stones_can_be_taken_when_nothing_else_is_left() {
    let mut state =
        GameState::from_position(Ruleset::Relaxed, &[0, 1], &[8, 9, 10], Color::White, [3, 3])
            .unwrap();
    assert!(state.place_stone(2).unwrap());
    assert_eq!(state.legal_removals().iter().collect::<Vec<_>>(), vec![8, 9, 10]);
    state.remove_stone(9).unwrap();
    assert_eq!(state.board().mill_count(Color::Black), 0);
}

#[test]
fn blocked_side_loses() {
    let mut state = moving(Ruleset::Relaxed, &[0, 2, 4, 6], &[1, 3, 5, 15, 20], Color::Black);
    assert!(!slide(&mut state, 15, 7));
    assert_eq!(state.outcome(), Some(Outcome::Win(Color::Black)));
}

#[test]
fn tournament_forbids_immediate_reversal() {
    let mut state = moving(Ruleset::Tournament, &[0, 12, 14, 22], &[4, 6, 18, 20], Color::White);
    slide(&mut state, 0, 1);
    slide(&mut state, 18, 17);
    assert_eq!(state.legal_slides(1).iter().collect::<Vec<_>>(), vec![2, 9]);
    assert_eq!(state.slide_stone(1, 0), Err(MoveError::Pendulum));
    assert!(!state.legal_moves().contains(&Move::Slide { from: 1, to: 0 }));
    // Another stone in between lifts the restriction.
    slide(&mut state, 12, 11);
    slide(&mut state, 17, 16);
    assert!(state.legal_slides(1).contains(0));
}

#[test]
fn relaxed_allows_immediate_reversal() {
    let mut state = moving(Ruleset::Relaxed, &[0, 12, 14, 22], &[4, 6, 18, 20], Color::White);
    slide(&mut state, 0, 1);
    slide(&mut state, 18, 17);
    assert!(state.legal_slides(1).contains(0));
}

#[test]
fn reversal_is_allowed_when_it_is_the_only_slide() {
    let mut state = moving(Ruleset::Tournament, &[0, 2, 4, 6], &[1, 3, 5, 15, 20], Color::White);
    slide(&mut state, 6, 7);
    slide(&mut state, 20, 19);
    assert!(!state.is_over());
    assert_eq!(state.all_slides(), vec![(7, 6)]);
    assert!(!slide(&mut state, 7, 6));
}

// White shuffles 0<->1 and 12<->13, Black 16<->17 and 20<->21.
const CYCLE: [(usize, usize); 8] = [
    (0, 1),
    (16, 17),
    (12, 13),
    (20, 21),
    (1, 0),
    (17, 16),
    (13, 12),
    (21, 20),
];

fn shuffle_position(ruleset: Ruleset) -> GameState {
    moving(ruleset, &[0, 12, 3, 9], &[16, 20, 6, 23], Color::White)
}

#[test]
fn threefold_repetition_draws_tournament_game() {
    let mut state = shuffle_position(Ruleset::Tournament);
    for (i, &(from, to)) in CYCLE.iter().cycle().take(16).enumerate() {
        slide(&mut state, from, to);
        assert!(!state.is_over(), "ended early after slide {}", i + 1);
    }
    assert_eq!(state.repetition_count(), 2);
    slide(&mut state, 0, 1);
    assert_eq!(state.repetition_count(), 3);
    assert_eq!(state.outcome(), Some(Outcome::Draw));
    assert_eq!(state.halfmove_clock(), 17);
}

#[test]
fn relaxed_games_never_draw() {
    let mut state = shuffle_position(Ruleset::Relaxed);
    for &(from, to) in CYCLE.iter().cycle().take(40) {
        slide(&mut state, from, to);
    }
    assert!(!state.is_over());
    assert_eq!(state.halfmove_clock(), 0);
}

#[test]
fn capture_resets_halfmove_clock() {
    let mut state = moving(Ruleset::Tournament, &[0, 1, 3, 12], &[5, 16, 19, 22], Color::White);
    slide(&mut state, 12, 11);
    slide(&mut state, 19, 20);
    assert_eq!(state.halfmove_clock(), 2);
    assert!(slide(&mut state, 3, 2));
    assert_eq!(state.halfmove_clock(), 2);
    state.apply(Move::Remove(5)).unwrap();
    assert_eq!(state.halfmove_clock(), 0);
    slide(&mut state, 20, 19);
    assert_eq!(state.halfmove_clock(), 1);
}

#[test]
fn snapshot_reflects_state() {
    let mut state = GameState::new(Ruleset::Tournament);
    state.place_stone(3).unwrap();
    let snap = state.snapshot();
    assert_eq!(snap.board[3], morris::Occupant::White);
    assert_eq!(snap.turn, Color::Black);
    assert_eq!(snap.in_hand, [8, 9]);
    assert_eq!(snap.on_board, [1, 0]);
    assert_eq!(snap.ruleset, Ruleset::Tournament);
    assert_eq!(snap.outcome, None);
    assert_eq!(snap.half_moves, 1);
}
