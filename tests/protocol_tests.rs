use morris::{Color, Command, Move, ParseError, Ruleset};

#[test]
fn commands_encode_as_documented() {
    let cases = [
        (Command::Set { player: Color::White, point: 4 }, "SET 1 4"),
        (Command::Rem { player: Color::Black, point: 23 }, "REM 2 23"),
        (Command::Move { player: Color::Black, from: 9, to: 17 }, "MOVE 2 9 17"),
        (Command::Roll { client: 3, host: 5 }, "ROLL 3 5"),
        (Command::Rules(Ruleset::Tournament), "RULES TOURNAMENT"),
        (Command::Rules(Ruleset::Relaxed), "RULES RELAXED"),
        (Command::Start(Color::Black), "START BLACK"),
        (Command::Win(Color::White), "WIN 1"),
        (Command::Draw, "DRAW"),
    ];
    for (cmd, text) in cases {
        assert_eq!(cmd.to_string(), text);
        assert_eq!(text.parse::<Command>(), Ok(cmd));
    }
}

#[test]
fn parsing_tolerates_spacing_case_and_trailing_tokens() {
    assert_eq!(
        "  MOVE   1 0 1  extra".parse::<Command>(),
        Ok(Command::Move { player: Color::White, from: 0, to: 1 })
    );
    assert_eq!("START white".parse::<Command>(), Ok(Command::Start(Color::White)));
    assert_eq!("RULES tournament".parse::<Command>(), Ok(Command::Rules(Ruleset::Tournament)));
}

#[test]
fn malformed_lines_are_rejected() {
    assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
    assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
    assert_eq!("HELLO 1".parse::<Command>(), Err(ParseError::UnknownCommand("HELLO".into())));
    assert_eq!("SET 1".parse::<Command>(), Err(ParseError::MissingArgument("point")));
    assert_eq!("SET x 1".parse::<Command>(), Err(ParseError::BadNumber("x".into())));
    assert_eq!("SET 3 1".parse::<Command>(), Err(ParseError::OutOfRange("player")));
    assert_eq!("SET 1 24".parse::<Command>(), Err(ParseError::OutOfRange("point")));
    assert_eq!("MOVE 1 0 -1".parse::<Command>(), Err(ParseError::BadNumber("-1".into())));
    assert_eq!("ROLL 0 5".parse::<Command>(), Err(ParseError::OutOfRange("roll")));
    assert_eq!("ROLL 3 7".parse::<Command>(), Err(ParseError::OutOfRange("roll")));
    assert_eq!("RULES FAST".parse::<Command>(), Err(ParseError::BadKeyword("FAST".into())));
    assert_eq!("START GREEN".parse::<Command>(), Err(ParseError::BadKeyword("GREEN".into())));
    assert_eq!("set 1 4".parse::<Command>(), Err(ParseError::UnknownCommand("set".into())));
}

#[test]
fn game_commands_carry_moves() {
    let slide = Move::Slide { from: 3, to: 11 };
    let cmd = Command::from_move(Color::White, slide);
    assert_eq!(cmd, Command::Move { player: Color::White, from: 3, to: 11 });
    assert_eq!(cmd.as_move(), Some((Color::White, slide)));
    assert_eq!(Command::from_move(Color::Black, Move::Place(7)).to_string(), "SET 2 7");
    assert_eq!(Command::from_move(Color::Black, Move::Remove(7)).to_string(), "REM 2 7");
    assert_eq!(Command::Draw.as_move(), None);
    assert_eq!(Command::Start(Color::White).as_move(), None);
}
