//! Line protocol spoken between two peers. Every command is one line of
//! whitespace-separated ASCII tokens; `<player>` is 1 (White) or 2 (Black)
//! and points are `0..24`.

use alloc::string::String;
use core::fmt;
use core::str::{FromStr, SplitWhitespace};

use crate::{
    common::{Color, Point, Ruleset},
    config::{DIE_FACES, NUM_POINTS},
    game::Move,
};

/// One protocol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `SET <player> <point>`
    Set { player: Color, point: Point },
    /// `REM <player> <point>`, `player` being the side that removes.
    Rem { player: Color, point: Point },
    /// `MOVE <player> <from> <to>`
    Move { player: Color, from: Point, to: Point },
    /// `ROLL <client> <host>`: the receiver's die first.
    Roll { client: u8, host: u8 },
    /// `RULES <RELAXED|TOURNAMENT>`
    Rules(Ruleset),
    /// `START <WHITE|BLACK>`: the color the receiver plays.
    Start(Color),
    /// `WIN <player>`
    Win(Color),
    /// `DRAW`
    Draw,
}

impl Command {
    /// Wire form of a move made by `player`.
    pub fn from_move(player: Color, mv: Move) -> Self {
        match mv {
            Move::Place(point) => Command::Set { player, point },
            Move::Slide { from, to } => Command::Move { player, from, to },
            Move::Remove(point) => Command::Rem { player, point },
        }
    }

    /// The move carried by a game command, with the side that made it.
    pub fn as_move(&self) -> Option<(Color, Move)> {
        match *self {
            Command::Set { player, point } => Some((player, Move::Place(point))),
            Command::Move { player, from, to } => Some((player, Move::Slide { from, to })),
            Command::Rem { player, point } => Some((player, Move::Remove(point))),
            _ => None,
        }
    }
}

fn color_keyword(c: Color) -> &'static str {
    match c {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Set { player, point } => write!(f, "SET {} {}", player.wire_id(), point),
            Command::Rem { player, point } => write!(f, "REM {} {}", player.wire_id(), point),
            Command::Move { player, from, to } => {
                write!(f, "MOVE {} {} {}", player.wire_id(), from, to)
            }
            Command::Roll { client, host } => write!(f, "ROLL {} {}", client, host),
            Command::Rules(Ruleset::Relaxed) => write!(f, "RULES RELAXED"),
            Command::Rules(Ruleset::Tournament) => write!(f, "RULES TOURNAMENT"),
            Command::Start(c) => write!(f, "START {}", color_keyword(c)),
            Command::Win(c) => write!(f, "WIN {}", c.wire_id()),
            Command::Draw => write!(f, "DRAW"),
        }
    }
}

/// Why a received line could not be decoded. Such lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadNumber(String),
    OutOfRange(&'static str),
    BadKeyword(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty line"),
            ParseError::UnknownCommand(cmd) => write!(f, "unknown command {:?}", cmd),
            ParseError::MissingArgument(what) => write!(f, "missing {}", what),
            ParseError::BadNumber(tok) => write!(f, "not a number: {:?}", tok),
            ParseError::OutOfRange(what) => write!(f, "{} out of range", what),
            ParseError::BadKeyword(tok) => write!(f, "unexpected keyword {:?}", tok),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

struct Args<'a>(SplitWhitespace<'a>);

impl<'a> Args<'a> {
    fn token(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        self.0.next().ok_or(ParseError::MissingArgument(what))
    }

    fn number(&mut self, what: &'static str) -> Result<usize, ParseError> {
        let tok = self.token(what)?;
        tok.parse().map_err(|_| ParseError::BadNumber(tok.into()))
    }

    fn player(&mut self) -> Result<Color, ParseError> {
        let id = self.number("player")?;
        u8::try_from(id)
            .ok()
            .and_then(Color::from_wire_id)
            .ok_or(ParseError::OutOfRange("player"))
    }

    fn point(&mut self, what: &'static str) -> Result<Point, ParseError> {
        let p = self.number(what)?;
        if p < NUM_POINTS {
            Ok(p)
        } else {
            Err(ParseError::OutOfRange(what))
        }
    }

    fn die(&mut self) -> Result<u8, ParseError> {
        let v = self.number("roll")?;
        match u8::try_from(v) {
            Ok(v) if (1..=DIE_FACES).contains(&v) => Ok(v),
            _ => Err(ParseError::OutOfRange("roll")),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Trailing tokens are ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(ParseError::Empty)?;
        let mut args = Args(tokens);
        match name {
            "SET" => Ok(Command::Set {
                player: args.player()?,
                point: args.point("point")?,
            }),
            "REM" => Ok(Command::Rem {
                player: args.player()?,
                point: args.point("point")?,
            }),
            "MOVE" => Ok(Command::Move {
                player: args.player()?,
                from: args.point("from")?,
                to: args.point("to")?,
            }),
            "ROLL" => Ok(Command::Roll {
                client: args.die()?,
                host: args.die()?,
            }),
            "RULES" => {
                let kw = args.token("ruleset")?;
                if kw.eq_ignore_ascii_case("RELAXED") {
                    Ok(Command::Rules(Ruleset::Relaxed))
                } else if kw.eq_ignore_ascii_case("TOURNAMENT") {
                    Ok(Command::Rules(Ruleset::Tournament))
                } else {
                    Err(ParseError::BadKeyword(kw.into()))
                }
            }
            "START" => {
                let kw = args.token("color")?;
                if kw.eq_ignore_ascii_case("WHITE") {
                    Ok(Command::Start(Color::White))
                } else if kw.eq_ignore_ascii_case("BLACK") {
                    Ok(Command::Start(Color::Black))
                } else {
                    Err(ParseError::BadKeyword(kw.into()))
                }
            }
            "WIN" => Ok(Command::Win(args.player()?)),
            "DRAW" => Ok(Command::Draw),
            other => Err(ParseError::UnknownCommand(other.into())),
        }
    }
}

/// Failures of a network session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// The connection closed or a send failed; the current game is lost.
    PeerDisconnected,
    /// Bind, listen or connect failed.
    Resource(String),
    /// The local side cancelled.
    Aborted,
    /// A remote command was refused by the local rules under validated sync.
    Diverged(String),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::PeerDisconnected => write!(f, "peer disconnected"),
            NetError::Resource(msg) => write!(f, "connection setup failed: {}", msg),
            NetError::Aborted => write!(f, "aborted locally"),
            NetError::Diverged(msg) => write!(f, "peers diverged: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NetError {}
