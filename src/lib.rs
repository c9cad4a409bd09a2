#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod coordinator;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
mod player_ai;
#[cfg(feature = "std")]
mod player_cli;
#[cfg(feature = "std")]
mod player_node;
pub mod prelude;
pub mod protocol;
mod rules;
pub mod topology;
#[cfg(feature = "std")]
pub mod transport;

pub use ai::*;
pub use bitboard::{BitBoard, Points};
pub use board::*;
pub use common::*;
pub use config::*;
pub use coordinator::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
pub use player_ai::*;
#[cfg(feature = "std")]
pub use player_cli::*;
#[cfg(feature = "std")]
pub use player_node::*;
pub use protocol::{Command, NetError, ParseError};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, LineBuffer, Transport};
