//! STE protocol handling.
//!
//! Line-oriented text protocol between a game host and the engine: the
//! command parser for the main loop and the one-line board notation.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, parse_board, BoardNotationError};
pub use parser::{parse_command, Command, TurnParams};
