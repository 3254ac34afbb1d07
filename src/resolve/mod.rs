//! Combat resolution for lookahead.
//!
//! Projects assumed combat outcomes onto copies of a board snapshot.

pub mod projection;

pub use projection::{apply_attack, apply_defense, InvalidMoveError};
