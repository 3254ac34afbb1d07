//! Board representation and game-state types.
//!
//! Contains the region identifiers, the board snapshot used for lookahead,
//! candidate attacks, and random board generation for tests and benchmarks.

pub mod attack;
pub mod mapgen;
pub mod region;
pub mod state;

pub use attack::Move;
pub use mapgen::{random_board, MapGenConfig};
pub use region::{PlayerId, Region, RegionId, RegionRef, MAX_DICE, MIN_DICE};
pub use state::{Board, BoardError};
