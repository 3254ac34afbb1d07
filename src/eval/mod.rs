//! Position evaluation.
//!
//! The combat probability model the search is built on, and the cheap
//! heuristic used when the search has no time to run.

pub mod heuristic;
pub mod probability;

pub use heuristic::{heuristic_pick, heuristic_score};
pub use probability::{DiceOdds, ProbabilityModel};
