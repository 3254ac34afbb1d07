//! Search and planning.
//!
//! Scores candidate attacks with a single-turn expectiminimax search and
//! picks the best one, within a depth, node and time budget.

pub mod budget;
pub mod config;
pub mod expectiminimax;
pub mod select;

pub use budget::SearchBudget;
pub use config::{ConfigError, SearchConfig, DEFAULT_NODE_LIMIT};
pub use expectiminimax::{evaluate_max, evaluate_min, Evaluator};
pub use select::{search, select_best_move, Decision, ScoredMove, SearchInfo, SearchResult};
