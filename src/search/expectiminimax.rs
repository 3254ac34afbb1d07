//! Single-turn expectiminimax evaluator.
//!
//! Two mutually recursive plies score a hypothetical board:
//!
//! - MAX: the acting player, sitting on freshly captured ground, picks the
//!   best further attack from that region. Each branch is weighted by its
//!   attack odds and by the dice that end up on the captured region.
//! - MIN: a greedy one-ply threat model of the opponents. Every adjacent
//!   enemy region able to attack is a potential counter-attacker; the branch
//!   assumes the player's region holds, and the ply keeps the most damaging
//!   branch. This is a heuristic stand-in for "the likely counter-attack",
//!   not an adversarial search over every opponent.
//!
//! Scores are unnormalized expected utilities (probabilities multiplied by
//! die counts), so they are not bounded by 1.
//!
//! The evaluator performs no I/O. Statistics are collected in the
//! `SearchBudget` it runs against.

use crate::board::{Board, RegionId};
use crate::eval::ProbabilityModel;
use crate::movegen::{attacks_from, threats_to};
use crate::resolve::{apply_attack, apply_defense};

use super::budget::SearchBudget;
use super::config::SearchConfig;

/// Value of a MAX ply with no qualifying continuation.
pub const MAX_LEAF: f64 = 0.0;

/// Value of a MIN ply with no credible threat.
pub const MIN_LEAF: f64 = 1.0;

/// Recursive evaluator bound to a probability model, a configuration and a
/// budget.
pub struct Evaluator<'a, M: ProbabilityModel + ?Sized> {
    model: &'a M,
    config: &'a SearchConfig,
    budget: &'a mut SearchBudget,
}

impl<'a, M: ProbabilityModel + ?Sized> Evaluator<'a, M> {
    pub fn new(model: &'a M, config: &'a SearchConfig, budget: &'a mut SearchBudget) -> Self {
        Evaluator {
            model,
            config,
            budget,
        }
    }

    /// The budget this evaluator runs against.
    pub fn budget(&mut self) -> &mut SearchBudget {
        self.budget
    }

    /// Scores `region` as ground just captured by its owner.
    pub fn evaluate_max(&mut self, board: &Board, region: RegionId) -> f64 {
        self.max_ply(board, region, 0)
    }

    /// Scores `region` as ground its owner must now defend.
    pub fn evaluate_min(&mut self, board: &Board, region: RegionId) -> f64 {
        self.min_ply(board, region, 0)
    }

    fn max_ply(&mut self, board: &Board, region: RegionId, depth: usize) -> f64 {
        let Some(dice) = board.dice(region) else {
            return MAX_LEAF;
        };
        if dice < 2 || !self.budget.enter(depth) {
            return MAX_LEAF;
        }

        let mut best: Option<f64> = None;
        for target in attacks_from(board, region) {
            let attack_prob = self.model.attack_success_probability(dice, target.dice);
            if !self.config.qualifies(attack_prob, dice) {
                continue;
            }
            let Ok(next) = apply_attack(board, region, target.id) else {
                continue;
            };
            let captured_dice = next.dice(target.id).unwrap_or(dice - 1);
            let score =
                attack_prob * self.min_ply(&next, target.id, depth + 1) * f64::from(captured_dice);
            if best.map_or(true, |b| score > b) {
                best = Some(score);
            }
            if self.budget.is_exhausted() {
                break;
            }
        }
        best.unwrap_or(MAX_LEAF)
    }

    fn min_ply(&mut self, board: &Board, region: RegionId, depth: usize) -> f64 {
        let Some(held) = board.region(region) else {
            return MIN_LEAF;
        };
        let (owner, held_dice) = (held.owner, held.dice);
        if !self.budget.enter(depth) {
            // Static estimate: the chance the region survives every threat.
            return self.model.probability_of_holding(board, region, held_dice, owner);
        }

        let mut worst: Option<f64> = None;
        for attacker in threats_to(board, region) {
            let survival = 1.0 - self.model.attack_success_probability(attacker.dice, held_dice);
            if !self.config.survives(survival, held_dice) {
                continue;
            }
            let Ok(next) = apply_defense(board, attacker.id) else {
                continue;
            };
            let score = survival * self.max_ply(&next, region, depth + 1) * f64::from(held_dice);
            if worst.map_or(true, |w| score < w) {
                worst = Some(score);
            }
            if self.budget.is_exhausted() {
                break;
            }
        }
        worst.unwrap_or(MIN_LEAF)
    }
}

/// Scores `region` as a MAX ply with a fresh budget built from the
/// configured node limit and depth ceiling.
pub fn evaluate_max<M: ProbabilityModel + ?Sized>(
    board: &Board,
    region: RegionId,
    model: &M,
    config: &SearchConfig,
) -> f64 {
    let mut budget = SearchBudget::new(config.node_limit, None)
        .with_depth_limit(config.depth_limit(board.region_count()));
    Evaluator::new(model, config, &mut budget).evaluate_max(board, region)
}

/// Scores `region` as a MIN ply with a fresh budget built from the
/// configured node limit and depth ceiling.
pub fn evaluate_min<M: ProbabilityModel + ?Sized>(
    board: &Board,
    region: RegionId,
    model: &M,
    config: &SearchConfig,
) -> f64 {
    let mut budget = SearchBudget::new(config.node_limit, None)
        .with_depth_limit(config.depth_limit(board.region_count()));
    Evaluator::new(model, config, &mut budget).evaluate_min(board, region)
}
