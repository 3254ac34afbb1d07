//! Top-level move selection.
//!
//! Enumerates the qualifying attacks, projects each as a won attack, scores
//! the captured region with a MAX ply and returns the highest-scoring
//! attack. Ties go to the attack enumerated first. With no qualifying
//! attack the result is a pass.
//!
//! When the caller's time is nearly spent the recursive search is skipped
//! and the dice-advantage heuristic picks the attack instead.

use std::fmt;
use std::time::{Duration, Instant};

use crate::board::{Board, Move, PlayerId};
use crate::eval::{heuristic_pick, heuristic_score, ProbabilityModel};
use crate::movegen::enumerate_moves;
use crate::resolve::apply_attack;

use super::budget::SearchBudget;
use super::config::SearchConfig;
use super::expectiminimax::Evaluator;

/// What the player should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Attack(Move),
    Pass,
}

impl Decision {
    /// The chosen attack, if any.
    pub fn attack(&self) -> Option<&Move> {
        match self {
            Decision::Attack(mv) => Some(mv),
            Decision::Pass => None,
        }
    }
}

/// A candidate attack and the score the search gave it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// Search statistics, returned alongside the decision instead of being
/// logged from inside the search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchInfo {
    /// Legal attacks found by the enumerator.
    pub enumerated: usize,
    /// Attacks that cleared the qualification filter.
    pub qualifying: usize,
    /// Scores of the candidates the search completed, in enumeration order.
    pub candidates: Vec<ScoredMove>,
    pub nodes: u64,
    pub depth: usize,
    pub budget_exceeded: bool,
    /// True when the heuristic picked the move instead of the search.
    pub used_fallback: bool,
    pub elapsed: Duration,
}

/// Result of a search: the decision, its score and the trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub decision: Decision,
    pub score: f64,
    pub info: SearchInfo,
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes {} depth {} candidates {}/{} time {}",
            self.nodes,
            self.depth,
            self.candidates.len(),
            self.qualifying,
            self.elapsed.as_millis()
        )?;
        if self.budget_exceeded {
            write!(f, " budget_exceeded")?;
        }
        if self.used_fallback {
            write!(f, " fallback")?;
        }
        Ok(())
    }
}

/// Picks the best attack for `player`, or a pass.
pub fn select_best_move<M: ProbabilityModel + ?Sized>(
    board: &Board,
    player: PlayerId,
    model: &M,
    config: &SearchConfig,
    budget: &mut SearchBudget,
) -> SearchResult {
    let start = Instant::now();
    let enumerated = enumerate_moves(board, player, model);
    let mut info = SearchInfo {
        enumerated: enumerated.len(),
        ..SearchInfo::default()
    };
    let candidates: Vec<Move> = enumerated
        .into_iter()
        .filter(|m| m.qualifies(config))
        .collect();
    info.qualifying = candidates.len();

    if candidates.is_empty() {
        info.elapsed = start.elapsed();
        return SearchResult {
            decision: Decision::Pass,
            score: 0.0,
            info,
        };
    }

    let short_on_time = budget
        .remaining_time()
        .is_some_and(|left| left < config.fallback_time());
    if short_on_time {
        info.budget_exceeded = budget.poll();
        return fallback(&candidates, info, start);
    }

    let mut evaluator = Evaluator::new(model, config, budget);
    for mv in &candidates {
        if evaluator.budget().poll() {
            break;
        }
        let Ok(next) = apply_attack(board, mv.source, mv.target) else {
            continue;
        };
        let score = evaluator.evaluate_max(&next, mv.target);
        info.candidates.push(ScoredMove { mv: *mv, score });
    }

    info.nodes = budget.nodes();
    info.depth = budget.deepest();
    info.budget_exceeded = budget.is_exhausted();

    let mut best: Option<ScoredMove> = None;
    for scored in &info.candidates {
        if best.map_or(true, |b| scored.score > b.score) {
            best = Some(*scored);
        }
    }

    match best {
        Some(best) => {
            info.elapsed = start.elapsed();
            SearchResult {
                decision: Decision::Attack(best.mv),
                score: best.score,
                info,
            }
        }
        None => fallback(&candidates, info, start),
    }
}

/// Convenience wrapper around `select_best_move` that builds the budget
/// from the configuration and an optional time allowance.
pub fn search<M: ProbabilityModel + ?Sized>(
    board: &Board,
    player: PlayerId,
    model: &M,
    config: &SearchConfig,
    time_left: Option<Duration>,
) -> SearchResult {
    let mut budget = SearchBudget::new(config.node_limit, time_left)
        .with_depth_limit(config.depth_limit(board.region_count()));
    select_best_move(board, player, model, config, &mut budget)
}

/// Picks among `candidates` with the dice-advantage heuristic.
fn fallback(candidates: &[Move], mut info: SearchInfo, start: Instant) -> SearchResult {
    info.used_fallback = true;
    info.elapsed = start.elapsed();
    match heuristic_pick(candidates) {
        Some(mv) => SearchResult {
            decision: Decision::Attack(mv),
            score: heuristic_score(&mv),
            info,
        },
        None => SearchResult {
            decision: Decision::Pass,
            score: 0.0,
            info,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Region, RegionId};
    use crate::eval::DiceOdds;
    use crate::search::config::DEFAULT_NODE_LIMIT;

    fn run(board: &Board, player: u32) -> SearchResult {
        search(board, PlayerId(player), &DiceOdds, &SearchConfig::default(), None)
    }

    #[test]
    fn overwhelming_attack_is_chosen() {
        let board = Board::new(vec![
            Region::new(1, 1, 8, &[2]),
            Region::new(2, 2, 1, &[1]),
        ])
        .unwrap();
        let result = run(&board, 1);
        let mv = result.decision.attack().expect("expected an attack");
        assert_eq!((mv.source, mv.target), (RegionId(1), RegionId(2)));
        assert!(!result.info.used_fallback);
    }

    #[test]
    fn passes_without_attack_capable_regions() {
        let board = Board::new(vec![
            Region::new(1, 1, 1, &[2]),
            Region::new(2, 2, 6, &[1, 3]),
            Region::new(3, 1, 1, &[2]),
        ])
        .unwrap();
        let result = run(&board, 1);
        assert_eq!(result.decision, Decision::Pass);
        assert_eq!(result.info.enumerated, 0);
    }

    #[test]
    fn passes_when_nothing_qualifies() {
        let board = Board::new(vec![
            Region::new(1, 1, 2, &[2]),
            Region::new(2, 2, 7, &[1]),
        ])
        .unwrap();
        let result = run(&board, 1);
        assert_eq!(result.decision, Decision::Pass);
        assert_eq!(result.info.enumerated, 1);
        assert_eq!(result.info.qualifying, 0);
    }

    #[test]
    fn symmetric_duel_follows_threshold() {
        let board = Board::new(vec![
            Region::new(1, 1, 2, &[2]),
            Region::new(2, 2, 2, &[1]),
        ])
        .unwrap();
        let p = DiceOdds.attack_success_probability(2, 2);
        assert!((p - 0.44367284).abs() < 1e-8);

        // Region 2 has no other neighbours, so hold probability equals p.
        let result = run(&board, 1);
        assert!(matches!(result.decision, Decision::Attack(_)));

        let strict = SearchConfig {
            qualification_threshold: 0.5,
            ..SearchConfig::default()
        };
        let result = search(&board, PlayerId(1), &DiceOdds, &strict, None);
        assert_eq!(result.decision, Decision::Pass);
    }

    #[test]
    fn max_dice_bypasses_threshold() {
        // 8 dice against 8 dice holds below 0.2 once the neighbour threat is
        // counted, but the override keeps it.
        let board = Board::new(vec![
            Region::new(1, 1, 8, &[2]),
            Region::new(2, 2, 8, &[1, 3]),
            Region::new(3, 2, 8, &[2]),
        ])
        .unwrap();
        let moves = crate::movegen::enumerate_moves(&board, PlayerId(1), &DiceOdds);
        assert!(moves[0].hold_prob < 0.2);
        let result = run(&board, 1);
        assert!(matches!(result.decision, Decision::Attack(_)));
    }

    /// Real attack odds, but every captured region is assumed to fall.
    struct Pessimist;

    impl ProbabilityModel for Pessimist {
        fn attack_success_probability(&self, attacker_dice: u8, defender_dice: u8) -> f64 {
            DiceOdds::win_probability(attacker_dice, defender_dice)
        }

        fn probability_of_holding(&self, _: &Board, _: RegionId, _: u8, _: PlayerId) -> f64 {
            0.1
        }
    }

    #[test]
    fn max_dice_override_ignores_low_hold_probability() {
        let board = Board::new(vec![
            Region::new(1, 1, 8, &[2]),
            Region::new(2, 2, 1, &[1, 3]),
            Region::new(3, 1, 7, &[2, 4]),
            Region::new(4, 2, 1, &[3]),
        ])
        .unwrap();
        let config = SearchConfig::default();
        let moves = crate::movegen::enumerate_moves(&board, PlayerId(1), &Pessimist);
        assert!(moves.iter().all(|m| m.hold_prob < 0.2));

        let result = search(&board, PlayerId(1), &Pessimist, &config, None);
        assert_eq!(result.info.qualifying, 1);
        let mv = result.decision.attack().expect("the 8-dice attack should qualify");
        assert_eq!((mv.source, mv.target), (RegionId(1), RegionId(2)));
    }

    #[test]
    fn ties_go_to_first_enumerated() {
        // Both attacks end in dead ends scoring 0.0.
        let board = Board::new(vec![
            Region::new(1, 1, 8, &[2, 3]),
            Region::new(2, 2, 1, &[1]),
            Region::new(3, 3, 1, &[1]),
        ])
        .unwrap();
        let result = run(&board, 1);
        assert_eq!(result.info.candidates.len(), 2);
        assert_eq!(result.info.candidates[0].score, result.info.candidates[1].score);
        assert_eq!(result.decision.attack().map(|m| m.target), Some(RegionId(2)));
    }

    #[test]
    fn prefers_attack_with_follow_up() {
        // From region 2 the player can keep attacking region 4; from region 3
        // there is nothing left to take.
        let board = Board::new(vec![
            Region::new(1, 1, 8, &[2, 3]),
            Region::new(2, 2, 1, &[1, 4]),
            Region::new(3, 2, 1, &[1]),
            Region::new(4, 3, 1, &[2]),
        ])
        .unwrap();
        let result = run(&board, 1);
        assert_eq!(result.decision.attack().map(|m| m.target), Some(RegionId(2)));
        assert!(result.score > 0.0);
    }

    #[test]
    fn selection_is_deterministic() {
        let board = Board::new(vec![
            Region::new(1, 1, 5, &[2, 3]),
            Region::new(2, 2, 3, &[1, 3, 4]),
            Region::new(3, 3, 2, &[1, 2]),
            Region::new(4, 2, 6, &[2]),
        ])
        .unwrap();
        let a = run(&board, 1);
        let b = run(&board, 1);
        assert_eq!(a.decision, b.decision);
        assert_eq!(a.score, b.score);
        assert_eq!(a.info.candidates, b.info.candidates);
    }

    #[test]
    fn nearly_spent_time_uses_heuristic() {
        let board = Board::new(vec![
            Region::new(1, 1, 3, &[2, 3]),
            Region::new(2, 2, 2, &[1]),
            Region::new(3, 3, 1, &[1]),
        ])
        .unwrap();
        let config = SearchConfig::default();
        let result = search(&board, PlayerId(1), &DiceOdds, &config, Some(Duration::ZERO));
        assert!(result.info.used_fallback);
        assert_eq!(result.info.nodes, 0);
        assert_eq!(result.decision.attack().map(|m| m.target), Some(RegionId(3)));
    }

    #[test]
    fn exhausted_node_budget_still_answers() {
        let board = Board::new(vec![
            Region::new(1, 1, 8, &[2, 3]),
            Region::new(2, 2, 1, &[1, 4]),
            Region::new(3, 2, 1, &[1]),
            Region::new(4, 3, 2, &[2]),
        ])
        .unwrap();
        let config = SearchConfig {
            node_limit: Some(1),
            ..SearchConfig::default()
        };
        let result = search(&board, PlayerId(1), &DiceOdds, &config, None);
        assert!(result.info.budget_exceeded);
        assert!(matches!(result.decision, Decision::Attack(_)));
        assert!(result.score.is_finite());
    }

    /// Twelve mutually adjacent regions: player 1 holds one with 8 dice,
    /// player 2 holds the other eleven with 3 dice each.
    fn dense_clique() -> Board {
        let ids: Vec<u32> = (1..=12).collect();
        let regions = ids
            .iter()
            .map(|&id| {
                let adjacent: Vec<u32> = ids.iter().copied().filter(|&n| n != id).collect();
                let (owner, dice) = if id == 1 { (1, 8) } else { (2, 3) };
                Region::new(id, owner, dice, &adjacent)
            })
            .collect();
        Board::new(regions).unwrap()
    }

    #[test]
    fn default_node_limit_bounds_dense_boards() {
        // No time allowance: only the default node limit can stop this search.
        let result = run(&dense_clique(), 1);
        assert!(result.info.budget_exceeded);
        assert!(!result.info.used_fallback);
        assert!(result.info.nodes <= DEFAULT_NODE_LIMIT + 1);
        assert_eq!(result.decision.attack().map(|m| m.source), Some(RegionId(1)));
    }

    #[test]
    fn info_display_mentions_flags() {
        let info = SearchInfo {
            budget_exceeded: true,
            used_fallback: true,
            ..SearchInfo::default()
        };
        let text = info.to_string();
        assert!(text.starts_with("nodes 0 depth 0"));
        assert!(text.contains("budget_exceeded"));
        assert!(text.contains("fallback"));
    }
}
