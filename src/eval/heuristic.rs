//! Cheap, non-recursive move scoring.
//!
//! Used when there is not enough time left for the expectiminimax search:
//! the attack with the largest dice advantage wins, with the hold
//! probability and then enumeration order breaking ties.

use std::cmp::Ordering;

use crate::board::Move;

/// Orders two moves by heuristic preference (`Greater` = better).
fn compare(a: &Move, b: &Move) -> Ordering {
    a.dice_advantage()
        .cmp(&b.dice_advantage())
        .then_with(|| a.hold_prob.partial_cmp(&b.hold_prob).unwrap_or(Ordering::Equal))
}

/// Picks the heuristically best move. Earlier moves win ties.
pub fn heuristic_pick(moves: &[Move]) -> Option<Move> {
    let mut best: Option<&Move> = None;
    for mv in moves {
        match best {
            Some(b) if compare(mv, b) != Ordering::Greater => {}
            _ => best = Some(mv),
        }
    }
    best.copied()
}

/// Heuristic score of a move, comparable with other heuristic scores only.
pub fn heuristic_score(mv: &Move) -> f64 {
    f64::from(mv.dice_advantage()) + mv.hold_prob
}
