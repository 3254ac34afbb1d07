//! Candidate attacks.
//!
//! A `Move` is an attack from an owned region onto an adjacent enemy region,
//! annotated with the odds the move generator computed for it. Moves are
//! ephemeral: built during enumeration, consumed during scoring.

use std::fmt;

use super::region::RegionId;
use crate::search::config::SearchConfig;

/// An attack from `source` onto `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub source: RegionId,
    pub target: RegionId,
    /// Dice on the source region before the attack.
    pub source_dice: u8,
    /// Dice on the target region before the attack.
    pub target_dice: u8,
    /// Probability the attacker wins the combat.
    pub attack_prob: f64,
    /// Probability of winning and then holding the captured region through
    /// the opponents' next turn.
    pub hold_prob: f64,
}

impl Move {
    /// Returns true if the move clears the qualification threshold, or is
    /// launched from a region at the max-dice override.
    pub fn qualifies(&self, config: &SearchConfig) -> bool {
        config.qualifies(self.hold_prob, self.source_dice)
    }

    /// Dice the attacker has over the defender (negative when outnumbered).
    pub fn dice_advantage(&self) -> i16 {
        i16::from(self.source_dice) - i16::from(self.target_dice)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})->{}({}) attack {:.3} hold {:.3}",
            self.source,
            self.source_dice,
            self.target,
            self.target_dice,
            self.attack_prob,
            self.hold_prob
        )
    }
}
