//! Combat probability model.
//!
//! In dice wars the attacker rolls all of its dice, the defender rolls all
//! of its dice, and the attacker wins only when its sum is strictly greater.
//! The odds depend on nothing but the two die counts, so the default model
//! computes the exact number of winning outcomes for every pairing at
//! compile time and divides by the outcome count at lookup.

use crate::board::{Board, PlayerId, RegionId, MAX_DICE, MIN_DICE};

/// Source of the win and hold probabilities used by the search.
pub trait ProbabilityModel {
    /// Probability that `attacker_dice` dice beat `defender_dice` dice in a
    /// single combat.
    fn attack_success_probability(&self, attacker_dice: u8, defender_dice: u8) -> f64;

    /// Probability that `region`, held by `player` with `remaining_dice`,
    /// survives the opponents' next full turn.
    fn probability_of_holding(
        &self,
        board: &Board,
        region: RegionId,
        remaining_dice: u8,
        player: PlayerId,
    ) -> f64;
}

const DICE_SLOTS: usize = MAX_DICE as usize + 1;
const SUM_SLOTS: usize = 6 * MAX_DICE as usize + 1;

/// `SUM_WAYS[n][s]`: number of ways `n` six-sided dice sum to `s`.
const fn sum_ways() -> [[u64; SUM_SLOTS]; DICE_SLOTS] {
    let mut ways = [[0u64; SUM_SLOTS]; DICE_SLOTS];
    ways[0][0] = 1;
    let mut n = 1;
    while n < DICE_SLOTS {
        let mut s = 0;
        while s < SUM_SLOTS {
            let prev = ways[n - 1][s];
            if prev != 0 {
                let mut face = 1;
                while face <= 6 && s + face < SUM_SLOTS {
                    ways[n][s + face] += prev;
                    face += 1;
                }
            }
            s += 1;
        }
        n += 1;
    }
    ways
}

/// `WIN_WAYS[a][d]`: number of outcomes where `a` dice strictly beat `d` dice.
const fn win_ways() -> [[u64; DICE_SLOTS]; DICE_SLOTS] {
    let ways = sum_ways();
    let mut wins = [[0u64; DICE_SLOTS]; DICE_SLOTS];
    let mut a = 1;
    while a < DICE_SLOTS {
        let mut d = 1;
        while d < DICE_SLOTS {
            let mut total = 0u64;
            // Running count of defender outcomes with a sum below `s`.
            let mut below = 0u64;
            let mut s = 0;
            while s < SUM_SLOTS {
                total += ways[a][s] * below;
                below += ways[d][s];
                s += 1;
            }
            wins[a][d] = total;
            d += 1;
        }
        a += 1;
    }
    wins
}

/// `OUTCOMES[n]`: 6^n.
const fn outcomes() -> [u64; 2 * DICE_SLOTS] {
    let mut out = [1u64; 2 * DICE_SLOTS];
    let mut n = 1;
    while n < 2 * DICE_SLOTS {
        out[n] = out[n - 1] * 6;
        n += 1;
    }
    out
}

static WIN_WAYS: [[u64; DICE_SLOTS]; DICE_SLOTS] = win_ways();
static OUTCOMES: [u64; 2 * DICE_SLOTS] = outcomes();

/// The standard dice-wars probability model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiceOdds;

impl DiceOdds {
    /// Exact attack odds; die counts are clamped to the legal range.
    pub fn win_probability(attacker_dice: u8, defender_dice: u8) -> f64 {
        let a = attacker_dice.clamp(MIN_DICE, MAX_DICE) as usize;
        let d = defender_dice.clamp(MIN_DICE, MAX_DICE) as usize;
        WIN_WAYS[a][d] as f64 / OUTCOMES[a + d] as f64
    }
}

impl ProbabilityModel for DiceOdds {
    fn attack_success_probability(&self, attacker_dice: u8, defender_dice: u8) -> f64 {
        DiceOdds::win_probability(attacker_dice, defender_dice)
    }

    /// Product over every adjacent enemy region able to attack of the chance
    /// that its attack fails.
    fn probability_of_holding(
        &self,
        board: &Board,
        region: RegionId,
        remaining_dice: u8,
        player: PlayerId,
    ) -> f64 {
        board
            .neighbours(region)
            .iter()
            .filter_map(|&n| board.region(n))
            .filter(|n| n.owner != player && n.can_attack())
            .map(|n| 1.0 - DiceOdds::win_probability(n.dice, remaining_dice))
            .product()
    }
}
