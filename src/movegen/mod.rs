//! Legal attack generation.
//!
//! Generates the attacks available to a player on a board snapshot and
//! annotates each with the odds the search needs. A legal attack goes from
//! an owned region with at least two dice onto an adjacent region owned by
//! someone else.

use crate::board::{Board, Move, PlayerId, RegionId, RegionRef};
use crate::eval::ProbabilityModel;
use crate::search::config::SearchConfig;

/// Iterates over every legal `(source, target)` pair for `player`, sources
/// in board order and targets in adjacency order.
pub fn possible_attacks(
    board: &Board,
    player: PlayerId,
) -> impl Iterator<Item = (RegionRef<'_>, RegionRef<'_>)> + '_ {
    board
        .regions_of(player)
        .filter(|r| r.can_attack())
        .flat_map(move |source| attacks_from(board, source.id).map(move |target| (source, target)))
}

/// Iterates over the neighbours of `region` owned by someone other than the
/// region's owner. Yields nothing for unknown regions.
pub fn attacks_from(board: &Board, region: RegionId) -> impl Iterator<Item = RegionRef<'_>> + '_ {
    let owner = board.owner(region);
    board
        .neighbours(region)
        .iter()
        .filter_map(move |&n| board.region(n))
        .filter(move |n| Some(n.owner) != owner)
}

/// Iterates over the enemy neighbours of `region` that hold enough dice to
/// attack it.
pub fn threats_to(board: &Board, region: RegionId) -> impl Iterator<Item = RegionRef<'_>> + '_ {
    attacks_from(board, region).filter(|n| n.can_attack())
}

/// Enumerates every legal attack for `player`, annotated with its attack
/// and hold probabilities.
pub fn enumerate_moves<M: ProbabilityModel + ?Sized>(
    board: &Board,
    player: PlayerId,
    model: &M,
) -> Vec<Move> {
    possible_attacks(board, player)
        .map(|(source, target)| {
            let attack_prob = model.attack_success_probability(source.dice, target.dice);
            let hold_prob = attack_prob
                * model.probability_of_holding(board, target.id, source.dice - 1, player);
            Move {
                source: source.id,
                target: target.id,
                source_dice: source.dice,
                target_dice: target.dice,
                attack_prob,
                hold_prob,
            }
        })
        .collect()
}

/// Enumerates the attacks worth searching: those clearing the
/// qualification threshold or launched at the max-dice override.
pub fn qualifying_moves<M: ProbabilityModel + ?Sized>(
    board: &Board,
    player: PlayerId,
    model: &M,
    config: &SearchConfig,
) -> Vec<Move> {
    let mut moves = enumerate_moves(board, player, model);
    moves.retain(|m| m.qualifies(config));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Region;
    use crate::eval::DiceOdds;

    /// 1(P1,3) - 2(P2,2) - 3(P1,1) - 4(P2,5), plus 1 - 3.
    fn small_board() -> Board {
        Board::new(vec![
            Region::new(1, 1, 3, &[2, 3]),
            Region::new(2, 2, 2, &[1, 3]),
            Region::new(3, 1, 1, &[1, 2, 4]),
            Region::new(4, 2, 5, &[3]),
        ])
        .unwrap()
    }

    #[test]
    fn enumerates_only_from_attack_capable_regions() {
        let board = small_board();
        let moves = enumerate_moves(&board, PlayerId(1), &DiceOdds);
        let pairs: Vec<(u32, u32)> = moves.iter().map(|m| (m.source.0, m.target.0)).collect();
        assert_eq!(pairs, vec![(1, 2)]);
    }

    #[test]
    fn never_targets_own_regions() {
        let board = small_board();
        for player in [PlayerId(1), PlayerId(2)] {
            for m in enumerate_moves(&board, player, &DiceOdds) {
                assert_eq!(board.owner(m.source), Some(player));
                assert_ne!(board.owner(m.target), Some(player));
            }
        }
    }

    #[test]
    fn annotates_attack_and_hold_probabilities() {
        let board = small_board();
        let moves = enumerate_moves(&board, PlayerId(1), &DiceOdds);
        let m = moves[0];
        assert_eq!(m.source_dice, 3);
        assert_eq!(m.target_dice, 2);
        assert_eq!(m.attack_prob, DiceOdds::win_probability(3, 2));
        // Region 2 borders only player 1's regions, so holding is certain.
        assert_eq!(m.hold_prob, m.attack_prob);
    }

    #[test]
    fn player_two_attacks_from_both_regions() {
        let board = small_board();
        let moves = enumerate_moves(&board, PlayerId(2), &DiceOdds);
        let pairs: Vec<(u32, u32)> = moves.iter().map(|m| (m.source.0, m.target.0)).collect();
        assert_eq!(pairs, vec![(2, 1), (2, 3), (4, 3)]);
    }

    #[test]
    fn qualifying_moves_filters_weak_attacks() {
        let board = Board::new(vec![
            Region::new(1, 1, 2, &[2, 3]),
            Region::new(2, 2, 6, &[1]),
            Region::new(3, 2, 1, &[1]),
        ])
        .unwrap();
        let config = SearchConfig::default();
        let all = enumerate_moves(&board, PlayerId(1), &DiceOdds);
        let kept = qualifying_moves(&board, PlayerId(1), &DiceOdds, &config);
        assert_eq!(all.len(), 2);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].target, RegionId(3));
    }

    #[test]
    fn threats_skip_single_die_enemies() {
        let board = small_board();
        let threats: Vec<u32> = threats_to(&board, RegionId(3)).map(|r| r.id.0).collect();
        assert_eq!(threats, vec![2, 4]);
        let threats: Vec<u32> = threats_to(&board, RegionId(2)).map(|r| r.id.0).collect();
        assert_eq!(threats, vec![1]);
    }

    #[test]
    fn no_attacks_without_dice() {
        let board = Board::new(vec![
            Region::new(1, 1, 1, &[2]),
            Region::new(2, 2, 1, &[1]),
        ])
        .unwrap();
        assert!(enumerate_moves(&board, PlayerId(1), &DiceOdds).is_empty());
    }
}
