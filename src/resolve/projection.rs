//! Combat outcome projection.
//!
//! Lookahead never rolls dice. Instead it projects the assumed outcome of a
//! combat onto a fresh copy of the board: either the attacker wins, or the
//! player's region repels an attack. The input board is never modified.

use crate::board::{Board, PlayerId, RegionId, MIN_DICE};

/// Errors raised when a projection is asked for an impossible combat.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMoveError {
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    #[error("regions {from} and {to} are not adjacent")]
    NotAdjacent { from: RegionId, to: RegionId },

    #[error("region {region} has {dice} dice, at least 2 are needed to attack")]
    InsufficientDice { region: RegionId, dice: u8 },

    #[error("region {region} already belongs to player {owner}")]
    AlreadyOwned { region: RegionId, owner: PlayerId },
}

/// Projects a won attack: the target changes hands and receives all but one
/// of the source's dice, the source keeps a single die.
pub fn apply_attack(
    board: &Board,
    source: RegionId,
    target: RegionId,
) -> Result<Board, InvalidMoveError> {
    let from = board.region(source).ok_or(InvalidMoveError::UnknownRegion(source))?;
    let to = board.region(target).ok_or(InvalidMoveError::UnknownRegion(target))?;

    if !from.is_adjacent(target) {
        return Err(InvalidMoveError::NotAdjacent {
            from: source,
            to: target,
        });
    }
    if !from.can_attack() {
        return Err(InvalidMoveError::InsufficientDice {
            region: source,
            dice: from.dice,
        });
    }
    if to.owner == from.owner {
        return Err(InvalidMoveError::AlreadyOwned {
            region: target,
            owner: from.owner,
        });
    }

    let (owner, dice) = (from.owner, from.dice);
    let mut next = board.clone();
    next.set_owner(target, owner);
    next.set_dice(target, dice - 1);
    next.set_dice(source, MIN_DICE);
    Ok(next)
}

/// Projects a repelled attack: the attacking region is left with a single
/// die and keeps its owner.
pub fn apply_defense(board: &Board, attacker: RegionId) -> Result<Board, InvalidMoveError> {
    if !board.contains(attacker) {
        return Err(InvalidMoveError::UnknownRegion(attacker));
    }
    let mut next = board.clone();
    next.set_dice(attacker, MIN_DICE);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Region;

    fn duel_board() -> Board {
        Board::new(vec![
            Region::new(1, 1, 6, &[2]),
            Region::new(2, 2, 3, &[1, 3]),
            Region::new(3, 2, 4, &[2]),
        ])
        .unwrap()
    }

    #[test]
    fn attack_moves_dice_and_ownership() {
        let board = duel_board();
        let next = apply_attack(&board, RegionId(1), RegionId(2)).unwrap();
        assert_eq!(next.owner(RegionId(2)), Some(PlayerId(1)));
        assert_eq!(next.dice(RegionId(2)), Some(5));
        assert_eq!(next.dice(RegionId(1)), Some(1));
        assert_eq!(next.owner(RegionId(1)), Some(PlayerId(1)));
    }

    #[test]
    fn attack_leaves_input_and_other_regions_untouched() {
        let board = duel_board();
        let before = board.clone();
        let next = apply_attack(&board, RegionId(1), RegionId(2)).unwrap();
        assert_eq!(board, before);
        let other = next.region(RegionId(3)).unwrap();
        assert_eq!((other.owner, other.dice), (PlayerId(2), 4));
    }

    #[test]
    fn attack_rejects_non_adjacent() {
        let board = duel_board();
        assert_eq!(
            apply_attack(&board, RegionId(1), RegionId(3)),
            Err(InvalidMoveError::NotAdjacent {
                from: RegionId(1),
                to: RegionId(3),
            })
        );
    }

    #[test]
    fn attack_rejects_single_die_source() {
        let mut board = duel_board();
        board.set_dice(RegionId(1), 1);
        assert_eq!(
            apply_attack(&board, RegionId(1), RegionId(2)),
            Err(InvalidMoveError::InsufficientDice {
                region: RegionId(1),
                dice: 1,
            })
        );
    }

    #[test]
    fn attack_rejects_own_target() {
        let board = duel_board();
        assert_eq!(
            apply_attack(&board, RegionId(2), RegionId(3)),
            Err(InvalidMoveError::AlreadyOwned {
                region: RegionId(3),
                owner: PlayerId(2),
            })
        );
    }

    #[test]
    fn attack_rejects_unknown_regions() {
        let board = duel_board();
        assert_eq!(
            apply_attack(&board, RegionId(9), RegionId(2)),
            Err(InvalidMoveError::UnknownRegion(RegionId(9)))
        );
        assert_eq!(
            apply_attack(&board, RegionId(1), RegionId(9)),
            Err(InvalidMoveError::UnknownRegion(RegionId(9)))
        );
    }

    #[test]
    fn defense_drains_attacker_only() {
        let board = duel_board();
        let next = apply_defense(&board, RegionId(3)).unwrap();
        assert_eq!(next.dice(RegionId(3)), Some(1));
        assert_eq!(next.owner(RegionId(3)), Some(PlayerId(2)));
        assert_eq!(next.dice(RegionId(2)), Some(3));
        assert_eq!(board.dice(RegionId(3)), Some(4));
    }

    #[test]
    fn defense_rejects_unknown_region() {
        let board = duel_board();
        assert_eq!(
            apply_defense(&board, RegionId(0)),
            Err(InvalidMoveError::UnknownRegion(RegionId(0)))
        );
    }

    #[test]
    fn sibling_projections_are_independent() {
        let board = duel_board();
        let a = apply_defense(&board, RegionId(2)).unwrap();
        let b = apply_attack(&board, RegionId(1), RegionId(2)).unwrap();
        assert_eq!(a.dice(RegionId(2)), Some(1));
        assert_eq!(a.owner(RegionId(2)), Some(PlayerId(2)));
        assert_eq!(b.dice(RegionId(2)), Some(5));
        assert_eq!(b.owner(RegionId(2)), Some(PlayerId(1)));
    }
}
