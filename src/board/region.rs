//! Region and player identifiers.
//!
//! A region is the atomic territory unit of the board: it has an owner, a
//! die count between `MIN_DICE` and `MAX_DICE`, and a set of neighbours.

use std::fmt;

/// The smallest die count a region may hold.
pub const MIN_DICE: u8 = 1;

/// The largest die count a region may hold.
pub const MAX_DICE: u8 = 8;

/// Stable identifier of a region, as assigned by the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a player (the owner of a region).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owned description of a single region, used to build a `Board`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub owner: PlayerId,
    pub dice: u8,
    pub adjacent: Vec<RegionId>,
}

impl Region {
    /// Creates a region description.
    pub fn new(id: u32, owner: u32, dice: u8, adjacent: &[u32]) -> Self {
        Region {
            id: RegionId(id),
            owner: PlayerId(owner),
            dice,
            adjacent: adjacent.iter().map(|&a| RegionId(a)).collect(),
        }
    }

    /// Returns true if the region holds enough dice to attack.
    pub const fn can_attack(&self) -> bool {
        self.dice > MIN_DICE
    }
}

/// Borrowed view of a region inside a `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRef<'a> {
    pub id: RegionId,
    pub owner: PlayerId,
    pub dice: u8,
    pub adjacent: &'a [RegionId],
}

impl RegionRef<'_> {
    /// Returns true if the region holds enough dice to attack.
    pub const fn can_attack(&self) -> bool {
        self.dice > MIN_DICE
    }

    /// Returns true if `other` is a neighbour of this region.
    pub fn is_adjacent(&self, other: RegionId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Converts the view into an owned `Region`.
    pub fn to_region(&self) -> Region {
        Region {
            id: self.id,
            owner: self.owner,
            dice: self.dice,
            adjacent: self.adjacent.to_vec(),
        }
    }
}
