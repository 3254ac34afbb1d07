//! Board snapshot representation.
//!
//! A `Board` is one hypothetical world state: the owner and die count of
//! every region. The topology (region ids and adjacency) never changes
//! during a game, so it is stored once behind an `Arc` and shared by every
//! snapshot derived from the same board. Owners and dice are plain vectors
//! indexed by region position, so cloning a board copies only two short
//! arrays and sibling search branches never share mutable state.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::region::{PlayerId, Region, RegionId, RegionRef, MAX_DICE, MIN_DICE};

/// Errors that can occur when building a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no regions")]
    Empty,

    #[error("duplicate region id {0}")]
    DuplicateRegion(RegionId),

    #[error("region {region} is adjacent to unknown region {neighbour}")]
    UnknownNeighbour { region: RegionId, neighbour: RegionId },

    #[error("region {0} is adjacent to itself")]
    SelfAdjacent(RegionId),

    #[error("adjacency {region} -> {neighbour} has no reverse edge")]
    AsymmetricAdjacency { region: RegionId, neighbour: RegionId },

    #[error("region {region} has {dice} dice, expected 1..=8")]
    InvalidDice { region: RegionId, dice: u8 },
}

/// Immutable region graph shared between snapshots.
#[derive(Debug, PartialEq, Eq)]
struct Topology {
    ids: Vec<RegionId>,
    index: HashMap<RegionId, usize>,
    adjacent: Vec<Vec<RegionId>>,
}

/// Complete board state at a point in (hypothetical) time.
#[derive(Debug, Clone)]
pub struct Board {
    topology: Arc<Topology>,
    owners: Vec<PlayerId>,
    dice: Vec<u8>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.topology, &other.topology) || self.topology == other.topology)
            && self.owners == other.owners
            && self.dice == other.dice
    }
}

impl Board {
    /// Builds a board from region descriptions, validating the invariants
    /// every snapshot relies on.
    pub fn new(regions: Vec<Region>) -> Result<Self, BoardError> {
        if regions.is_empty() {
            return Err(BoardError::Empty);
        }

        let mut index = HashMap::with_capacity(regions.len());
        for (i, r) in regions.iter().enumerate() {
            if index.insert(r.id, i).is_some() {
                return Err(BoardError::DuplicateRegion(r.id));
            }
            if !(MIN_DICE..=MAX_DICE).contains(&r.dice) {
                return Err(BoardError::InvalidDice {
                    region: r.id,
                    dice: r.dice,
                });
            }
        }

        for r in &regions {
            for &n in &r.adjacent {
                if n == r.id {
                    return Err(BoardError::SelfAdjacent(r.id));
                }
                let other = index
                    .get(&n)
                    .map(|&i| &regions[i])
                    .ok_or(BoardError::UnknownNeighbour {
                        region: r.id,
                        neighbour: n,
                    })?;
                if !other.adjacent.contains(&r.id) {
                    return Err(BoardError::AsymmetricAdjacency {
                        region: r.id,
                        neighbour: n,
                    });
                }
            }
        }

        let mut ids = Vec::with_capacity(regions.len());
        let mut owners = Vec::with_capacity(regions.len());
        let mut dice = Vec::with_capacity(regions.len());
        let mut adjacent = Vec::with_capacity(regions.len());
        for r in regions {
            ids.push(r.id);
            owners.push(r.owner);
            dice.push(r.dice);
            adjacent.push(r.adjacent);
        }

        Ok(Board {
            topology: Arc::new(Topology {
                ids,
                index,
                adjacent,
            }),
            owners,
            dice,
        })
    }

    /// Returns the position of a region in board order.
    #[inline]
    fn index_of(&self, id: RegionId) -> Option<usize> {
        self.topology.index.get(&id).copied()
    }

    /// Returns the number of regions on the board.
    pub fn region_count(&self) -> usize {
        self.topology.ids.len()
    }

    /// Returns true if the board has a region with this id.
    pub fn contains(&self, id: RegionId) -> bool {
        self.topology.index.contains_key(&id)
    }

    /// Looks up a region by id.
    pub fn region(&self, id: RegionId) -> Option<RegionRef<'_>> {
        self.index_of(id).map(|i| self.region_at(i))
    }

    fn region_at(&self, i: usize) -> RegionRef<'_> {
        RegionRef {
            id: self.topology.ids[i],
            owner: self.owners[i],
            dice: self.dice[i],
            adjacent: &self.topology.adjacent[i],
        }
    }

    /// Returns the owner of a region.
    pub fn owner(&self, id: RegionId) -> Option<PlayerId> {
        self.index_of(id).map(|i| self.owners[i])
    }

    /// Returns the die count of a region.
    pub fn dice(&self, id: RegionId) -> Option<u8> {
        self.index_of(id).map(|i| self.dice[i])
    }

    /// Returns the neighbours of a region (empty for unknown ids).
    pub fn neighbours(&self, id: RegionId) -> &[RegionId] {
        match self.index_of(id) {
            Some(i) => &self.topology.adjacent[i],
            None => &[],
        }
    }

    /// Returns true if both regions exist and share a border.
    pub fn is_adjacent(&self, a: RegionId, b: RegionId) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// Returns true if the region exists and holds at least two dice.
    pub fn can_attack(&self, id: RegionId) -> bool {
        self.dice(id).is_some_and(|d| d > MIN_DICE)
    }

    /// Iterates over all regions in board order.
    pub fn regions(&self) -> impl Iterator<Item = RegionRef<'_>> + '_ {
        (0..self.region_count()).map(move |i| self.region_at(i))
    }

    /// Iterates over the regions owned by `player`, in board order.
    pub fn regions_of(&self, player: PlayerId) -> impl Iterator<Item = RegionRef<'_>> + '_ {
        self.regions().filter(move |r| r.owner == player)
    }

    /// Returns the number of distinct players that still own a region.
    pub fn players_alive(&self) -> usize {
        self.owners.iter().collect::<BTreeSet<_>>().len()
    }

    /// Returns the total number of dice a player has on the board.
    pub fn total_dice(&self, player: PlayerId) -> u32 {
        self.regions_of(player).map(|r| u32::from(r.dice)).sum()
    }

    /// Changes the owner of a region. Used by the outcome projection only.
    pub(crate) fn set_owner(&mut self, id: RegionId, owner: PlayerId) {
        if let Some(i) = self.index_of(id) {
            self.owners[i] = owner;
        }
    }

    /// Changes the die count of a region, clamped to the legal range.
    /// Used by the outcome projection only.
    pub(crate) fn set_dice(&mut self, id: RegionId, dice: u8) {
        if let Some(i) = self.index_of(id) {
            self.dice[i] = dice.clamp(MIN_DICE, MAX_DICE);
        }
    }

    /// Returns the regions as owned descriptions, in board order.
    pub fn to_regions(&self) -> Vec<Region> {
        self.regions().map(|r| r.to_region()).collect()
    }
}
