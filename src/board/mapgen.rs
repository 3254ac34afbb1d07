//! Random board generation.
//!
//! Lays regions out on a grid, connects orthogonal neighbours and a random
//! share of diagonal ones, then deals owners and dice at random. Generation
//! is fully determined by the RNG, so seeded generators give reproducible
//! boards for property tests and benchmarks.

use rand::Rng;

use super::region::{Region, MAX_DICE, MIN_DICE};
use super::state::{Board, BoardError};

/// Shape of a generated board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapGenConfig {
    pub width: u32,
    pub height: u32,
    pub players: u32,
    /// Chance that a diagonal pair of cells also shares a border.
    pub diagonal_prob: f64,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        MapGenConfig {
            width: 6,
            height: 5,
            players: 4,
            diagonal_prob: 0.3,
        }
    }
}

/// Generates a random connected board. Region ids start at 1 and players
/// are numbered `1..=players`.
pub fn random_board(config: &MapGenConfig, rng: &mut impl Rng) -> Result<Board, BoardError> {
    let width = config.width.max(1);
    let height = config.height.max(1);
    let players = config.players.max(1);
    let id = |x: u32, y: u32| y * width + x + 1;

    let mut adjacent: Vec<Vec<u32>> = vec![Vec::new(); (width * height) as usize];
    let mut link = |a: u32, b: u32| {
        adjacent[(a - 1) as usize].push(b);
        adjacent[(b - 1) as usize].push(a);
    };

    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                link(id(x, y), id(x + 1, y));
            }
            if y + 1 < height {
                link(id(x, y), id(x, y + 1));
            }
            if x + 1 < width
                && y + 1 < height
                && rng.gen_bool(config.diagonal_prob.clamp(0.0, 1.0))
            {
                link(id(x, y), id(x + 1, y + 1));
            }
        }
    }

    let regions = adjacent
        .iter()
        .enumerate()
        .map(|(i, adj)| {
            let owner = rng.gen_range(1..=players);
            let dice = rng.gen_range(MIN_DICE..=MAX_DICE);
            Region::new(i as u32 + 1, owner, dice, adj)
        })
        .collect();

    Board::new(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn generates_requested_size() {
        let config = MapGenConfig {
            width: 4,
            height: 3,
            ..MapGenConfig::default()
        };
        let board = random_board(&config, &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(board.region_count(), 12);
        assert!(board.regions().all(|r| !r.adjacent.is_empty()));
    }

    #[test]
    fn same_seed_same_board() {
        let config = MapGenConfig::default();
        let a = random_board(&config, &mut SmallRng::seed_from_u64(99)).unwrap();
        let b = random_board(&config, &mut SmallRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn owners_within_player_range() {
        let config = MapGenConfig {
            players: 2,
            ..MapGenConfig::default()
        };
        let board = random_board(&config, &mut SmallRng::seed_from_u64(3)).unwrap();
        assert!(board.regions().all(|r| (1..=2).contains(&r.owner.0)));
    }

    #[test]
    fn single_cell_board_is_valid() {
        let config = MapGenConfig {
            width: 1,
            height: 1,
            players: 1,
            diagonal_prob: 1.0,
        };
        let board = random_board(&config, &mut SmallRng::seed_from_u64(0)).unwrap();
        assert_eq!(board.region_count(), 1);
        assert!(board.neighbours(board.regions().next().unwrap().id).is_empty());
    }
}
