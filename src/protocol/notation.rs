//! Board notation encoding and decoding.
//!
//! A board is written on one line as `/`-separated region entries:
//!
//! ```text
//! <id>:<owner>:<dice>:<adj>,<adj>,...
//! ```
//!
//! A region without neighbours leaves the last field empty, or writes `-`.
//! Example: `1:1:8:2/2:2:1:1` is a two-region board where player 1 holds
//! region 1 with eight dice next to player 2's single die on region 2.

use crate::board::{Board, BoardError, Region};

/// Errors that can occur during board notation parsing.
#[derive(Debug, thiserror::Error)]
pub enum BoardNotationError {
    #[error("empty board notation")]
    Empty,

    #[error("expected 4 ':'-separated fields in region entry '{0}'")]
    WrongFieldCount(String),

    #[error("invalid {field} '{value}' in region entry '{entry}'")]
    InvalidNumber {
        field: &'static str,
        value: String,
        entry: String,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a board notation string into a validated `Board`.
pub fn parse_board(s: &str) -> Result<Board, BoardNotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(BoardNotationError::Empty);
    }

    let regions = s
        .split('/')
        .map(parse_region)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Board::new(regions)?)
}

/// Parses one `<id>:<owner>:<dice>:<adjacency>` entry.
fn parse_region(entry: &str) -> Result<Region, BoardNotationError> {
    let fields: Vec<&str> = entry.split(':').collect();
    if fields.len() != 4 {
        return Err(BoardNotationError::WrongFieldCount(entry.to_string()));
    }

    let number = |field: &'static str, value: &str| {
        value.trim().parse::<u32>().map_err(|_| BoardNotationError::InvalidNumber {
            field,
            value: value.to_string(),
            entry: entry.to_string(),
        })
    };

    let id = number("region id", fields[0])?;
    let owner = number("owner", fields[1])?;
    let dice = number("dice", fields[2])?;
    let dice = u8::try_from(dice).map_err(|_| BoardNotationError::InvalidNumber {
        field: "dice",
        value: fields[2].to_string(),
        entry: entry.to_string(),
    })?;

    let adjacency = fields[3].trim();
    let adjacent = if adjacency.is_empty() || adjacency == "-" {
        Vec::new()
    } else {
        adjacency
            .split(',')
            .map(|n| number("neighbour", n))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Region::new(id, owner, dice, &adjacent))
}

/// Encodes a board in notation form, regions in board order.
pub fn encode_board(board: &Board) -> String {
    let mut entries = Vec::with_capacity(board.region_count());
    for region in board.regions() {
        let adjacency = if region.adjacent.is_empty() {
            "-".to_string()
        } else {
            region
                .adjacent
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        entries.push(format!("{}:{}:{}:{}", region.id, region.owner, region.dice, adjacency));
    }
    entries.join("/")
}
