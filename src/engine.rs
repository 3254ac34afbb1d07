//! Engine state management.
//!
//! Holds the current board, the player the engine acts for and the search
//! configuration, and answers `turn` with one attack or the end of the turn.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::board::{Board, PlayerId, RegionId};
use crate::eval::DiceOdds;
use crate::protocol::notation::{parse_board, BoardNotationError};
use crate::protocol::parser::TurnParams;
use crate::search::{
    search, ConfigError, Decision, SearchConfig, SearchResult, DEFAULT_NODE_LIMIT,
};

/// What the engine tells the game host to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCommand {
    Battle { source: RegionId, target: RegionId },
    EndTurn,
}

impl fmt::Display for TurnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnCommand::Battle { source, target } => write!(f, "attack {} {}", source, target),
            TurnCommand::EndTurn => write!(f, "endturn"),
        }
    }
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub board: Option<Board>,
    pub player: Option<PlayerId>,
    pub config: SearchConfig,
    model: DiceOdds,
}

impl Engine {
    /// Creates a new engine with no board or player and the default
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Engine {
            board: None,
            player: None,
            config,
            model: DiceOdds,
        }
    }

    /// Resets the board and player for a new game. The configuration
    /// persists.
    pub fn new_game(&mut self) {
        self.board = None;
        self.player = None;
    }

    /// Sets the current board from notation. The previous board is kept on
    /// failure.
    pub fn set_board(&mut self, notation: &str) -> Result<(), BoardNotationError> {
        self.board = Some(parse_board(notation)?);
        Ok(())
    }

    pub fn set_player(&mut self, player: PlayerId) {
        self.player = Some(player);
    }

    /// Applies an engine option. `Config` replaces the whole configuration
    /// with the JSON file at the given path.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), ConfigError> {
        let value = value.unwrap_or_default();
        if name == "Config" {
            self.config = SearchConfig::from_file(Path::new(&value))?;
        } else {
            self.config.apply_option(&name, &value)?;
        }
        log::info!("option {} set to '{}'", name, value);
        Ok(())
    }

    /// Handles the handshake: writes id, options and `steok`.
    pub fn handle_ste<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let defaults = SearchConfig::default();
        writeln!(out, "id name dicewars-ste")?;
        writeln!(out, "id author dicewars-ste")?;
        writeln!(
            out,
            "option name QualificationThreshold type string default {}",
            defaults.qualification_threshold
        )?;
        writeln!(
            out,
            "option name SurvivalThreshold type string default {}",
            defaults.survival_threshold
        )?;
        writeln!(
            out,
            "option name MaxDiceOverride type spin default {} min 1 max 8",
            defaults.max_dice_override
        )?;
        writeln!(out, "option name MaxDepth type spin default 0 min 0 max 1000")?;
        writeln!(
            out,
            "option name NodeLimit type spin default {} min 0 max 100000000",
            DEFAULT_NODE_LIMIT
        )?;
        writeln!(
            out,
            "option name FallbackTime type spin default {} min 0 max 60000",
            defaults.fallback_time_ms
        )?;
        writeln!(out, "option name Config type string default <empty>")?;
        writeln!(out, "steok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Runs the search for `player` on `board`.
    pub fn think(
        &self,
        board: &Board,
        player: PlayerId,
        time_left: Option<Duration>,
    ) -> SearchResult {
        search(board, player, &self.model, &self.config, time_left)
    }

    /// Decides one step of the engine's turn on `board`.
    pub fn ai_turn(
        &self,
        board: &Board,
        moves_this_turn: u32,
        turns_this_game: u32,
        time_left: Option<Duration>,
    ) -> TurnCommand {
        self.decide(board, moves_this_turn, turns_this_game, time_left).0
    }

    fn decide(
        &self,
        board: &Board,
        moves_this_turn: u32,
        turns_this_game: u32,
        time_left: Option<Duration>,
    ) -> (TurnCommand, Option<SearchResult>) {
        let Some(player) = self.player else {
            log::warn!("turn: no player set");
            return (TurnCommand::EndTurn, None);
        };
        if board.players_alive() <= 1 {
            log::debug!("turn {}: game is over, ending turn", turns_this_game);
            return (TurnCommand::EndTurn, None);
        }

        let result = self.think(board, player, time_left);
        let command = match result.decision {
            Decision::Attack(mv) => TurnCommand::Battle {
                source: mv.source,
                target: mv.target,
            },
            Decision::Pass => TurnCommand::EndTurn,
        };
        log::debug!(
            "turn {} move {}: player {} -> {} (score {:.4}, {})",
            turns_this_game,
            moves_this_turn,
            player,
            command,
            result.score,
            result.info
        );
        (command, Some(result))
    }

    /// Handles the `turn` command: writes an `info` line when a search ran,
    /// then the command.
    pub fn handle_turn<W: Write>(&self, params: &TurnParams, out: &mut W) -> io::Result<()> {
        let command = match &self.board {
            Some(board) => {
                let time_left = params.time_ms.map(Duration::from_millis);
                let (command, result) = self.decide(board, params.moves, params.turns, time_left);
                if let Some(result) = result {
                    writeln!(out, "info score {:.4} {}", result.score, result.info)?;
                }
                command
            }
            None => {
                log::warn!("turn: no board set");
                TurnCommand::EndTurn
            }
        };
        writeln!(out, "{}", command)?;
        out.flush()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
