//! STE command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use crate::board::PlayerId;

/// Turn context passed with the `turn` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnParams {
    /// Attacks already made this turn.
    pub moves: u32,
    /// Turns played so far this game.
    pub turns: u32,
    /// Remaining time for this turn in milliseconds.
    pub time_ms: Option<u64>,
}

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; engine replies with id, options and `steok`.
    Ste,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the board from a notation string.
    Board { notation: String },

    /// Set the player the engine acts for.
    Player { id: PlayerId },

    /// Ask for one attack (or the end of the turn).
    Turn(TurnParams),

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "ste" => Some(Command::Ste),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),

        "setoption" => parse_setoption(&tokens),
        "board" => parse_board_command(&tokens),
        "player" => parse_player(&tokens),
        "turn" => Some(parse_turn(&tokens)),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        log::warn!("malformed setoption: empty name");
        return None;
    }

    let name = name_parts.join(" ");
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Command::SetOption { name, value })
}

/// Parses `board <notation>`.
fn parse_board_command(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        log::warn!("malformed board: expected 'board <notation>'");
        return None;
    }
    Some(Command::Board {
        notation: tokens[1].to_string(),
    })
}

/// Parses `player <id>`.
fn parse_player(tokens: &[&str]) -> Option<Command> {
    let Some(raw) = tokens.get(1) else {
        log::warn!("malformed player: expected 'player <id>'");
        return None;
    };
    match raw.parse::<u32>() {
        Ok(id) => Some(Command::Player { id: PlayerId(id) }),
        Err(_) => {
            log::warn!("invalid player id: '{}'", raw);
            None
        }
    }
}

/// Parses `turn [moves <n>] [turns <n>] [time <ms>]`. Bad values are
/// skipped with a warning.
fn parse_turn(tokens: &[&str]) -> Command {
    let mut params = TurnParams::default();
    let mut i = 1;

    while i < tokens.len() {
        let key = tokens[i];
        let value = tokens.get(i + 1).copied();
        match key {
            "moves" | "turns" | "time" => {
                i += 1;
                match value.map(str::parse::<u64>) {
                    Some(Ok(v)) => match key {
                        "moves" => params.moves = u32::try_from(v).unwrap_or(u32::MAX),
                        "turns" => params.turns = u32::try_from(v).unwrap_or(u32::MAX),
                        _ => params.time_ms = Some(v),
                    },
                    Some(Err(_)) => log::warn!("invalid {} value: '{}'", key, value.unwrap_or("")),
                    None => log::warn!("missing {} value", key),
                }
            }
            other => log::warn!("unknown turn parameter: '{}'", other),
        }
        i += 1;
    }

    Command::Turn(params)
}
