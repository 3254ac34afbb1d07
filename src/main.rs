//! dicewars-ste -- a single-turn expectiminimax dice wars engine.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr; the level is taken from `STE_LOG` (default `warn`).

use std::env;
use std::io::{self, BufRead};

use dicewars_ste::engine::Engine;
use dicewars_ste::protocol::parser::{parse_command, Command};

fn init_logging() -> Result<(), log::SetLoggerError> {
    let level = env::var("STE_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.target(), record.level(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {}", e);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Ste => engine.handle_ste(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(name, value) {
                    log::warn!("setoption: {}", e);
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Board { notation } => {
                if let Err(e) = engine.set_board(&notation) {
                    log::warn!("board: {}", e);
                }
            }
            Command::Player { id } => engine.set_player(id),
            Command::Turn(params) => engine.handle_turn(&params, &mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
