//! Wavefront -- terrain-aware objective search for a strategy game AI.
//!
//! This binary reads query commands from stdin and writes replies to
//! stdout. Logs go to stderr and are filtered with `RUST_LOG`. An optional
//! JSON config file may be named as the first argument.

use std::io::{self, BufRead};

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use wavefront::config::EngineConfig;
use wavefront::engine::{Engine, EngineError};
use wavefront::protocol::parser::{parse_command, Command};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wavefront=info")))
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result: Result<(), EngineError> = match cmd {
            Command::IsReady => engine.handle_isready(&mut out).map_err(EngineError::from),
            Command::SetOption { name, value } => engine.set_option(&name, value.as_deref()),
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Position { notation } => engine.set_position(&notation),
            Command::View { player, notation } => engine.set_view(player, &notation),
            Command::Reveal { player } => engine.reveal(player),
            Command::Objective {
                mobility,
                origin,
                profile,
            } => engine.handle_objective(mobility, origin, &profile, &mut out),
            Command::Route {
                player,
                mask,
                origin,
                dest,
            } => engine.handle_route(player, mask, origin, dest, &mut out),
            Command::Infer { player } => engine.handle_infer(player, &mut out),
            Command::Continent { source, origin, bad } => engine.handle_continent(source, origin, bad, &mut out),
            Command::Quit => break,
        };

        if let Err(e) = result {
            warn!(command = %line.trim(), "{e}");
        }
    }
}
