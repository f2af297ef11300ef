//! Query command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use tracing::warn;

use crate::board::{Player, Terrain};
use crate::search::{Mobility, TerrainMask};

/// A grid coordinate as written on the wire: `row,col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn parse(s: &str) -> Option<Coord> {
        let (row, col) = s.split_once(',')?;
        Some(Coord {
            row: row.trim().parse().ok()?,
            col: col.trim().parse().ok()?,
        })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Which map a continent scan reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSource {
    View(Player),
    Real,
}

/// A parsed query command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the true map; both views become unexplored.
    Position { notation: String },

    /// Replace one player's view.
    View { player: Player, notation: String },

    /// Copy the true map into one player's view.
    Reveal { player: Player },

    /// Search for the best objective of a stock profile.
    Objective {
        mobility: Mobility,
        origin: Coord,
        profile: String,
    },

    /// Find a route to a fixed destination.
    Route {
        player: Player,
        mask: TerrainMask,
        origin: Coord,
        dest: Coord,
    },

    /// Predict unexplored terrain in one player's view.
    Infer { player: Player },

    /// Map and scan the continent containing a cell.
    Continent {
        source: ScanSource,
        origin: Coord,
        bad: Terrain,
    },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&name, args) = tokens.split_first()?;

    match name {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),

        "setoption" => parse_setoption(args),
        "position" => parse_position(args),
        "view" => parse_view(args),
        "reveal" => parse_player_only(args, "reveal").map(|player| Command::Reveal { player }),
        "infer" => parse_player_only(args, "infer").map(|player| Command::Infer { player }),
        "objective" => parse_objective(args),
        "route" => parse_route(args),
        "continent" => parse_continent(args),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }
    let value_idx = args.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&args[1..vi], &args[vi + 1..]),
        None => (&args[1..], &[][..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `position <notation>`.
fn parse_position(args: &[&str]) -> Option<Command> {
    match args {
        [notation] => Some(Command::Position {
            notation: notation.to_string(),
        }),
        _ => {
            warn!("malformed position: expected 'position <notation>'");
            None
        }
    }
}

/// Parses `view <user|comp> <notation>`.
fn parse_view(args: &[&str]) -> Option<Command> {
    let parsed = match args {
        [player, notation] => Player::from_name(player).map(|player| Command::View {
            player,
            notation: notation.to_string(),
        }),
        _ => None,
    };
    if parsed.is_none() {
        warn!("malformed view: expected 'view <user|comp> <notation>'");
    }
    parsed
}

fn parse_player_only(args: &[&str], command: &str) -> Option<Player> {
    let player = match args {
        [player] => Player::from_name(player),
        _ => None,
    };
    if player.is_none() {
        warn!(command, "malformed command: expected '<user|comp>'");
    }
    player
}

fn parse_mobility(s: &str) -> Option<Mobility> {
    match s {
        "land" => Some(Mobility::Land),
        "water" => Some(Mobility::Water),
        "air" => Some(Mobility::Air),
        "landwater" => Some(Mobility::LandToWater {
            beat_cost: crate::search::INFINITY,
        }),
        "waterland" => Some(Mobility::WaterToLand),
        _ => None,
    }
}

fn parse_mask(s: &str) -> Option<TerrainMask> {
    match s {
        "land" => Some(TerrainMask::Land),
        "water" => Some(TerrainMask::Water),
        "air" => Some(TerrainMask::Air),
        _ => None,
    }
}

/// Parses `objective <class> <r,c> <profile> [beat <n>]`.
fn parse_objective(args: &[&str]) -> Option<Command> {
    let parsed = match args {
        [class, origin, profile, rest @ ..] => {
            let mobility = parse_mobility(class);
            let beat = match rest {
                [] => Some(None),
                ["beat", n] => n.parse::<i32>().ok().map(Some),
                _ => None,
            };
            match (mobility, Coord::parse(origin), beat) {
                (Some(Mobility::LandToWater { .. }), Some(origin), Some(Some(beat_cost))) => {
                    Some(Command::Objective {
                        mobility: Mobility::LandToWater { beat_cost },
                        origin,
                        profile: profile.to_string(),
                    })
                }
                (Some(mobility), Some(origin), Some(None)) => Some(Command::Objective {
                    mobility,
                    origin,
                    profile: profile.to_string(),
                }),
                _ => None,
            }
        }
        _ => None,
    };
    if parsed.is_none() {
        warn!("malformed objective: expected 'objective <land|water|air|landwater|waterland> <r,c> <profile> [beat <n>]'");
    }
    parsed
}

/// Parses `route <user|comp> <land|water|air> <r,c> <r,c>`.
fn parse_route(args: &[&str]) -> Option<Command> {
    let parsed = route_args(args);
    if parsed.is_none() {
        warn!("malformed route: expected 'route <user|comp> <land|water|air> <r,c> <r,c>'");
    }
    parsed
}

fn route_args(args: &[&str]) -> Option<Command> {
    let [player, mask, origin, dest] = args else {
        return None;
    };
    Some(Command::Route {
        player: Player::from_name(player)?,
        mask: parse_mask(mask)?,
        origin: Coord::parse(origin)?,
        dest: Coord::parse(dest)?,
    })
}

/// Parses `continent <user|comp|real> <r,c> <land|sea>`.
fn parse_continent(args: &[&str]) -> Option<Command> {
    let parsed = match args {
        [source, origin, bad] => {
            let source = match *source {
                "real" => Some(ScanSource::Real),
                name => Player::from_name(name).map(ScanSource::View),
            };
            let bad = match *bad {
                "land" => Some(Terrain::Land),
                "sea" => Some(Terrain::Sea),
                _ => None,
            };
            match (source, Coord::parse(origin), bad) {
                (Some(source), Some(origin), Some(bad)) => Some(Command::Continent { source, origin, bad }),
                _ => None,
            }
        }
        _ => None,
    };
    if parsed.is_none() {
        warn!("malformed continent: expected 'continent <user|comp|real> <r,c> <land|sea>'");
    }
    parsed
}
