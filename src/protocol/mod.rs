//! Query protocol handling.
//!
//! Parsing and serialization for the line protocol the engine binary
//! speaks: map notation for true and view maps, and the command parser for
//! the main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_real_map, encode_view_map, parse_real_map, parse_view_map, NotationError};
pub use parser::{parse_command, Command, Coord, ScanSource};
