//! Objective search and path selection.
//!
//! Breadth-first wavefront searches over a player's view map, specialized
//! per mobility class, plus path marking and the direction heuristic that
//! turns a marked path into a single move.

pub mod expand;
pub mod finder;
pub mod objective;
pub mod path;
pub mod path_map;
pub mod perimeter;
pub mod profile;
pub mod trace;

pub use expand::classify;
pub use finder::{Mobility, Searcher};
pub use objective::{objective_cost, BestObjective};
pub use path::{
    choose_direction, count_adjacent, mark_adjacent, mark_near_path, mark_path,
    DIRECTION_PREFERENCE,
};
pub use path_map::{PathCell, PathMap, PathTerrain, TerrainMask, INFINITY, UNKNOWN_PENALTY};
pub use perimeter::Perimeter;
pub use profile::{stock_profile, MobilityProfile, Weight, STOCK_PROFILE_NAMES};
pub use trace::{render_path_map, TraceSettings};
