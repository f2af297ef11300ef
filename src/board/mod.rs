//! Board representation.
//!
//! Contains grid addressing, display glyphs, the true terrain map, and the
//! per-player fogged view map.

pub mod glyph;
pub mod grid;
pub mod terrain;
pub mod view;

pub use glyph::{Glyph, PieceKind, Player, ALL_PIECE_KINDS, ALL_PLAYERS, PIECE_KIND_COUNT};
pub use grid::{Direction, Grid, GridError, Loc, ALL_DIRECTIONS, MAX_COLS, MAX_MAP_SIZE, MAX_ROWS};
pub use terrain::{City, RealCell, RealMap, Terrain};
pub use view::{ScopedMarker, ViewMap};
