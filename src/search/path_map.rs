//! The path map filled in by a search.
//!
//! Each cell records the cost at which the search finalized it, the cost of
//! the final hop into it, and the terrain class it was entered as. A cell
//! whose cost is still [`INFINITY`] has not been reached. Once a cell's cost
//! drops below [`INFINITY`] it is never revisited during that search.

use crate::board::{Grid, Loc};

/// Cost sentinel for unreached cells and unreachable objectives.
pub const INFINITY: i32 = 1_000_000;

/// Cost added when a search enters a cell of unknown terrain.
pub const UNKNOWN_PENALTY: i32 = INFINITY / 2;

/// Terrain class a cell was entered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathTerrain {
    Unknown,
    Land,
    Water,
    /// Set by path marking on cells of a chosen route.
    Path,
}

/// The terrain a search may expand across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainMask {
    Land,
    Water,
    /// Land and water alike.
    Air,
}

impl TerrainMask {
    pub const fn allows(self, terrain: PathTerrain) -> bool {
        match (self, terrain) {
            (TerrainMask::Air, PathTerrain::Land | PathTerrain::Water) => true,
            (TerrainMask::Land, PathTerrain::Land) => true,
            (TerrainMask::Water, PathTerrain::Water) => true,
            _ => false,
        }
    }

    /// Terrain recorded on the origin cell. Air starts as land.
    pub const fn start_terrain(self) -> PathTerrain {
        match self {
            TerrainMask::Water => PathTerrain::Water,
            TerrainMask::Land | TerrainMask::Air => PathTerrain::Land,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    pub cost: i32,
    pub inc_cost: i32,
    pub terrain: PathTerrain,
}

impl PathCell {
    pub const UNREACHED: PathCell = PathCell {
        cost: INFINITY,
        inc_cost: 0,
        terrain: PathTerrain::Unknown,
    };

    pub const fn is_finalized(&self) -> bool {
        self.cost < INFINITY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMap {
    grid: Grid,
    cells: Vec<PathCell>,
}

impl PathMap {
    /// A map with every cell unreached.
    pub fn new(grid: Grid) -> Self {
        PathMap {
            grid,
            cells: vec![PathCell::UNREACHED; grid.size()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Overwrites every cell with the cells of `template`.
    pub fn reset_from(&mut self, template: &PathMap) {
        assert_eq!(self.grid, template.grid, "path map template has another grid");
        self.cells.copy_from_slice(&template.cells);
    }

    #[track_caller]
    pub fn get(&self, loc: Loc) -> &PathCell {
        self.grid.assert_on_grid(loc);
        &self.cells[loc.index()]
    }

    #[track_caller]
    pub fn get_mut(&mut self, loc: Loc) -> &mut PathCell {
        self.grid.assert_on_grid(loc);
        &mut self.cells[loc.index()]
    }

    pub fn cost(&self, loc: Loc) -> i32 {
        self.get(loc).cost
    }

    pub fn terrain(&self, loc: Loc) -> PathTerrain {
        self.get(loc).terrain
    }

    pub fn is_finalized(&self, loc: Loc) -> bool {
        self.get(loc).is_finalized()
    }

    pub fn is_on_path(&self, loc: Loc) -> bool {
        self.terrain(loc) == PathTerrain::Path
    }

    /// Seeds the origin of a search at cost 0.
    pub fn start(&mut self, origin: Loc, terrain: PathTerrain) {
        *self.get_mut(origin) = PathCell {
            cost: 0,
            inc_cost: 0,
            terrain,
        };
    }

    /// Records that `loc` was entered as `terrain` with a final hop of
    /// `inc_cost` from a cell at `base_cost`.
    pub fn finalize(&mut self, loc: Loc, terrain: PathTerrain, base_cost: i32, inc_cost: i32) {
        *self.get_mut(loc) = PathCell {
            cost: base_cost + inc_cost,
            inc_cost,
            terrain,
        };
    }

    pub fn cells(&self) -> &[PathCell] {
        &self.cells
    }
}
