//! The true terrain map.
//!
//! Holds what is actually on the board, independent of what either player
//! has seen. Cities carry their owner, current production, and accumulated
//! work toward the next piece.

use super::glyph::{Glyph, PieceKind, Player};
use super::grid::{Grid, Loc};

/// Terrain class of a true-map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Land,
    Sea,
    City,
}

impl Terrain {
    pub const fn to_char(self) -> char {
        match self {
            Terrain::Land => '+',
            Terrain::Sea => '.',
            Terrain::City => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub owner: Option<Player>,
    pub production: PieceKind,
    pub work: u32,
}

impl City {
    pub const fn unowned() -> Self {
        City {
            owner: None,
            production: PieceKind::Army,
            work: 0,
        }
    }

    pub const fn owned(owner: Player, production: PieceKind, work: u32) -> Self {
        City {
            owner: Some(owner),
            production,
            work,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealCell {
    Land,
    Sea,
    City(City),
}

impl RealCell {
    pub const fn terrain(&self) -> Terrain {
        match self {
            RealCell::Land => Terrain::Land,
            RealCell::Sea => Terrain::Sea,
            RealCell::City(_) => Terrain::City,
        }
    }

    /// The glyph a player sees when this cell comes into view.
    pub const fn glyph(&self) -> Glyph {
        match self {
            RealCell::Land => Glyph::Land,
            RealCell::Sea => Glyph::Sea,
            RealCell::City(city) => Glyph::City(city.owner),
        }
    }
}

/// The authoritative map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealMap {
    grid: Grid,
    cells: Vec<RealCell>,
}

impl RealMap {
    /// A map of one repeated cell.
    pub fn filled(grid: Grid, cell: RealCell) -> Self {
        RealMap {
            grid,
            cells: vec![cell; grid.size()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[track_caller]
    pub fn cell(&self, loc: Loc) -> &RealCell {
        self.grid.assert_on_grid(loc);
        &self.cells[loc.index()]
    }

    #[track_caller]
    pub fn set(&mut self, loc: Loc, cell: RealCell) {
        self.grid.assert_on_grid(loc);
        self.cells[loc.index()] = cell;
    }

    pub fn terrain(&self, loc: Loc) -> Terrain {
        self.cell(loc).terrain()
    }

    pub fn is_sea(&self, loc: Loc) -> bool {
        self.terrain(loc) == Terrain::Sea
    }

    pub fn city(&self, loc: Loc) -> Option<&City> {
        match self.cell(loc) {
            RealCell::City(city) => Some(city),
            _ => None,
        }
    }

    pub fn cells(&self) -> &[RealCell] {
        &self.cells
    }
}
