//! A player's view of the board.
//!
//! One glyph per cell. Cells the player has never seen hold
//! `Glyph::Unexplored`.

use std::ops::Deref;

use super::glyph::Glyph;
use super::grid::{Grid, Loc};
use super::terrain::RealMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMap {
    grid: Grid,
    cells: Vec<Glyph>,
}

impl ViewMap {
    /// A view in which nothing has been seen.
    pub fn unexplored(grid: Grid) -> Self {
        ViewMap {
            grid,
            cells: vec![Glyph::Unexplored; grid.size()],
        }
    }

    /// A view showing every cell of the true map.
    pub fn revealed(real: &RealMap) -> Self {
        ViewMap {
            grid: real.grid(),
            cells: real.cells().iter().map(|cell| cell.glyph()).collect(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[track_caller]
    pub fn get(&self, loc: Loc) -> Glyph {
        self.grid.assert_on_grid(loc);
        self.cells[loc.index()]
    }

    /// Writes `glyph` at `loc`, returning the glyph it replaced.
    #[track_caller]
    pub fn set(&mut self, loc: Loc, glyph: Glyph) -> Glyph {
        self.grid.assert_on_grid(loc);
        std::mem::replace(&mut self.cells[loc.index()], glyph)
    }

    pub fn cells(&self) -> &[Glyph] {
        &self.cells
    }

    pub fn count(&self, glyph: Glyph) -> usize {
        self.cells.iter().filter(|&&g| g == glyph).count()
    }

    /// Writes `glyph` at `loc` until the returned guard drops, then puts
    /// the previous glyph back.
    pub fn mark_scoped(&mut self, loc: Loc, glyph: Glyph) -> ScopedMarker<'_> {
        let saved = self.set(loc, glyph);
        ScopedMarker {
            view: self,
            loc,
            saved,
        }
    }
}

/// Guard holding a temporary glyph in a view map.
pub struct ScopedMarker<'a> {
    view: &'a mut ViewMap,
    loc: Loc,
    saved: Glyph,
}

impl Deref for ScopedMarker<'_> {
    type Target = ViewMap;

    fn deref(&self) -> &ViewMap {
        &*self.view
    }
}

impl Drop for ScopedMarker<'_> {
    fn drop(&mut self) {
        self.view.set(self.loc, self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{City, Player, RealCell};

    #[test]
    fn set_returns_previous_glyph() {
        let grid = Grid::new(2, 3).unwrap();
        let mut view = ViewMap::unexplored(grid);
        let loc = grid.loc(1, 2).unwrap();
        assert_eq!(view.set(loc, Glyph::Sea), Glyph::Unexplored);
        assert_eq!(view.get(loc), Glyph::Sea);
        assert_eq!(view.count(Glyph::Unexplored), 5);
    }

    #[test]
    fn scoped_marker_restores_on_drop() {
        let grid = Grid::new(2, 2).unwrap();
        let mut view = ViewMap::unexplored(grid);
        let loc = grid.loc(0, 1).unwrap();
        view.set(loc, Glyph::Land);
        {
            let marked = view.mark_scoped(loc, Glyph::Destination);
            assert_eq!(marked.get(loc), Glyph::Destination);
        }
        assert_eq!(view.get(loc), Glyph::Land);
    }

    #[test]
    fn revealed_view_mirrors_true_map() {
        let grid = Grid::new(1, 3).unwrap();
        let mut real = RealMap::filled(grid, RealCell::Land);
        real.set(Loc::new(2), RealCell::City(City::unowned()));
        real.set(Loc::new(0), RealCell::Sea);
        let view = ViewMap::revealed(&real);
        assert_eq!(view.cells(), &[Glyph::Sea, Glyph::Land, Glyph::City(None::<Player>)]);
    }
}
