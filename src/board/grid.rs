//! Grid addressing.
//!
//! Cells are addressed by a flat row-major index. Neighbor lookups are
//! bounds checked so a diagonal step from an edge cell never wraps onto the
//! opposite side of the map.

use std::fmt;

/// Largest supported row count.
pub const MAX_ROWS: usize = 60;
/// Largest supported column count.
pub const MAX_COLS: usize = 100;
/// Largest supported cell count.
pub const MAX_MAP_SIZE: usize = MAX_ROWS * MAX_COLS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    Empty { rows: usize, cols: usize },
    #[error("grid {rows}x{cols} exceeds the {rows_max}x{cols_max} bound")]
    TooLarge {
        rows: usize,
        cols: usize,
        rows_max: usize,
        cols_max: usize,
    },
}

/// A cell location: a flat index into a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc(usize);

impl Loc {
    pub const fn new(index: usize) -> Self {
        Loc(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// All directions, clockwise from north.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// Row and column delta of one step in this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dr, dc) = self.offset();
        dr != 0 && dc != 0
    }
}

/// Dimensions of a rectangular map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        if rows > MAX_ROWS || cols > MAX_COLS {
            return Err(GridError::TooLarge {
                rows,
                cols,
                rows_max: MAX_ROWS,
                cols_max: MAX_COLS,
            });
        }
        Ok(Grid { rows, cols })
    }

    pub const fn rows(self) -> usize {
        self.rows
    }

    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub const fn size(self) -> usize {
        self.rows * self.cols
    }

    pub const fn contains(self, loc: Loc) -> bool {
        loc.0 < self.size()
    }

    /// Location at (row, col), or None if off the grid.
    pub fn loc(self, row: usize, col: usize) -> Option<Loc> {
        (row < self.rows && col < self.cols).then_some(Loc(row * self.cols + col))
    }

    pub const fn row(self, loc: Loc) -> usize {
        loc.0 / self.cols
    }

    pub const fn col(self, loc: Loc) -> usize {
        loc.0 % self.cols
    }

    pub const fn row_col(self, loc: Loc) -> (usize, usize) {
        (self.row(loc), self.col(loc))
    }

    /// One step from `loc` in `dir`, or None if that leaves the grid.
    pub fn neighbor(self, loc: Loc, dir: Direction) -> Option<Loc> {
        if !self.contains(loc) {
            return None;
        }
        let (row, col) = self.row_col(loc);
        let (dr, dc) = dir.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        self.loc(row, col)
    }

    /// All on-grid neighbors of `loc`, clockwise from north.
    pub fn neighbors(self, loc: Loc) -> impl Iterator<Item = Loc> {
        let mut found = [None; 8];
        for (slot, dir) in found.iter_mut().zip(ALL_DIRECTIONS) {
            *slot = self.neighbor(loc, dir);
        }
        found.into_iter().flatten()
    }

    /// Every location in row-major order.
    pub fn locs(self) -> impl Iterator<Item = Loc> {
        (0..self.size()).map(Loc)
    }

    /// Chebyshev distance: the number of king moves between two cells.
    pub fn dist(self, a: Loc, b: Loc) -> usize {
        let (ar, ac) = self.row_col(a);
        let (br, bc) = self.row_col(b);
        ar.abs_diff(br).max(ac.abs_diff(bc))
    }

    /// True for cells on any of the four borders.
    pub fn is_edge(self, loc: Loc) -> bool {
        let (row, col) = self.row_col(loc);
        row == 0 || col == 0 || row == self.rows - 1 || col == self.cols - 1
    }

    pub fn is_corner(self, loc: Loc) -> bool {
        let (row, col) = self.row_col(loc);
        (row == 0 || row == self.rows - 1) && (col == 0 || col == self.cols - 1)
    }

    /// Panics when a caller hands in a location from some other grid.
    #[track_caller]
    pub(crate) fn assert_on_grid(self, loc: Loc) {
        assert!(
            self.contains(loc),
            "location {loc} is off the {}x{} grid",
            self.rows,
            self.cols
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_and_oversized() {
        assert_eq!(Grid::new(0, 5), Err(GridError::Empty { rows: 0, cols: 5 }));
        assert!(matches!(
            Grid::new(MAX_ROWS + 1, 10),
            Err(GridError::TooLarge { .. })
        ));
        assert!(Grid::new(MAX_ROWS, MAX_COLS).is_ok());
    }

    #[test]
    fn row_col_round_trip() {
        let grid = Grid::new(4, 7).unwrap();
        let loc = grid.loc(2, 5).unwrap();
        assert_eq!(loc.index(), 19);
        assert_eq!(grid.row_col(loc), (2, 5));
        assert_eq!(grid.loc(4, 0), None);
        assert_eq!(grid.loc(0, 7), None);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let grid = Grid::new(3, 3).unwrap();
        let center = grid.loc(1, 1).unwrap();
        assert_eq!(grid.neighbors(center).count(), 8);
    }

    #[test]
    fn corner_and_edge_neighbors_do_not_wrap() {
        let grid = Grid::new(3, 4).unwrap();
        let corner = grid.loc(0, 0).unwrap();
        let mut n: Vec<_> = grid.neighbors(corner).map(|l| grid.row_col(l)).collect();
        n.sort();
        assert_eq!(n, vec![(0, 1), (1, 0), (1, 1)]);

        let east_edge = grid.loc(1, 3).unwrap();
        assert!(grid.neighbors(east_edge).all(|l| grid.col(l) >= 2));
        assert_eq!(grid.neighbors(east_edge).count(), 5);
    }

    #[test]
    fn neighbor_follows_direction() {
        let grid = Grid::new(5, 5).unwrap();
        let here = grid.loc(2, 2).unwrap();
        assert_eq!(grid.neighbor(here, Direction::NorthWest), grid.loc(1, 1));
        assert_eq!(grid.neighbor(here, Direction::South), grid.loc(3, 2));
        let top = grid.loc(0, 2).unwrap();
        assert_eq!(grid.neighbor(top, Direction::North), None);
    }

    #[test]
    fn chebyshev_distance() {
        let grid = Grid::new(10, 10).unwrap();
        let a = grid.loc(1, 1).unwrap();
        let b = grid.loc(4, 8).unwrap();
        assert_eq!(grid.dist(a, b), 7);
        assert_eq!(grid.dist(a, a), 0);
    }

    #[test]
    fn edges_and_corners() {
        let grid = Grid::new(3, 4).unwrap();
        assert!(grid.is_corner(grid.loc(2, 3).unwrap()));
        assert!(grid.is_edge(grid.loc(1, 0).unwrap()));
        assert!(!grid.is_corner(grid.loc(1, 0).unwrap()));
        assert!(!grid.is_edge(grid.loc(1, 1).unwrap()));
    }
}
