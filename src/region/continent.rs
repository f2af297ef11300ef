//! Continent flood fill and scans.
//!
//! A continent is a connected region of cells whose terrain is not the
//! caller's "bad" terrain. Land masses exclude sea, lakes exclude land.

use serde::Serialize;

use crate::board::{Glyph, Grid, Loc, Player, RealCell, RealMap, Terrain, ViewMap, PIECE_KIND_COUNT};
use crate::search::Perimeter;

/// Membership flags for one continent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinentMap {
    grid: Grid,
    members: Vec<bool>,
}

impl ContinentMap {
    fn empty(grid: Grid) -> Self {
        ContinentMap {
            grid,
            members: vec![false; grid.size()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn contains(&self, loc: Loc) -> bool {
        self.grid.contains(loc) && self.members[loc.index()]
    }

    /// Number of member cells.
    pub fn len(&self) -> usize {
        self.members.iter().filter(|&&m| m).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.members.contains(&true)
    }

    /// Member cells in row-major order.
    pub fn locs(&self) -> impl Iterator<Item = Loc> + '_ {
        self.grid.locs().filter(|&l| self.members[l.index()])
    }

    /// True for a member cell with at least one non-member neighbor.
    pub fn is_edge(&self, loc: Loc) -> bool {
        self.contains(loc) && self.grid.neighbors(loc).any(|n| !self.contains(n))
    }

    fn mark(&mut self, loc: Loc) {
        self.members[loc.index()] = true;
    }
}

/// Where a continent scan reads cell contents from.
#[derive(Debug, Clone, Copy)]
pub enum MapSource<'a> {
    /// A player's view, falling back to the true map under non-terrain
    /// glyphs.
    View { view: &'a ViewMap, real: &'a RealMap },
    Real(&'a RealMap),
}

/// Aggregate contents of a continent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounts {
    pub size: usize,
    pub unexplored: usize,
    pub user_cities: usize,
    pub comp_cities: usize,
    pub unowned_cities: usize,
    pub user_objects: [usize; PIECE_KIND_COUNT],
    pub comp_objects: [usize; PIECE_KIND_COUNT],
}

impl ScanCounts {
    fn add_city(&mut self, owner: Option<Player>) {
        match owner {
            Some(Player::User) => self.user_cities += 1,
            Some(Player::Comp) => self.comp_cities += 1,
            None => self.unowned_cities += 1,
        }
    }
}

/// Maps the continent containing `origin` and tallies its contents.
pub fn scan_continent(source: MapSource<'_>, origin: Loc, bad: Terrain) -> (ContinentMap, ScanCounts) {
    match source {
        MapSource::View { view, real } => {
            let cont = view_continent(view, real, origin, bad);
            let counts = scan_view(&cont, view, real);
            (cont, counts)
        }
        MapSource::Real(real) => {
            let cont = real_continent(real, origin, bad);
            let counts = scan_real(&cont, real);
            (cont, counts)
        }
    }
}

/// Flood fills from `origin` over a view. Unexplored cells next to the
/// continent are marked as members but not expanded.
pub fn view_continent(view: &ViewMap, real: &RealMap, origin: Loc, bad: Terrain) -> ContinentMap {
    let grid = view.grid();
    grid.assert_on_grid(origin);
    let mut cont = ContinentMap::empty(grid);
    let mut from = Perimeter::with_capacity(grid.size());
    let mut to = Perimeter::with_capacity(grid.size());
    from.reset_to(origin);
    cont.mark(origin);

    while !from.is_empty() {
        to.clear();
        for loc in from.iter() {
            for next in grid.neighbors(loc) {
                if cont.contains(next) {
                    continue;
                }
                let terrain = match view.get(next) {
                    Glyph::Unexplored => {
                        cont.mark(next);
                        continue;
                    }
                    Glyph::Land => Terrain::Land,
                    Glyph::Sea => Terrain::Sea,
                    _ => real.terrain(next),
                };
                if terrain != bad {
                    cont.mark(next);
                    to.push(next);
                }
            }
        }
        std::mem::swap(&mut from, &mut to);
    }
    cont
}

/// Flood fills from `origin` over the true map.
pub fn real_continent(real: &RealMap, origin: Loc, bad: Terrain) -> ContinentMap {
    let grid = real.grid();
    grid.assert_on_grid(origin);
    let mut cont = ContinentMap::empty(grid);
    let mut pending = vec![origin];
    while let Some(loc) = pending.pop() {
        if cont.contains(loc) || real.terrain(loc) == bad {
            continue;
        }
        cont.mark(loc);
        pending.extend(grid.neighbors(loc).filter(|&n| !cont.contains(n)));
    }
    cont
}

/// Tallies what a view shows on a continent. Pieces hide what they stand
/// on, except that a city under a non-terrain glyph is still counted.
pub fn scan_view(cont: &ContinentMap, view: &ViewMap, real: &RealMap) -> ScanCounts {
    let mut counts = ScanCounts::default();
    for loc in cont.locs() {
        counts.size += 1;
        match view.get(loc) {
            Glyph::Unexplored => counts.unexplored += 1,
            Glyph::City(owner) => counts.add_city(owner),
            Glyph::Piece(Player::User, kind) => counts.user_objects[kind.index()] += 1,
            Glyph::Piece(Player::Comp, kind) => counts.comp_objects[kind.index()] += 1,
            Glyph::Land | Glyph::Sea => {}
            Glyph::Destination | Glyph::Marker(_) => {
                if let Some(city) = real.city(loc) {
                    counts.add_city(city.owner);
                }
            }
        }
    }
    counts
}

/// Tallies size and cities by owner over the true map.
pub fn scan_real(cont: &ContinentMap, real: &RealMap) -> ScanCounts {
    let mut counts = ScanCounts::default();
    for loc in cont.locs() {
        counts.size += 1;
        if let RealCell::City(city) = real.cell(loc) {
            counts.add_city(city.owner);
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{City, PieceKind};

    /// Two islands separated by a sea column:
    ///
    /// ```text
    /// ++.+
    /// +*.O
    /// ```
    fn two_islands() -> (Grid, RealMap) {
        let grid = Grid::new(2, 4).unwrap();
        let mut real = RealMap::filled(grid, RealCell::Land);
        real.set(grid.loc(0, 2).unwrap(), RealCell::Sea);
        real.set(grid.loc(1, 2).unwrap(), RealCell::Sea);
        real.set(grid.loc(1, 1).unwrap(), RealCell::City(City::unowned()));
        real.set(
            grid.loc(1, 3).unwrap(),
            RealCell::City(City::owned(Player::User, PieceKind::Army, 0)),
        );
        (grid, real)
    }

    #[test]
    fn real_fill_stops_at_bad_terrain() {
        let (grid, real) = two_islands();
        let (cont, counts) = scan_continent(MapSource::Real(&real), grid.loc(0, 0).unwrap(), Terrain::Sea);
        assert_eq!(cont.len(), 4);
        assert!(!cont.contains(grid.loc(0, 3).unwrap()));
        assert_eq!(counts.size, 4);
        assert_eq!(counts.unowned_cities, 1);
        assert_eq!(counts.user_cities, 0);
    }

    #[test]
    fn real_scan_counts_owners() {
        let (grid, real) = two_islands();
        let (_, counts) = scan_continent(MapSource::Real(&real), grid.loc(0, 3).unwrap(), Terrain::Sea);
        assert_eq!(counts.size, 2);
        assert_eq!(counts.user_cities, 1);
    }

    #[test]
    fn lake_uses_land_as_bad() {
        let (grid, real) = two_islands();
        let cont = real_continent(&real, grid.loc(0, 2).unwrap(), Terrain::Land);
        let cells: Vec<_> = cont.locs().map(|l| grid.row_col(l)).collect();
        assert_eq!(cells, vec![(0, 2), (1, 1), (1, 2), (1, 3)]);
        assert!(cont.is_edge(grid.loc(0, 2).unwrap()));
    }

    #[test]
    fn bad_origin_yields_empty_continent() {
        let (grid, real) = two_islands();
        let cont = real_continent(&real, grid.loc(0, 2).unwrap(), Terrain::Sea);
        assert!(cont.is_empty());
    }

    #[test]
    fn view_fill_marks_but_stops_at_unexplored() {
        let (grid, real) = two_islands();
        let mut view = ViewMap::revealed(&real);
        view.set(grid.loc(0, 1).unwrap(), Glyph::Unexplored);
        view.set(grid.loc(1, 1).unwrap(), Glyph::Piece(Player::Comp, PieceKind::Army));

        let source = MapSource::View { view: &view, real: &real };
        let (cont, counts) = scan_continent(source, grid.loc(1, 0).unwrap(), Terrain::Sea);
        assert_eq!(cont.len(), 4);
        assert_eq!(counts.unexplored, 1);
        assert_eq!(counts.comp_objects[PieceKind::Army.index()], 1);
        assert_eq!(counts.unowned_cities, 0);
    }

    #[test]
    fn view_scan_finds_city_under_marker() {
        let (grid, real) = two_islands();
        let mut view = ViewMap::revealed(&real);
        view.set(grid.loc(1, 1).unwrap(), Glyph::Marker('$'));
        let cont = view_continent(&view, &real, grid.loc(0, 0).unwrap(), Terrain::Sea);
        let counts = scan_view(&cont, &view, &real);
        assert_eq!(counts.unowned_cities, 1);
    }

    #[test]
    fn counts_serialize_to_json() {
        let counts = ScanCounts {
            size: 2,
            ..ScanCounts::default()
        };
        let json = serde_json::to_string(&counts).unwrap();
        assert!(json.starts_with("{\"size\":2,\"unexplored\":0"));
    }
}
