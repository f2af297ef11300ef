//! Objective and destination searches.
//!
//! A [`Searcher`] owns the path map and four reusable frontier buffers for
//! one grid. Each search resets the path map from a blank template, seeds
//! the origin, and runs rounds of [`expand`] until every frontier is empty
//! or the accumulated cost reaches the best objective found.

use tracing::debug;

use crate::board::{Glyph, Grid, Loc, PieceKind, Player, RealMap, ViewMap};

use super::expand::{expand, Sink, Step, Surface};
use super::objective::BestObjective;
use super::path_map::{PathMap, PathTerrain, TerrainMask};
use super::perimeter::Perimeter;
use super::profile::{MobilityProfile, Weight};
use super::trace::{trace_round, TraceSettings};

/// The movement class a search runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mobility {
    Land,
    Water,
    Air,
    /// Land that may board a ship: only objectives cheaper than
    /// `beat_cost` are accepted.
    LandToWater { beat_cost: i32 },
    /// Water that may put ashore.
    WaterToLand,
}

impl Mobility {
    /// View glyphs a piece of this class may step into.
    pub fn step_terrain(self, owner: Player) -> Vec<Glyph> {
        let own_city = Glyph::City(Some(owner));
        match self {
            Mobility::Land => vec![
                Glyph::Land,
                Glyph::Unexplored,
                Glyph::City(None),
                Glyph::City(Some(owner.opponent())),
                own_city,
            ],
            Mobility::Water | Mobility::WaterToLand => vec![Glyph::Sea, Glyph::Unexplored, own_city],
            Mobility::Air => vec![Glyph::Land, Glyph::Sea, Glyph::Unexplored, own_city],
            Mobility::LandToWater { .. } => vec![
                Glyph::Land,
                Glyph::Unexplored,
                own_city,
                Glyph::Piece(owner, PieceKind::Transport),
            ],
        }
    }
}

/// Reusable search state for one grid.
#[derive(Debug, Clone)]
pub struct Searcher {
    grid: Grid,
    blank: PathMap,
    path: PathMap,
    frontiers: [Perimeter; 4],
    trace: TraceSettings,
}

impl Searcher {
    pub fn new(grid: Grid) -> Self {
        let blank = PathMap::new(grid);
        Searcher {
            grid,
            path: blank.clone(),
            blank,
            frontiers: std::array::from_fn(|_| Perimeter::with_capacity(grid.size())),
            trace: TraceSettings::default(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn set_trace(&mut self, trace: TraceSettings) {
        self.trace = trace;
    }

    /// The path map left by the last search.
    pub fn path_map(&self) -> &PathMap {
        &self.path
    }

    pub fn path_map_mut(&mut self) -> &mut PathMap {
        &mut self.path
    }

    /// Runs the search for `mobility` and returns the best objective, or
    /// the origin at its initial bound if none was found.
    pub fn find_objective(
        &mut self,
        view: &ViewMap,
        real: &RealMap,
        origin: Loc,
        profile: &MobilityProfile,
        mobility: Mobility,
    ) -> BestObjective {
        let best = match mobility {
            Mobility::Land => self.find_land_objective(view, real, origin, profile),
            Mobility::Water => self.find_water_objective(view, real, origin, profile),
            Mobility::Air => self.find_air_objective(view, real, origin, profile),
            Mobility::LandToWater { beat_cost } => {
                self.find_land_water_objective(view, real, origin, profile, beat_cost)
            }
            Mobility::WaterToLand => self.find_water_land_objective(view, real, origin, profile),
        };
        debug!(?mobility, origin = origin.index(), loc = best.loc.index(), cost = best.cost, "objective search");
        best
    }

    pub fn find_land_objective(
        &mut self,
        view: &ViewMap,
        real: &RealMap,
        origin: Loc,
        profile: &MobilityProfile,
    ) -> BestObjective {
        let surface = Surface { view, real, profile };
        self.find_single(surface, origin, TerrainMask::Land)
    }

    pub fn find_water_objective(
        &mut self,
        view: &ViewMap,
        real: &RealMap,
        origin: Loc,
        profile: &MobilityProfile,
    ) -> BestObjective {
        let surface = Surface { view, real, profile };
        self.find_single(surface, origin, TerrainMask::Water)
    }

    /// Land and water alike, both at cost 1.
    pub fn find_air_objective(
        &mut self,
        view: &ViewMap,
        real: &RealMap,
        origin: Loc,
        profile: &MobilityProfile,
    ) -> BestObjective {
        let surface = Surface { view, real, profile };
        self.find_single(surface, origin, TerrainMask::Air)
    }

    /// Path to `dest` under `mask`, found by temporarily marking `dest` in
    /// the view. Returns the origin if `dest` cannot be reached.
    pub fn find_destination(
        &mut self,
        view: &mut ViewMap,
        real: &RealMap,
        origin: Loc,
        dest: Loc,
        owner: Player,
        mask: TerrainMask,
    ) -> BestObjective {
        self.grid.assert_on_grid(dest);
        let profile = MobilityProfile::single(owner, Glyph::Destination, Weight::Cost(1));
        let marked = view.mark_scoped(dest, Glyph::Destination);
        let surface = Surface {
            view: &marked,
            real,
            profile: &profile,
        };
        let best = self.find_single(surface, origin, mask);
        debug!(?mask, origin = origin.index(), dest = dest.index(), found = best.loc == dest, "destination search");
        best
    }

    fn start(&mut self, surface: Surface<'_>, origin: Loc, terrain: PathTerrain) {
        self.grid.assert_on_grid(origin);
        assert_eq!(surface.view.grid(), self.grid, "view map has another grid");
        assert_eq!(surface.real.grid(), self.grid, "true map has another grid");
        self.path.reset_from(&self.blank);
        self.path.start(origin, terrain);
    }

    fn find_single(&mut self, surface: Surface<'_>, origin: Loc, mask: TerrainMask) -> BestObjective {
        self.start(surface, origin, mask.start_terrain());
        let mut best = BestObjective::none(origin);
        let [a, b, _, _] = &mut self.frontiers;
        let (mut from, mut to) = (a, b);
        from.reset_to(origin);

        let mut cur_cost = 0;
        loop {
            to.clear();
            let step = Step {
                mask,
                cur_cost,
                land_inc: 1,
                water_inc: 1,
            };
            expand(&mut self.path, surface, from, step, Sink::Merged(&mut *to), &mut best);
            trace_round(&self.trace, &self.path, surface.view, "single", cur_cost);

            cur_cost += 1;
            if to.is_empty() || best.cost <= cur_cost {
                return best;
            }
            std::mem::swap(&mut from, &mut to);
        }
    }

    /// Land expands onto land or water at cost 2; water moves twice per
    /// round at cost 1.
    pub fn find_land_water_objective(
        &mut self,
        view: &ViewMap,
        real: &RealMap,
        origin: Loc,
        profile: &MobilityProfile,
        beat_cost: i32,
    ) -> BestObjective {
        let surface = Surface { view, real, profile };
        self.start(surface, origin, PathTerrain::Land);
        let mut best = BestObjective::bounded(origin, beat_cost);
        let [a, b, c, d] = &mut self.frontiers;
        let (mut cur_land, cur_water, new_water, mut new_land) = (a, b, c, d);
        cur_land.reset_to(origin);
        cur_water.clear();

        let mut cur_cost = 0;
        loop {
            new_water.clear();
            new_land.clear();

            let water = Step {
                mask: TerrainMask::Water,
                cur_cost,
                land_inc: 1,
                water_inc: 1,
            };
            let sink = Sink::Split {
                land: None,
                water: Some(&mut *new_water),
            };
            expand(&mut self.path, surface, cur_water, water, sink, &mut best);
            cur_water.clear();

            let land = Step {
                mask: TerrainMask::Air,
                cur_cost,
                land_inc: 2,
                water_inc: 2,
            };
            let sink = Sink::Split {
                land: Some(&mut *new_land),
                water: Some(&mut *cur_water),
            };
            expand(&mut self.path, surface, cur_land, land, sink, &mut best);

            let water = Step {
                cur_cost: cur_cost + 1,
                ..water
            };
            let sink = Sink::Split {
                land: None,
                water: Some(&mut *cur_water),
            };
            expand(&mut self.path, surface, new_water, water, sink, &mut best);
            trace_round(&self.trace, &self.path, view, "land-water", cur_cost);

            cur_cost += 2;
            if (cur_water.is_empty() && new_land.is_empty()) || best.cost <= cur_cost {
                return best;
            }
            std::mem::swap(&mut cur_land, &mut new_land);
        }
    }

    /// Water expands onto water at cost 1 or land at cost 2, then water
    /// moves once more at cost 1. Land keeps expanding over land.
    pub fn find_water_land_objective(
        &mut self,
        view: &ViewMap,
        real: &RealMap,
        origin: Loc,
        profile: &MobilityProfile,
    ) -> BestObjective {
        let surface = Surface { view, real, profile };
        self.start(surface, origin, PathTerrain::Water);
        let mut best = BestObjective::none(origin);
        let [a, b, c, d] = &mut self.frontiers;
        let (cur_water, mut cur_land, new_water, mut new_land) = (a, b, c, d);
        cur_water.reset_to(origin);
        cur_land.clear();

        let mut cur_cost = 0;
        loop {
            new_water.clear();
            new_land.clear();

            let sea = Step {
                mask: TerrainMask::Air,
                cur_cost,
                land_inc: 2,
                water_inc: 1,
            };
            let sink = Sink::Split {
                land: Some(&mut *new_land),
                water: Some(&mut *new_water),
            };
            expand(&mut self.path, surface, cur_water, sea, sink, &mut best);

            let shore = Step {
                mask: TerrainMask::Land,
                ..sea
            };
            let sink = Sink::Split {
                land: Some(&mut *new_land),
                water: None,
            };
            expand(&mut self.path, surface, cur_land, shore, sink, &mut best);

            cur_water.clear();
            let water = Step {
                mask: TerrainMask::Water,
                cur_cost: cur_cost + 1,
                land_inc: 1,
                water_inc: 1,
            };
            let sink = Sink::Split {
                land: None,
                water: Some(&mut *cur_water),
            };
            expand(&mut self.path, surface, new_water, water, sink, &mut best);
            trace_round(&self.trace, &self.path, view, "water-land", cur_cost);

            cur_cost += 2;
            if (cur_water.is_empty() && new_land.is_empty()) || best.cost <= cur_cost {
                return best;
            }
            std::mem::swap(&mut cur_land, &mut new_land);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{City, RealCell};
    use crate::search::path_map::INFINITY;
    use crate::search::profile::stock_profile;

    fn island(rows: usize, cols: usize, land: &[(usize, usize)]) -> (Grid, RealMap, ViewMap) {
        let grid = Grid::new(rows, cols).unwrap();
        let mut real = RealMap::filled(grid, RealCell::Sea);
        for &(r, c) in land {
            real.set(grid.loc(r, c).unwrap(), RealCell::Land);
        }
        let view = ViewMap::revealed(&real);
        (grid, real, view)
    }

    #[test]
    fn land_search_finds_nearest_weighted_objective() {
        let (grid, real, mut view) = island(1, 6, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        view.set(grid.loc(0, 3).unwrap(), Glyph::Marker('$'));
        let profile = stock_profile("tt_load").unwrap();
        let mut searcher = Searcher::new(grid);

        let best = searcher.find_land_objective(&view, &real, grid.loc(0, 0).unwrap(), &profile);
        assert_eq!(best.loc, grid.loc(0, 3).unwrap());
        assert_eq!(best.cost, 3);
        assert_eq!(searcher.path_map().cost(grid.loc(0, 3).unwrap()), 3);
    }

    #[test]
    fn no_objective_returns_origin() {
        let (grid, real, view) = island(3, 3, &[(1, 1)]);
        let profile = stock_profile("tt_load").unwrap();
        let mut searcher = Searcher::new(grid);
        let origin = grid.loc(1, 1).unwrap();

        let best = searcher.find_land_objective(&view, &real, origin, &profile);
        assert_eq!(best, BestObjective::none(origin));
        assert_eq!(best.cost, INFINITY);
    }

    #[test]
    fn water_search_stays_on_water() {
        let (grid, real, mut view) = island(1, 5, &[(0, 2)]);
        view.set(grid.loc(0, 4).unwrap(), Glyph::Marker('$'));
        let profile = stock_profile("tt_load").unwrap();
        let mut searcher = Searcher::new(grid);

        let best = searcher.find_water_objective(&view, &real, grid.loc(0, 0).unwrap(), &profile);
        assert_eq!(best.loc, grid.loc(0, 0).unwrap());
        assert!(!searcher.path_map().is_finalized(grid.loc(0, 3).unwrap()));
    }

    #[test]
    fn destination_marker_is_restored() {
        let (grid, real, mut view) = island(2, 4, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        let before = view.clone();
        let mut searcher = Searcher::new(grid);
        let dest = grid.loc(0, 3).unwrap();

        let best = searcher.find_destination(
            &mut view,
            &real,
            grid.loc(0, 0).unwrap(),
            dest,
            Player::Comp,
            TerrainMask::Land,
        );
        assert_eq!(best.loc, dest);
        assert_eq!(best.cost, 3);
        assert_eq!(view, before);
    }

    #[test]
    fn land_to_water_respects_beat_cost() {
        let (grid, real, mut view) = island(1, 4, &[(0, 0)]);
        view.set(grid.loc(0, 3).unwrap(), Glyph::Marker('$'));
        let profile = stock_profile("tt_load").unwrap();
        let mut searcher = Searcher::new(grid);
        let origin = grid.loc(0, 0).unwrap();

        let best = searcher.find_land_water_objective(&view, &real, origin, &profile, INFINITY);
        assert_eq!(best.loc, grid.loc(0, 3).unwrap());

        let best = searcher.find_land_water_objective(&view, &real, origin, &profile, 2);
        assert_eq!(best, BestObjective::bounded(origin, 2));
    }

    #[test]
    fn water_to_land_lands_at_cost_two() {
        let (grid, real, mut view) = island(1, 6, &[(0, 3), (0, 4), (0, 5)]);
        view.set(Loc::new(5), Glyph::Marker('$'));
        let profile = stock_profile("tt_load").unwrap();
        let mut searcher = Searcher::new(grid);

        let best = searcher.find_objective(&view, &real, Loc::new(0), &profile, Mobility::WaterToLand);
        assert_eq!(best, BestObjective { loc: Loc::new(5), cost: 7 });
        let costs: Vec<i32> = grid.locs().map(|l| searcher.path_map().cost(l)).collect();
        assert_eq!(costs, vec![0, 1, 2, 4, 6, 8]);
    }

    #[test]
    fn water_to_land_skips_shore_met_on_second_sub_step() {
        let (grid, real, mut view) = island(1, 5, &[(0, 2), (0, 3), (0, 4)]);
        view.set(Loc::new(4), Glyph::Marker('$'));
        let profile = stock_profile("tt_load").unwrap();
        let mut searcher = Searcher::new(grid);
        let origin = Loc::new(0);

        let best = searcher.find_water_land_objective(&view, &real, origin, &profile);
        assert_eq!(best, BestObjective::none(origin));
        assert_eq!(searcher.path_map().cost(Loc::new(1)), 1);
        assert!(!searcher.path_map().is_finalized(Loc::new(2)));
    }

    #[test]
    fn own_city_is_a_port() {
        let grid = Grid::new(1, 4).unwrap();
        let mut real = RealMap::filled(grid, RealCell::Sea);
        real.set(Loc::new(3), RealCell::City(City::owned(Player::Comp, PieceKind::Army, 0)));
        let view = ViewMap::revealed(&real);
        let profile = stock_profile("ship_repair").unwrap();
        let mut searcher = Searcher::new(grid);

        let best = searcher.find_water_objective(&view, &real, Loc::new(0), &profile);
        assert_eq!(best.loc, Loc::new(3));
        assert_eq!(best.cost, 3);
    }

    #[test]
    fn step_terrain_per_class() {
        let land = Mobility::Land.step_terrain(Player::Comp);
        assert!(land.contains(&Glyph::City(Some(Player::User))));
        assert!(!land.contains(&Glyph::Sea));
        let air = Mobility::Air.step_terrain(Player::Comp);
        assert!(air.contains(&Glyph::Sea) && air.contains(&Glyph::Land));
    }
}
