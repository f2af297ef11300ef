//! One round of wavefront expansion.
//!
//! Every search variant is built from [`expand`]: walk the neighbors of each
//! frontier cell, finalize the ones not yet reached, queue those the mask
//! admits, and offer each finalized cell as an objective.

use crate::board::{Glyph, Loc, Player, RealCell, RealMap, ViewMap};

use super::objective::{objective_cost, BestObjective};
use super::path_map::{PathMap, PathTerrain, TerrainMask, UNKNOWN_PENALTY};
use super::perimeter::Perimeter;
use super::profile::MobilityProfile;

/// Cost of a best-objective cell that was entered as unknown terrain.
const UNKNOWN_OBJECTIVE_INC: i32 = 2;

/// Read-only inputs a search consults.
#[derive(Clone, Copy)]
pub(crate) struct Surface<'a> {
    pub view: &'a ViewMap,
    pub real: &'a RealMap,
    pub profile: &'a MobilityProfile,
}

/// Costs for one expansion round.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step {
    pub mask: TerrainMask,
    pub cur_cost: i32,
    pub land_inc: i32,
    pub water_inc: i32,
}

/// Where newly admitted cells are queued. A missing split target still
/// finalizes the cell but does not queue it.
pub(crate) enum Sink<'a> {
    Merged(&'a mut Perimeter),
    Split {
        land: Option<&'a mut Perimeter>,
        water: Option<&'a mut Perimeter>,
    },
}

impl Sink<'_> {
    fn push(&mut self, terrain: PathTerrain, loc: Loc) {
        let target = match self {
            Sink::Merged(all) => Some(&mut **all),
            Sink::Split { land, .. } if terrain == PathTerrain::Land => land.as_deref_mut(),
            Sink::Split { water, .. } => water.as_deref_mut(),
        };
        if let Some(perimeter) = target {
            perimeter.push(loc);
        }
    }
}

/// Classifies `to` as seen by `owner`, expanding from `from`.
///
/// Unexplored cells inherit the class of the cell being expanded from. A
/// city the owner holds counts as water, since ships may dock in it. Other
/// cities are unknown.
pub fn classify(
    path: &PathMap,
    view: &ViewMap,
    real: &RealMap,
    owner: Player,
    from: Loc,
    to: Loc,
) -> PathTerrain {
    match view.get(to) {
        Glyph::Land => PathTerrain::Land,
        Glyph::Sea => PathTerrain::Water,
        Glyph::Destination => PathTerrain::Unknown,
        Glyph::Unexplored => path.terrain(from),
        _ => match real.cell(to) {
            RealCell::Sea => PathTerrain::Water,
            RealCell::Land => PathTerrain::Land,
            RealCell::City(city) if city.owner == Some(owner) => PathTerrain::Water,
            RealCell::City(_) => PathTerrain::Unknown,
        },
    }
}

/// Expands every cell of `from` by one step.
pub(crate) fn expand(
    path: &mut PathMap,
    surface: Surface<'_>,
    from: &Perimeter,
    step: Step,
    mut sink: Sink<'_>,
    best: &mut BestObjective,
) {
    let grid = path.grid();
    let owner = surface.profile.owner();
    for origin in from.iter() {
        for next in grid.neighbors(origin) {
            if path.is_finalized(next) {
                continue;
            }
            let terrain = classify(path, surface.view, surface.real, owner, origin, next);
            match terrain {
                PathTerrain::Land if step.mask.allows(terrain) => {
                    path.finalize(next, terrain, step.cur_cost, step.land_inc);
                    sink.push(terrain, next);
                }
                PathTerrain::Water if step.mask.allows(terrain) => {
                    path.finalize(next, terrain, step.cur_cost, step.water_inc);
                    sink.push(terrain, next);
                }
                PathTerrain::Unknown => {
                    path.finalize(next, terrain, step.cur_cost, UNKNOWN_PENALTY);
                }
                _ => continue,
            }

            let cost = objective_cost(surface.view, surface.real, surface.profile, next, step.cur_cost);
            if best.offer(next, cost) && terrain == PathTerrain::Unknown {
                path.finalize(next, terrain, step.cur_cost, UNKNOWN_OBJECTIVE_INC);
            }
        }
    }
}
