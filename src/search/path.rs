//! Path marking and single-step direction choice.
//!
//! After a search, [`mark_path`] walks back from a destination and flags
//! every cell on some cheapest route. [`choose_direction`] then picks the
//! next step among flagged neighbors of the mover.

use crate::board::{Direction, Glyph, Loc, ViewMap};

use super::path_map::{PathMap, PathTerrain};

/// Direction preference when candidates tie. Diagonals first.
pub const DIRECTION_PREFERENCE: [Direction; 8] = [
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::SouthWest,
    Direction::SouthEast,
    Direction::West,
    Direction::East,
    Direction::North,
    Direction::South,
];

/// Marks every cell lying on a cheapest route from the search origin to
/// `dest`, origin included. A cell joins the path when it neighbors a
/// marked cell and its cost equals that cell's cost minus the final hop
/// into it. Does nothing if `dest` was never reached.
pub fn mark_path(path: &mut PathMap, dest: Loc) {
    if !path.is_finalized(dest) {
        return;
    }
    let grid = path.grid();
    let mut pending = vec![dest];
    while let Some(loc) = pending.pop() {
        let cell = path.get_mut(loc);
        if cell.terrain == PathTerrain::Path {
            continue;
        }
        cell.terrain = PathTerrain::Path;
        if cell.cost == 0 {
            continue;
        }
        let prev_cost = cell.cost - cell.inc_cost;
        pending.extend(grid.neighbors(loc).filter(|&n| {
            let neighbor = path.get(n);
            neighbor.cost == prev_cost && neighbor.terrain != PathTerrain::Path
        }));
    }
}

/// Marks every neighbor of `loc` as on-path.
pub fn mark_adjacent(path: &mut PathMap, loc: Loc) {
    let grid = path.grid();
    for n in grid.neighbors(loc) {
        path.get_mut(n).terrain = PathTerrain::Path;
    }
}

/// Marks each neighbor of `loc` that is itself next to an on-path cell
/// other than `loc`.
pub fn mark_near_path(path: &mut PathMap, loc: Loc) {
    let grid = path.grid();
    let near: Vec<Loc> = grid
        .neighbors(loc)
        .filter(|&n| grid.neighbors(n).any(|x| x != loc && path.is_on_path(x)))
        .collect();
    for n in near {
        path.get_mut(n).terrain = PathTerrain::Path;
    }
}

/// Picks the neighbor of `origin` to step into.
///
/// Candidates are on-path neighbors whose view glyph is in `terrain`.
/// They are ranked by [`count_adjacent`] over `interest`, then by how many
/// of their own neighbors are on-path; remaining ties go to the earlier
/// entry of [`DIRECTION_PREFERENCE`]. Returns `origin` if no candidate
/// qualifies.
pub fn choose_direction(
    path: &PathMap,
    view: &ViewMap,
    origin: Loc,
    terrain: &[Glyph],
    interest: &[Glyph],
) -> Loc {
    let grid = path.grid();
    grid.assert_on_grid(origin);
    let mut best_loc = origin;
    let mut best_count = i32::MIN;
    let mut best_path = -1;

    for dir in DIRECTION_PREFERENCE {
        let Some(next) = grid.neighbor(origin, dir) else {
            continue;
        };
        if !path.is_on_path(next) || !terrain.contains(&view.get(next)) {
            continue;
        }
        let count = count_adjacent(view, next, interest);
        if count > best_count {
            best_loc = next;
            best_count = count;
            best_path = count_path(path, next);
        } else if count == best_count {
            let path_count = count_path(path, next);
            if path_count > best_path {
                best_loc = next;
                best_path = path_count;
            }
        }
    }
    best_loc
}

/// Weighted count of the neighbors of `loc` whose glyph appears in
/// `interest`. Entry `i` of an `n`-entry list is worth `8 * (n - i)`.
pub fn count_adjacent(view: &ViewMap, loc: Loc, interest: &[Glyph]) -> i32 {
    let grid = view.grid();
    let len = interest.len() as i32;
    grid.neighbors(loc)
        .filter_map(|n| interest.iter().position(|&g| g == view.get(n)))
        .map(|pos| 8 * (len - pos as i32))
        .sum()
}

fn count_path(path: &PathMap, loc: Loc) -> i32 {
    path.grid().neighbors(loc).filter(|&n| path.is_on_path(n)).count() as i32
}
