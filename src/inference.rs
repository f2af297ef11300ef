//! Unexplored-terrain inference.
//!
//! Guesses land or sea for unexplored cells of a view from votes cast by
//! their explored neighbors, so the computer player does not waste moves
//! exploring cells whose terrain is obvious. Predictions are written into
//! the view only; the true map is never touched.
//!
//! Each run works through passes of falling confidence:
//!
//! 1. high: repeated while anything commits. Five votes for one terrain
//!    decide a cell, three on a border, two in a corner;
//! 2. medium: a single pass committing strict majorities;
//! 3. low: repeated while anything commits. Four votes against fewer than
//!    four decide, or a strict majority on a border.
//!
//! Committing a cell adds its vote to each unexplored neighbor. Runs repeat
//! until one commits nothing, so the result is a fixed point. Each run has
//! its own medium pass, so a call may apply that pass more than once.

use tracing::debug;

use crate::board::{Glyph, Grid, Loc, RealMap, ViewMap};
use crate::search::Perimeter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Votes {
    land: u8,
    water: u8,
}

impl Votes {
    fn any(self) -> bool {
        self.land > 0 || self.water > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prediction {
    Land,
    Water,
}

impl Prediction {
    fn glyph(self) -> Glyph {
        match self {
            Prediction::Land => Glyph::Land,
            Prediction::Water => Glyph::Sea,
        }
    }
}

/// Where a cell sits relative to the map border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Interior,
    Edge,
    Corner,
}

impl Placement {
    fn of(grid: Grid, loc: Loc) -> Self {
        if grid.is_corner(loc) {
            Placement::Corner
        } else if grid.is_edge(loc) {
            Placement::Edge
        } else {
            Placement::Interior
        }
    }

    fn on_border(self) -> bool {
        self != Placement::Interior
    }
}

fn high_confidence(v: Votes, at: Placement) -> Option<Prediction> {
    if v.land >= 5 {
        Some(Prediction::Land)
    } else if v.water >= 5 {
        Some(Prediction::Water)
    } else if at.on_border() && v.land >= 3 {
        Some(Prediction::Land)
    } else if at.on_border() && v.water >= 3 {
        Some(Prediction::Water)
    } else if at == Placement::Corner && v.land >= 2 {
        Some(Prediction::Land)
    } else if at == Placement::Corner && v.water >= 2 {
        Some(Prediction::Water)
    } else {
        None
    }
}

fn medium_confidence(v: Votes) -> Option<Prediction> {
    match v.land.cmp(&v.water) {
        std::cmp::Ordering::Greater => Some(Prediction::Land),
        std::cmp::Ordering::Less => Some(Prediction::Water),
        std::cmp::Ordering::Equal => None,
    }
}

fn low_confidence(v: Votes, at: Placement) -> Option<Prediction> {
    if v.land >= 4 && v.water < 4 {
        Some(Prediction::Land)
    } else if v.water >= 4 && v.land < 4 {
        Some(Prediction::Water)
    } else if at.on_border() {
        medium_confidence(v)
    } else {
        None
    }
}

/// Replaces unexplored cells of `view` with predicted land or sea.
/// Returns the number of cells predicted.
pub fn infer_unexplored(view: &mut ViewMap, real: &RealMap) -> usize {
    assert_eq!(view.grid(), real.grid(), "view and true map differ in size");
    let mut total = 0;
    loop {
        let committed = Inference::new(view, real).run();
        total += committed;
        if committed == 0 {
            debug!(predicted = total, "terrain inference");
            return total;
        }
    }
}

/// State for one run of passes.
struct Inference<'a> {
    view: &'a mut ViewMap,
    votes: Vec<Votes>,
    explored: usize,
    committed: usize,
    from: Perimeter,
    to: Perimeter,
}

impl<'a> Inference<'a> {
    fn new(view: &'a mut ViewMap, real: &RealMap) -> Self {
        let grid = view.grid();
        let mut votes = vec![Votes::default(); grid.size()];
        let mut from = Perimeter::with_capacity(grid.size());
        let mut explored = 0;

        for loc in grid.locs() {
            if view.get(loc) != Glyph::Unexplored {
                explored += 1;
                continue;
            }
            let v = &mut votes[loc.index()];
            for n in grid.neighbors(loc) {
                match view.get(n) {
                    Glyph::Unexplored => {}
                    Glyph::Land => v.land += 1,
                    Glyph::Sea => v.water += 1,
                    _ if real.is_sea(n) => v.water += 1,
                    _ => v.land += 1,
                }
            }
            if v.any() {
                from.push(loc);
            }
        }

        Inference {
            view,
            votes,
            explored,
            committed: 0,
            from,
            to: Perimeter::with_capacity(grid.size()),
        }
    }

    fn remaining_known(&self) -> usize {
        self.from.len() + self.explored
    }

    fn run(mut self) -> usize {
        let grid = self.view.grid();

        while !self.is_settled() {
            if !self.pass(high_confidence) {
                break;
            }
        }
        if self.is_settled() {
            return self.committed;
        }

        self.pass(|v, _| medium_confidence(v));

        while self.remaining_known() < grid.size().saturating_sub(grid.rows()) {
            if !self.pass(low_confidence) {
                break;
            }
        }
        self.committed
    }

    fn is_settled(&self) -> bool {
        self.remaining_known() == self.view.grid().size()
    }

    /// Runs `decide` over the frontier, committing each prediction.
    /// Returns whether anything was committed.
    fn pass(&mut self, decide: impl Fn(Votes, Placement) -> Option<Prediction>) -> bool {
        let grid = self.view.grid();
        let from = std::mem::take(&mut self.from);
        let mut to = std::mem::take(&mut self.to);
        to.clear();
        let mut copied = 0;

        for loc in from.iter() {
            match decide(self.votes[loc.index()], Placement::of(grid, loc)) {
                Some(prediction) => self.commit(loc, prediction, &mut to),
                None => {
                    to.push(loc);
                    copied += 1;
                }
            }
        }

        let progressed = copied != from.len();
        self.from = to;
        self.to = from;
        progressed
    }

    fn commit(&mut self, loc: Loc, prediction: Prediction, to: &mut Perimeter) {
        let grid = self.view.grid();
        self.view.set(loc, prediction.glyph());
        self.explored += 1;
        self.committed += 1;
        for n in grid.neighbors(loc) {
            if self.view.get(n) != Glyph::Unexplored {
                continue;
            }
            let v = &mut self.votes[n.index()];
            if !v.any() {
                to.push(n);
            }
            match prediction {
                Prediction::Land => v.land += 1,
                Prediction::Water => v.water += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RealCell;

    fn votes(land: u8, water: u8) -> Votes {
        Votes { land, water }
    }

    #[test]
    fn high_confidence_thresholds() {
        assert_eq!(high_confidence(votes(5, 3), Placement::Interior), Some(Prediction::Land));
        assert_eq!(high_confidence(votes(6, 2), Placement::Interior), Some(Prediction::Land));
        assert_eq!(high_confidence(votes(0, 5), Placement::Interior), Some(Prediction::Water));
        assert_eq!(high_confidence(votes(4, 0), Placement::Interior), None);
        assert_eq!(high_confidence(votes(3, 0), Placement::Edge), Some(Prediction::Land));
        assert_eq!(high_confidence(votes(2, 0), Placement::Edge), None);
        assert_eq!(high_confidence(votes(0, 2), Placement::Corner), Some(Prediction::Water));
    }

    #[test]
    fn medium_and_low_thresholds() {
        assert_eq!(medium_confidence(votes(2, 1)), Some(Prediction::Land));
        assert_eq!(medium_confidence(votes(2, 2)), None);
        assert_eq!(low_confidence(votes(4, 3), Placement::Interior), Some(Prediction::Land));
        assert_eq!(low_confidence(votes(4, 4), Placement::Interior), None);
        assert_eq!(low_confidence(votes(3, 2), Placement::Interior), None);
        assert_eq!(low_confidence(votes(1, 2), Placement::Edge), Some(Prediction::Water));
    }

    #[test]
    fn placement_of_cells() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(Placement::of(grid, grid.loc(0, 0).unwrap()), Placement::Corner);
        assert_eq!(Placement::of(grid, grid.loc(0, 1).unwrap()), Placement::Edge);
        assert_eq!(Placement::of(grid, grid.loc(1, 1).unwrap()), Placement::Interior);
    }

    #[test]
    fn fully_explored_view_is_untouched() {
        let grid = Grid::new(4, 4).unwrap();
        let real = RealMap::filled(grid, RealCell::Land);
        let mut view = ViewMap::revealed(&real);
        let before = view.clone();
        assert_eq!(infer_unexplored(&mut view, &real), 0);
        assert_eq!(view, before);
    }

    #[test]
    fn nothing_seen_means_nothing_predicted() {
        let grid = Grid::new(4, 4).unwrap();
        let real = RealMap::filled(grid, RealCell::Sea);
        let mut view = ViewMap::unexplored(grid);
        assert_eq!(infer_unexplored(&mut view, &real), 0);
        assert_eq!(view.count(Glyph::Unexplored), 16);
    }

    #[test]
    fn six_to_two_commits_in_first_high_pass() {
        let grid = Grid::new(3, 10).unwrap();
        let real = RealMap::filled(grid, RealCell::Land);
        let mut view = ViewMap::unexplored(grid);
        for r in 0..3 {
            for c in 0..3 {
                view.set(grid.loc(r, c).unwrap(), Glyph::Land);
            }
        }
        view.set(grid.loc(0, 0).unwrap(), Glyph::Sea);
        view.set(grid.loc(0, 1).unwrap(), Glyph::Sea);
        let hole = grid.loc(1, 1).unwrap();
        view.set(hole, Glyph::Unexplored);

        let mut inference = Inference::new(&mut view, &real);
        assert_eq!(inference.votes[hole.index()], votes(6, 2));
        assert!(inference.pass(high_confidence));
        assert_eq!(inference.view.get(hole), Glyph::Land);
        assert!(!inference.from.iter().any(|l| l == hole));
    }

    #[test]
    fn surrounded_hole_is_filled() {
        let grid = Grid::new(6, 12).unwrap();
        let real = RealMap::filled(grid, RealCell::Land);
        let mut view = ViewMap::unexplored(grid);
        for r in 0..3 {
            for c in 0..3 {
                view.set(grid.loc(r, c).unwrap(), Glyph::Land);
            }
        }
        let hole = grid.loc(1, 1).unwrap();
        view.set(hole, Glyph::Unexplored);

        let predicted = infer_unexplored(&mut view, &real);
        assert!(predicted >= 1);
        assert_eq!(view.get(hole), Glyph::Land);
    }
}
