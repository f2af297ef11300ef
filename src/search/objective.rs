//! Objective costing and the running best objective.

use crate::board::{Loc, PieceKind, RealMap, ViewMap};

use super::path_map::INFINITY;
use super::profile::{MobilityProfile, Weight};

/// The cheapest objective found so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestObjective {
    pub loc: Loc,
    pub cost: i32,
}

impl BestObjective {
    /// Nothing found yet: the origin at [`INFINITY`].
    pub fn none(origin: Loc) -> Self {
        BestObjective::bounded(origin, INFINITY)
    }

    /// Nothing found yet, and only objectives cheaper than `bound` count.
    pub fn bounded(origin: Loc, bound: i32) -> Self {
        BestObjective {
            loc: origin,
            cost: bound,
        }
    }

    /// Takes `loc` if it is strictly cheaper than the current best.
    pub fn offer(&mut self, loc: Loc, cost: i32) -> bool {
        if cost < self.cost {
            self.loc = loc;
            self.cost = cost;
            true
        } else {
            false
        }
    }
}

/// Cost of treating `loc` as an objective when it was reached at
/// `base_cost`. Returns [`INFINITY`] for cells that are not objectives.
pub fn objective_cost(
    view: &ViewMap,
    real: &RealMap,
    profile: &MobilityProfile,
    loc: Loc,
    base_cost: i32,
) -> i32 {
    match profile.weight_of(view.get(loc)) {
        None | Some(Weight::Unreachable) => INFINITY,
        Some(Weight::Cost(w)) => base_cost.saturating_add_unsigned(w),
        Some(Weight::AwaitTransport) => await_transport_cost(real, loc, base_cost),
    }
}

fn await_transport_cost(real: &RealMap, loc: Loc, base_cost: i32) -> i32 {
    let floor = base_cost + 2;
    match real.city(loc) {
        Some(city) if city.production == PieceKind::Transport => {
            let remaining = PieceKind::Transport.build_time() as i32 - city.work as i32;
            (remaining * 2).max(floor)
        }
        _ => floor,
    }
}
