//! Shore and open-sea predicates.

use crate::board::{Glyph, Loc, RealMap, ViewMap};

/// True if any neighbor of `loc` is sea on the true map.
pub fn real_shore(real: &RealMap, loc: Loc) -> bool {
    real.grid().neighbors(loc).any(|n| real.is_sea(n))
}

/// True if any neighbor of `loc` is sea that the viewer has seen as
/// something other than land.
pub fn view_shore(view: &ViewMap, real: &RealMap, loc: Loc) -> bool {
    view.grid()
        .neighbors(loc)
        .any(|n| !matches!(view.get(n), Glyph::Unexplored | Glyph::Land) && real.is_sea(n))
}

/// True if `loc` is sea and every neighbor is sea the viewer has seen.
pub fn view_at_sea(view: &ViewMap, real: &RealMap, loc: Loc) -> bool {
    real.is_sea(loc)
        && view
            .grid()
            .neighbors(loc)
            .all(|n| !matches!(view.get(n), Glyph::Unexplored | Glyph::Land) && real.is_sea(n))
}

/// True if `loc` and every neighbor are sea on the true map.
pub fn real_at_sea(real: &RealMap, loc: Loc) -> bool {
    real.is_sea(loc) && real.grid().neighbors(loc).all(|n| real.is_sea(n))
}
