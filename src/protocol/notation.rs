//! Map notation encoding and decoding.
//!
//! A map is written as its rows separated by `/`, one character per cell,
//! so a whole map fits in a single whitespace-free token.
//!
//! True maps use `+` land, `.` sea, `*` unowned city, `O` user city and `X`
//! computer city. A city may be followed by its production in brackets: a
//! piece letter and the work done so far, e.g. `X[t12]`.
//!
//! View maps use the display glyphs, except that `_` stands for an
//! unexplored cell.

use crate::board::{City, Glyph, Grid, GridError, PieceKind, Player, RealCell, RealMap, ViewMap};

/// Stand-in for the unexplored glyph, which is a space on screen.
pub const UNEXPLORED_CHAR: char = '_';

/// Errors that can occur during map notation parsing.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("map notation is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid map character '{ch}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("invalid production '{0}'")]
    InvalidProduction(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parses a true map.
pub fn parse_real_map(s: &str) -> Result<RealMap, NotationError> {
    let rows = s
        .split('/')
        .enumerate()
        .map(|(r, row)| parse_real_row(r, row))
        .collect::<Result<Vec<_>, _>>()?;
    let grid = rectangle(&rows)?;
    let mut map = RealMap::filled(grid, RealCell::Sea);
    for (loc, cell) in grid.locs().zip(rows.into_iter().flatten()) {
        map.set(loc, cell);
    }
    Ok(map)
}

fn parse_real_row(row: usize, s: &str) -> Result<Vec<RealCell>, NotationError> {
    let mut cells = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        let col = cells.len();
        let owner = match ch {
            '+' => {
                cells.push(RealCell::Land);
                continue;
            }
            '.' => {
                cells.push(RealCell::Sea);
                continue;
            }
            '*' => None,
            c if c == Player::User.city_char() => Some(Player::User),
            c if c == Player::Comp.city_char() => Some(Player::Comp),
            ch => return Err(NotationError::InvalidCell { row, col, ch }),
        };

        let mut city = City {
            owner,
            ..City::unowned()
        };
        if chars.peek() == Some(&'[') {
            chars.next();
            let text: String = chars.by_ref().take_while(|&c| c != ']').collect();
            let (kind, work) = parse_production(&text)?;
            city.production = kind;
            city.work = work;
        }
        cells.push(RealCell::City(city));
    }
    Ok(cells)
}

fn parse_production(text: &str) -> Result<(PieceKind, u32), NotationError> {
    let invalid = || NotationError::InvalidProduction(text.to_string());
    let mut chars = text.chars();
    let kind = chars.next().and_then(PieceKind::from_letter).ok_or_else(invalid)?;
    let rest = chars.as_str();
    let work = if rest.is_empty() {
        0
    } else {
        rest.parse().map_err(|_| invalid())?
    };
    Ok((kind, work))
}

/// Encodes a true map, including production for every city.
pub fn encode_real_map(map: &RealMap) -> String {
    let grid = map.grid();
    let mut out = String::with_capacity(grid.size() + grid.rows());
    for (i, loc) in grid.locs().enumerate() {
        if i > 0 && grid.col(loc) == 0 {
            out.push('/');
        }
        match map.cell(loc) {
            RealCell::City(city) => {
                out.push(map.cell(loc).glyph().to_char());
                out.push('[');
                out.push(city.production.letter().to_ascii_lowercase());
                out.push_str(&city.work.to_string());
                out.push(']');
            }
            cell => out.push(cell.terrain().to_char()),
        }
    }
    out
}

/// Parses a view map.
pub fn parse_view_map(s: &str) -> Result<ViewMap, NotationError> {
    let rows = s
        .split('/')
        .enumerate()
        .map(|(r, row)| {
            row.chars()
                .enumerate()
                .map(|(col, ch)| view_glyph(ch).ok_or(NotationError::InvalidCell { row: r, col, ch }))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let grid = rectangle(&rows)?;
    let mut view = ViewMap::unexplored(grid);
    for (loc, glyph) in grid.locs().zip(rows.into_iter().flatten()) {
        view.set(loc, glyph);
    }
    Ok(view)
}

fn view_glyph(ch: char) -> Option<Glyph> {
    match ch {
        UNEXPLORED_CHAR => Some(Glyph::Unexplored),
        ' ' => None,
        ch => Glyph::from_char(ch),
    }
}

/// Encodes a view map.
pub fn encode_view_map(view: &ViewMap) -> String {
    let grid = view.grid();
    let mut out = String::with_capacity(grid.size() + grid.rows());
    for (i, loc) in grid.locs().enumerate() {
        if i > 0 && grid.col(loc) == 0 {
            out.push('/');
        }
        out.push(match view.get(loc) {
            Glyph::Unexplored => UNEXPLORED_CHAR,
            glyph => glyph.to_char(),
        });
    }
    out
}

/// Checks that parsed rows form a rectangle and returns its grid.
fn rectangle<T>(rows: &[Vec<T>]) -> Result<Grid, NotationError> {
    let cols = rows.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(NotationError::Empty);
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(NotationError::RaggedRow {
            row,
            expected: cols,
            found: r.len(),
        });
    }
    Ok(Grid::new(rows.len(), cols)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Loc, Terrain};

    #[test]
    fn parse_true_map_with_production() {
        let map = parse_real_map("+.X[t12]/*O.").unwrap();
        let grid = map.grid();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(map.terrain(Loc::new(1)), Terrain::Sea);

        let city = map.city(Loc::new(2)).unwrap();
        assert_eq!(city.owner, Some(Player::Comp));
        assert_eq!(city.production, PieceKind::Transport);
        assert_eq!(city.work, 12);

        let unowned = map.city(Loc::new(3)).unwrap();
        assert_eq!(unowned.owner, None);
        assert_eq!(unowned.production, PieceKind::Army);
    }

    #[test]
    fn true_map_encoding_round_trip() {
        let s = "+.X[t12]/*[a0]O[f3].";
        let map = parse_real_map(s).unwrap();
        assert_eq!(encode_real_map(&map), s);
    }

    #[test]
    fn view_uses_underscore_for_unexplored() {
        let view = parse_view_map("_+a/O$.").unwrap();
        assert_eq!(view.get(Loc::new(0)), Glyph::Unexplored);
        assert_eq!(view.get(Loc::new(2)), Glyph::Piece(Player::Comp, PieceKind::Army));
        assert_eq!(view.get(Loc::new(4)), Glyph::Marker('$'));
        assert_eq!(encode_view_map(&view), "_+a/O$.");
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = parse_view_map("++/+").unwrap_err();
        assert!(matches!(err, NotationError::RaggedRow { row: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn bad_cells_rejected() {
        assert!(matches!(
            parse_real_map("+q"),
            Err(NotationError::InvalidCell { row: 0, col: 1, ch: 'q' })
        ));
        assert!(matches!(parse_real_map("X[q1]"), Err(NotationError::InvalidProduction(_))));
        assert!(matches!(parse_real_map(""), Err(NotationError::Empty)));
        assert!(matches!(parse_view_map("+ +"), Err(NotationError::InvalidCell { col: 1, .. })));
    }

    #[test]
    fn oversized_map_rejected() {
        let row = "+".repeat(101);
        assert!(matches!(parse_real_map(&row), Err(NotationError::Grid(_))));
    }
}
