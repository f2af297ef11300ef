//! Display glyphs, players, and piece kinds.
//!
//! A view map cell holds one glyph: a terrain glyph, a city glyph carrying
//! its owner as seen, a piece glyph, or a transient marker written by a
//! caller. Each glyph has a single-character display form. User pieces are
//! uppercase letters, computer pieces lowercase.

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    User,
    Comp,
}

pub const ALL_PLAYERS: [Player; 2] = [Player::User, Player::Comp];

impl Player {
    pub const fn index(self) -> usize {
        match self {
            Player::User => 0,
            Player::Comp => 1,
        }
    }

    pub const fn opponent(self) -> Player {
        match self {
            Player::User => Player::Comp,
            Player::Comp => Player::User,
        }
    }

    /// Protocol name: `user` or `comp`.
    pub const fn name(self) -> &'static str {
        match self {
            Player::User => "user",
            Player::Comp => "comp",
        }
    }

    pub fn from_name(s: &str) -> Option<Player> {
        match s {
            "user" => Some(Player::User),
            "comp" => Some(Player::Comp),
            _ => None,
        }
    }

    /// Glyph of a city this player owns.
    pub const fn city_char(self) -> char {
        match self {
            Player::User => 'O',
            Player::Comp => 'X',
        }
    }
}

pub const PIECE_KIND_COUNT: usize = 9;

/// The kinds of piece a city can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Army,
    Fighter,
    Patrol,
    Destroyer,
    Submarine,
    Transport,
    Carrier,
    Battleship,
    Satellite,
}

pub const ALL_PIECE_KINDS: [PieceKind; PIECE_KIND_COUNT] = [
    PieceKind::Army,
    PieceKind::Fighter,
    PieceKind::Patrol,
    PieceKind::Destroyer,
    PieceKind::Submarine,
    PieceKind::Transport,
    PieceKind::Carrier,
    PieceKind::Battleship,
    PieceKind::Satellite,
];

impl PieceKind {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Uppercase display letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Army => 'A',
            PieceKind::Fighter => 'F',
            PieceKind::Patrol => 'P',
            PieceKind::Destroyer => 'D',
            PieceKind::Submarine => 'S',
            PieceKind::Transport => 'T',
            PieceKind::Carrier => 'C',
            PieceKind::Battleship => 'B',
            PieceKind::Satellite => 'Z',
        }
    }

    /// Parses a piece kind from its display letter in either case.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| kind.letter() == c.to_ascii_uppercase())
    }

    /// Turns of city work needed to produce one piece.
    pub const fn build_time(self) -> u32 {
        match self {
            PieceKind::Army => 5,
            PieceKind::Fighter => 10,
            PieceKind::Patrol => 15,
            PieceKind::Destroyer => 20,
            PieceKind::Submarine => 20,
            PieceKind::Transport => 30,
            PieceKind::Carrier => 30,
            PieceKind::Battleship => 40,
            PieceKind::Satellite => 50,
        }
    }
}

/// The content of a view map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Unexplored,
    Land,
    Sea,
    /// A city as last seen; `None` is unowned.
    City(Option<Player>),
    Piece(Player, PieceKind),
    /// Temporary destination marker used by fixed-destination searches.
    Destination,
    /// Any other printable character a caller writes into the view.
    Marker(char),
}

impl Glyph {
    pub const fn to_char(self) -> char {
        match self {
            Glyph::Unexplored => ' ',
            Glyph::Land => '+',
            Glyph::Sea => '.',
            Glyph::City(None) => '*',
            Glyph::City(Some(owner)) => owner.city_char(),
            Glyph::Piece(Player::User, kind) => kind.letter(),
            Glyph::Piece(Player::Comp, kind) => kind.letter().to_ascii_lowercase(),
            Glyph::Destination => '%',
            Glyph::Marker(c) => c,
        }
    }

    /// Parses a display character. Printable characters with no other
    /// meaning become markers.
    pub fn from_char(c: char) -> Option<Glyph> {
        let glyph = match c {
            ' ' => Glyph::Unexplored,
            '+' => Glyph::Land,
            '.' => Glyph::Sea,
            '*' => Glyph::City(None),
            'O' => Glyph::City(Some(Player::User)),
            'X' => Glyph::City(Some(Player::Comp)),
            '%' => Glyph::Destination,
            c if c.is_ascii_alphabetic() => match PieceKind::from_letter(c) {
                Some(kind) if c.is_ascii_uppercase() => Glyph::Piece(Player::User, kind),
                Some(kind) => Glyph::Piece(Player::Comp, kind),
                None => Glyph::Marker(c),
            },
            c if c.is_ascii_graphic() => Glyph::Marker(c),
            _ => return None,
        };
        Some(glyph)
    }

    pub const fn is_city(self) -> bool {
        matches!(self, Glyph::City(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_and_city_chars() {
        assert_eq!(Glyph::from_char('+'), Some(Glyph::Land));
        assert_eq!(Glyph::from_char('.'), Some(Glyph::Sea));
        assert_eq!(Glyph::from_char(' '), Some(Glyph::Unexplored));
        assert_eq!(Glyph::from_char('O'), Some(Glyph::City(Some(Player::User))));
        assert_eq!(Glyph::from_char('X'), Some(Glyph::City(Some(Player::Comp))));
        assert_eq!(Glyph::from_char('*'), Some(Glyph::City(None)));
    }

    #[test]
    fn piece_case_selects_owner() {
        assert_eq!(
            Glyph::from_char('T'),
            Some(Glyph::Piece(Player::User, PieceKind::Transport))
        );
        assert_eq!(
            Glyph::from_char('a'),
            Some(Glyph::Piece(Player::Comp, PieceKind::Army))
        );
        assert_eq!(Glyph::Piece(Player::Comp, PieceKind::Satellite).to_char(), 'z');
    }

    #[test]
    fn unassigned_printables_are_markers() {
        assert_eq!(Glyph::from_char('$'), Some(Glyph::Marker('$')));
        assert_eq!(Glyph::from_char('7'), Some(Glyph::Marker('7')));
        assert_eq!(Glyph::from_char('o'), Some(Glyph::Marker('o')));
        assert_eq!(Glyph::from_char('\n'), None);
    }

    #[test]
    fn every_glyph_char_parses_back() {
        for c in (0x20u8..0x7f).map(char::from) {
            let glyph = Glyph::from_char(c).unwrap();
            assert_eq!(glyph.to_char(), c);
        }
    }

    #[test]
    fn build_times() {
        assert_eq!(PieceKind::Army.build_time(), 5);
        assert_eq!(PieceKind::Transport.build_time(), 30);
        assert_eq!(PieceKind::Satellite.build_time(), 50);
        assert_eq!(PieceKind::from_letter('b'), Some(PieceKind::Battleship));
    }

    #[test]
    fn player_names() {
        assert_eq!(Player::from_name("comp"), Some(Player::Comp));
        assert_eq!(Player::User.opponent(), Player::Comp);
        assert_eq!(Player::from_name("red"), None);
    }
}
