//! Mobility profiles: which glyphs a search hunts for and what each is worth.
//!
//! A profile is an ordered list of objective glyphs, each paired with a
//! [`Weight`]. The stock profiles cover the goals the computer player and the
//! user's automatic movers pursue.

use crate::board::{Glyph, Player};

/// How a found objective is costed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    /// Added to the cost of reaching the objective.
    Cost(u32),
    /// Never worth pursuing.
    Unreachable,
    /// A city worth waiting in only while it builds a transport.
    AwaitTransport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobilityProfile {
    owner: Player,
    objectives: Vec<(Glyph, Weight)>,
}

/// Names accepted by [`stock_profile`].
pub const STOCK_PROFILE_NAMES: [&str; 13] = [
    "army_fight",
    "army_load",
    "tt_load",
    "tt_explore",
    "tt_unload",
    "fighter_fight",
    "ship_fight",
    "ship_repair",
    "user_army",
    "user_army_attack",
    "user_fighter",
    "user_ship",
    "user_ship_repair",
];

impl MobilityProfile {
    pub fn new(owner: Player, objectives: impl IntoIterator<Item = (Glyph, Weight)>) -> Self {
        MobilityProfile {
            owner,
            objectives: objectives.into_iter().collect(),
        }
    }

    /// A profile with one objective.
    pub fn single(owner: Player, glyph: Glyph, weight: Weight) -> Self {
        MobilityProfile::new(owner, [(glyph, weight)])
    }

    /// Builds a profile from a string of glyph characters and a parallel
    /// weight list.
    fn table(owner: Player, glyphs: &str, weights: &[Weight]) -> Self {
        assert_eq!(glyphs.chars().count(), weights.len(), "profile table '{glyphs}'");
        let objectives = glyphs
            .chars()
            .zip(weights.iter().copied())
            .filter_map(|(c, w)| Glyph::from_char(c).map(|g| (g, w)));
        MobilityProfile::new(owner, objectives)
    }

    /// The player the searching piece belongs to.
    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn objectives(&self) -> &[(Glyph, Weight)] {
        &self.objectives
    }

    /// Weight of the first entry for `glyph`, if it is an objective.
    pub fn weight_of(&self, glyph: Glyph) -> Option<Weight> {
        self.objectives
            .iter()
            .find(|(g, _)| *g == glyph)
            .map(|&(_, w)| w)
    }

    /// The objective glyphs in preference order.
    pub fn glyphs(&self) -> Vec<Glyph> {
        self.objectives.iter().map(|&(g, _)| g).collect()
    }
}

/// Looks up a stock profile by name.
pub fn stock_profile(name: &str) -> Option<MobilityProfile> {
    use Weight::{AwaitTransport, Cost, Unreachable};
    let c = Cost;
    let profile = match name {
        "army_fight" => MobilityProfile::table(
            Player::Comp,
            "O*TA ",
            &[c(1), c(1), c(1), c(1), c(11)],
        ),
        "army_load" => MobilityProfile::table(Player::Comp, "$", &[AwaitTransport]),
        "tt_load" => MobilityProfile::table(Player::Comp, "$", &[c(1)]),
        "tt_explore" => MobilityProfile::table(Player::Comp, " ", &[c(1)]),
        "tt_unload" => {
            let mut weights = vec![c(1); 10];
            weights.push(Unreachable);
            MobilityProfile::table(Player::Comp, "9876543210 ", &weights)
        }
        "fighter_fight" => MobilityProfile::table(
            Player::Comp,
            "TCFBSDPA ",
            &[c(1), c(1), c(5), c(5), c(5), c(5), c(5), c(5), c(9)],
        ),
        "ship_fight" => MobilityProfile::table(
            Player::Comp,
            "TCBSDP ",
            &[c(1), c(1), c(3), c(3), c(3), c(3), c(21)],
        ),
        "ship_repair" => MobilityProfile::table(Player::Comp, "X", &[c(1)]),
        "user_army" => MobilityProfile::table(Player::User, " ", &[c(1)]),
        "user_army_attack" => MobilityProfile::table(
            Player::User,
            "*Xa ",
            &[c(1), c(1), c(1), c(12)],
        ),
        "user_fighter" => MobilityProfile::table(Player::User, " ", &[c(1)]),
        "user_ship" => MobilityProfile::table(Player::User, " ", &[c(1)]),
        "user_ship_repair" => MobilityProfile::table(Player::User, "O", &[c(1)]),
        _ => return None,
    };
    Some(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;

    #[test]
    fn every_stock_name_resolves() {
        for name in STOCK_PROFILE_NAMES {
            assert!(stock_profile(name).is_some(), "{name}");
        }
        assert!(stock_profile("bogus").is_none());
    }

    #[test]
    fn army_fight_weights() {
        let p = stock_profile("army_fight").unwrap();
        assert_eq!(p.owner(), Player::Comp);
        assert_eq!(p.weight_of(Glyph::City(Some(Player::User))), Some(Weight::Cost(1)));
        assert_eq!(
            p.weight_of(Glyph::Piece(Player::User, PieceKind::Transport)),
            Some(Weight::Cost(1))
        );
        assert_eq!(p.weight_of(Glyph::Unexplored), Some(Weight::Cost(11)));
        assert_eq!(p.weight_of(Glyph::Sea), None);
    }

    #[test]
    fn unload_skips_unexplored() {
        let p = stock_profile("tt_unload").unwrap();
        assert_eq!(p.objectives().len(), 11);
        assert_eq!(p.weight_of(Glyph::Marker('9')), Some(Weight::Cost(1)));
        assert_eq!(p.weight_of(Glyph::Unexplored), Some(Weight::Unreachable));
    }

    #[test]
    fn army_load_waits_for_transport() {
        let p = stock_profile("army_load").unwrap();
        assert_eq!(p.glyphs(), vec![Glyph::Marker('$')]);
        assert_eq!(p.weight_of(Glyph::Marker('$')), Some(Weight::AwaitTransport));
    }
}
