//! Integrity and equipment card enumerations.
//!
//! Both enumerations are closed. `Unknown` is never dealt: it only appears
//! in opaque projections handed to bots.

use serde::{Deserialize, Serialize};

/// Which side an integrity card counts towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Good,
    Bad,
    Unknown,
}

/// A hidden-role card held face-down or face-up by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntegrityCard {
    /// Unique. Leader of the bad cops.
    Kingpin,
    /// Unique. Leader of the good cops.
    Agent,
    GoodCop,
    BadCop,
    /// Placeholder for a face-down card in an opaque view.
    Unknown,
}

impl IntegrityCard {
    /// Blackmail flip: good and bad cops swap sides, everything else is fixed.
    ///
    /// ```
    /// use gcbc::core::IntegrityCard;
    ///
    /// assert_eq!(IntegrityCard::GoodCop.flip(), IntegrityCard::BadCop);
    /// assert_eq!(IntegrityCard::Kingpin.flip(), IntegrityCard::Kingpin);
    /// ```
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            IntegrityCard::GoodCop => IntegrityCard::BadCop,
            IntegrityCard::BadCop => IntegrityCard::GoodCop,
            other => other,
        }
    }

    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            IntegrityCard::Agent | IntegrityCard::GoodCop => Faction::Good,
            IntegrityCard::Kingpin | IntegrityCard::BadCop => Faction::Bad,
            IntegrityCard::Unknown => Faction::Unknown,
        }
    }

    /// Agent and Kingpin survive their first shot.
    #[must_use]
    pub const fn is_leader(self) -> bool {
        matches!(self, IntegrityCard::Agent | IntegrityCard::Kingpin)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            IntegrityCard::Kingpin => "Kingpin",
            IntegrityCard::Agent => "Agent",
            IntegrityCard::GoodCop => "Good Cop",
            IntegrityCard::BadCop => "Bad Cop",
            IntegrityCard::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for IntegrityCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An equipment card, drawn by Equip and consumed during the pre-round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentCard {
    Taser,
    Defibrillator,
    Blackmail,
    Polygraph,
    Swap,
    /// Placeholder for an unrevealed equipment card in an opaque view.
    Unknown,
}

impl EquipmentCard {
    /// Every card that goes into a fresh equipment deck.
    pub const PLAYABLE: [EquipmentCard; 5] = [
        EquipmentCard::Taser,
        EquipmentCard::Defibrillator,
        EquipmentCard::Blackmail,
        EquipmentCard::Polygraph,
        EquipmentCard::Swap,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EquipmentCard::Taser => "Taser",
            EquipmentCard::Defibrillator => "Defibrillator",
            EquipmentCard::Blackmail => "Blackmail",
            EquipmentCard::Polygraph => "Polygraph",
            EquipmentCard::Swap => "Swap",
            EquipmentCard::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            EquipmentCard::Taser => "Steal someone's gun",
            EquipmentCard::Defibrillator => "Revive a fallen comrade",
            EquipmentCard::Blackmail => "Flip bad cops to good and vice versa",
            EquipmentCard::Polygraph => "Show your cards to a player and see all of theirs",
            EquipmentCard::Swap => "Swap any two cards between two players",
            EquipmentCard::Unknown => "An equipment card you have not seen",
        }
    }
}

impl std::fmt::Display for EquipmentCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_is_involution() {
        for card in [
            IntegrityCard::Kingpin,
            IntegrityCard::Agent,
            IntegrityCard::GoodCop,
            IntegrityCard::BadCop,
            IntegrityCard::Unknown,
        ] {
            assert_eq!(card.flip().flip(), card);
        }
        assert_eq!(IntegrityCard::BadCop.flip(), IntegrityCard::GoodCop);
        assert_eq!(IntegrityCard::Agent.flip(), IntegrityCard::Agent);
        assert_eq!(IntegrityCard::Unknown.flip(), IntegrityCard::Unknown);
    }

    #[test]
    fn test_factions() {
        assert_eq!(IntegrityCard::Agent.faction(), Faction::Good);
        assert_eq!(IntegrityCard::GoodCop.faction(), Faction::Good);
        assert_eq!(IntegrityCard::Kingpin.faction(), Faction::Bad);
        assert_eq!(IntegrityCard::BadCop.faction(), Faction::Bad);
        assert_eq!(IntegrityCard::Unknown.faction(), Faction::Unknown);
    }

    #[test]
    fn test_leaders() {
        assert!(IntegrityCard::Agent.is_leader());
        assert!(IntegrityCard::Kingpin.is_leader());
        assert!(!IntegrityCard::GoodCop.is_leader());
        assert!(!IntegrityCard::Unknown.is_leader());
    }

    #[test]
    fn test_playable_excludes_unknown() {
        assert!(!EquipmentCard::PLAYABLE.contains(&EquipmentCard::Unknown));
        assert_eq!(EquipmentCard::PLAYABLE.len(), 5);
        assert_eq!(format!("{}", EquipmentCard::Defibrillator), "Defibrillator");
    }
}
