//! End-of-round win evaluation.

use serde::{Deserialize, Serialize};

use crate::core::{IntegrityCard, TableState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinCondition {
    OnePlayerAlive,
    AgentDead,
    KingpinDead,
    AgentIsKingpin,
}

impl std::fmt::Display for WinCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WinCondition::OnePlayerAlive => "one player alive",
            WinCondition::AgentDead => "agent dead",
            WinCondition::KingpinDead => "kingpin dead",
            WinCondition::AgentIsKingpin => "agent is kingpin",
        })
    }
}

/// Check the table for a finished game.
///
/// Conditions are tested in a fixed order and the first match wins: a lone
/// survivor beats everything else.
#[must_use]
pub fn evaluate(table: &TableState) -> Option<WinCondition> {
    if table.alive_players().count() == 1 {
        return Some(WinCondition::OnePlayerAlive);
    }

    let holder_dead = |card| table.iter().any(|(_, s)| s.holds(card) && !s.is_alive());
    if holder_dead(IntegrityCard::Agent) {
        return Some(WinCondition::AgentDead);
    }
    if holder_dead(IntegrityCard::Kingpin) {
        return Some(WinCondition::KingpinDead);
    }

    table
        .iter()
        .any(|(_, s)| s.is_alive() && s.holds(IntegrityCard::Agent) && s.holds(IntegrityCard::Kingpin))
        .then_some(WinCondition::AgentIsKingpin)
}
