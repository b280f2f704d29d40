//! Engine-owned mutable state.
//!
//! Everything the turn driver mutates lives in one `EngineContext`, so a
//! checkpoint is a plain clone and a restore is a plain assignment.

use serde::{Deserialize, Serialize};

use crate::core::{DeckState, PlayerId, TableState};

/// Phases of a round, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    PreRound,
    Action,
    Aim,
}

impl TurnPhase {
    pub const ALL: [TurnPhase; 3] = [TurnPhase::PreRound, TurnPhase::Action, TurnPhase::Aim];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::PreRound => "Pre-round",
            TurnPhase::Action => "Action",
            TurnPhase::Aim => "Aim",
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Table, deck, and turn-order state for a game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineContext {
    pub table: TableState,
    pub deck: DeckState,
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    /// Seats to advance per round: 1 clockwise, -1 counter-clockwise.
    pub turn_increment: i8,
    /// Completed rounds.
    pub round: u32,
}

impl EngineContext {
    /// A game about to start its first round with seat 0.
    #[must_use]
    pub fn new(table: TableState, deck: DeckState) -> Self {
        Self {
            table,
            deck,
            current_player: PlayerId::new(0),
            phase: TurnPhase::PreRound,
            turn_increment: 1,
            round: 0,
        }
    }

    /// Next living seat after `current_player`, wrapping around the table.
    ///
    /// Walks the seats actually present in the table, so ids need not be
    /// contiguous. Falls back to `current_player` when nobody else is alive.
    #[must_use]
    pub fn next_player(&self) -> PlayerId {
        let seats: Vec<PlayerId> = self.table.players().collect();
        let n = seats.len() as i64;
        if n == 0 {
            return self.current_player;
        }

        // An absent current seat sits between its neighbours in id order.
        let mut pos = match seats.binary_search(&self.current_player) {
            Ok(i) => i as i64,
            Err(i) if self.turn_increment > 0 => i as i64 - 1,
            Err(i) => i as i64,
        };
        for _ in 0..n {
            pos = (pos + i64::from(self.turn_increment)).rem_euclid(n);
            let candidate = seats[pos as usize];
            if self.table.is_alive(candidate) {
                return candidate;
            }
        }
        self.current_player
    }

    /// Move the turn to the next living player.
    pub fn advance(&mut self) {
        self.current_player = self.next_player();
    }
}
