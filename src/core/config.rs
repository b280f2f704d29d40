//! Engine configuration.
//!
//! Everything that is fixed for the life of a game: table size, the RNG
//! seed that drives the deal, and limits on how long a game may run.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 8;

/// Game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of seats (2-8).
    pub player_count: usize,

    /// Seed for the deal. Same seed, same cards.
    pub seed: u64,

    /// Size of the gun pool. `None` uses half the table, rounded down.
    pub guns: Option<u32>,

    /// Rounds to play before giving up on a winner (0 = unlimited).
    pub max_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            seed: 42,
            guns: None,
            max_rounds: 500,
        }
    }
}

impl EngineConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of seats.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the gun pool size.
    #[must_use]
    pub fn with_guns(mut self, guns: u32) -> Self {
        self.guns = Some(guns);
        self
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Guns in the pool at game start.
    #[must_use]
    pub fn gun_count(&self) -> u32 {
        self.guns.unwrap_or((self.player_count / 2) as u32)
    }

    /// Whether `round` (0-based) is past the round limit.
    #[must_use]
    pub fn round_limit_reached(&self, rounds_played: u32) -> bool {
        self.max_rounds > 0 && rounds_played >= self.max_rounds
    }

    /// Reject tables the deal cannot support.
    pub fn validate(&self) -> GameResult<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::InvalidPlayerCount {
                got: self.player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        Ok(())
    }
}
