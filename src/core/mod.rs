//! Core types: players, cards, board state, RNG, configuration, errors.
//!
//! Everything here is plain data plus simple queries. Rules live in
//! `operators`, sequencing lives in `engine`.

pub mod cards;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use cards::{EquipmentCard, Faction, IntegrityCard};
pub use config::{EngineConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{GameError, GameResult, InvalidMove, MoveResult};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{
    CardIndex, DeckState, Hand, PlayerGameState, PlayerGunState, PlayerHealth,
    PlayerIntegrityCardState, TableState, HAND_SIZE,
};
