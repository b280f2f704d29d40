//! # gcbc
//!
//! Rules engine for a hidden-role, turn-based card game played by bots.
//!
//! ## Design Principles
//!
//! 1. **Closed move sets**: actions and equipment effects are enums; every
//!    variant is validated, applied and announced through one `Operator` trait.
//!
//! 2. **Results, not panics**: a bad proposal is an `InvalidMove`. The driver
//!    answers it with a rollback and a Pass, and the round always completes.
//!
//! 3. **Bots see projections**: bots get opaque copies of the table and deck
//!    and learn hidden information only through private updates.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: table and deck are built on `im`, so
//!   `play` is copy-on-write and a checkpoint is an O(1) clone.
//!
//! - **Single Turn Driver**: all mutation goes through `GameEngine`, which
//!   owns the `EngineContext` exclusively.
//!
//! ## Modules
//!
//! - `core`: Players, cards, table/deck state, RNG, configuration, errors
//! - `operators`: The operator protocol, actions, equipment consumptions
//! - `notify`: Update records and the notification log
//! - `bots`: The bot trait, bot manager, reference bots
//! - `engine`: Setup, checkpoints, win conditions, the turn driver
//!
//! ## Example
//!
//! ```
//! use gcbc::{Bot, EngineConfig, GameEngine, PlayerId, RandomBot};
//!
//! let config = EngineConfig::new().with_player_count(5).with_seed(7);
//! let bots: Vec<Box<dyn Bot>> = PlayerId::all(5)
//!     .map(|p| Box::new(RandomBot::new(p, u64::from(p.0))) as Box<dyn Bot>)
//!     .collect();
//!
//! let mut engine = GameEngine::new_game(config, bots).unwrap();
//! let summary = engine.play_game();
//! assert!(summary.rounds_played > 0);
//! ```

pub mod bots;
pub mod core;
pub mod engine;
pub mod notify;
pub mod operators;

// Re-export commonly used types
pub use crate::core::{
    CardIndex, DeckState, EngineConfig, EquipmentCard, Faction, GameError, GameResult, GameRng,
    IntegrityCard, InvalidMove, MoveResult, PlayerGameState, PlayerGunState, PlayerHealth,
    PlayerId, PlayerIntegrityCardState, PlayerMap, TableState,
};

pub use crate::operators::{Action, ActionType, EquipmentConsumption, Operator};

pub use crate::notify::{Audience, NotificationBus, Update, UpdateId, UpdateKind, UpdatePayload, UpdateSink};

pub use crate::bots::{Bot, BotManager, PassBot, RandomBot};

pub use crate::engine::{
    Checkpoint, EngineContext, GameEngine, GameSummary, TurnPhase, WinCondition,
};
